//! Configuration loading and management.

mod file;
mod types;
mod validate;

pub use file::{config_path, load_config, load_config_file, save_config, save_config_to};
pub use types::{
    ClipWriteFailurePolicy, Config, DefaultsConfig, ManifestFormat, OutputConfig, SynthesisConfig,
};
pub use validate::{validate_config, validate_defaults};
