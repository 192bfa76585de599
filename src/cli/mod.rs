//! CLI argument parsing.

mod args;
mod validators;

pub use args::{BuildArgs, Cli, Command, ConfigAction};
