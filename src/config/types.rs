//! Configuration type definitions.

use crate::constants::{
    DEFAULT_JOBS, DEFAULT_OUTPUT_DIR_NAME, DEFAULT_RECORDING_DURATION, DEFAULT_SAMPLE_RATE,
    DEFAULT_WINDOW_LEN, synthesis,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Default build settings.
    #[serde(default)]
    pub defaults: DefaultsConfig,

    /// Output settings.
    #[serde(default)]
    pub output: OutputConfig,

    /// Scene synthesizer settings.
    #[serde(default)]
    pub synthesis: SynthesisConfig,
}

/// Default build settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    /// Sample rate clips are decoded and written at.
    pub sample_rate: u32,

    /// Window length in seconds.
    pub window_len: f64,

    /// Duration of every recording in seconds.
    pub recording_duration: f64,

    /// Manifest format.
    pub format: ManifestFormat,

    /// Write a WAV clip for every window.
    pub generate_clips: bool,

    /// Keep synthesized scene audio after decoding.
    pub keep_scene_audio: bool,

    /// What to do with a row whose clip could not be written.
    pub clip_write_failure: ClipWriteFailurePolicy,

    /// Number of recordings processed concurrently.
    pub jobs: usize,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            sample_rate: DEFAULT_SAMPLE_RATE,
            window_len: DEFAULT_WINDOW_LEN,
            recording_duration: DEFAULT_RECORDING_DURATION,
            format: ManifestFormat::Csv,
            generate_clips: true,
            keep_scene_audio: false,
            clip_write_failure: ClipWriteFailurePolicy::KeepRow,
            jobs: DEFAULT_JOBS,
        }
    }
}

/// Output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Name of the output root, created next to the dataset root.
    pub dir_name: String,

    /// Failure log directory (default: `<output root>/logs`).
    pub log_dir: Option<PathBuf>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir_name: DEFAULT_OUTPUT_DIR_NAME.to_string(),
            log_dir: None,
        }
    }
}

/// External scene synthesizer settings.
///
/// `args` may contain `{annotation}` and `{audio}` placeholders.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SynthesisConfig {
    /// Program to execute.
    pub program: String,

    /// Program arguments.
    pub args: Vec<String>,

    /// Kill the synthesizer after this many seconds.
    pub timeout_secs: Option<u64>,
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            program: synthesis::DEFAULT_PROGRAM.to_string(),
            args: vec![
                "-c".to_string(),
                synthesis::DEFAULT_SCRIPT.to_string(),
                synthesis::ANNOTATION_PLACEHOLDER.to_string(),
                synthesis::AUDIO_PLACEHOLDER.to_string(),
            ],
            timeout_secs: None,
        }
    }
}

/// Supported manifest formats.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum ManifestFormat {
    /// CSV table.
    #[default]
    Csv,
    /// JSON document.
    Json,
}

impl ManifestFormat {
    /// File extension of this format.
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }
}

impl std::fmt::Display for ManifestFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}

/// Handling of manifest rows whose clip failed to write.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ClipWriteFailurePolicy {
    /// Keep the row; the manifest may reference a missing clip.
    #[default]
    KeepRow,
    /// Drop the row.
    DropRow,
}
