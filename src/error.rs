//! Error types for scenetag.

use std::path::PathBuf;

/// Result type alias for scenetag operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for scenetag.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration directory could not be determined.
    #[error("could not determine configuration directory for this platform")]
    ConfigDirNotFound,

    /// Failed to read configuration file.
    #[error("failed to read config file '{path}'")]
    ConfigRead {
        /// Path to the config file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse configuration file.
    #[error("failed to parse config file '{path}'")]
    ConfigParse {
        /// Path to the config file.
        path: PathBuf,
        /// Underlying parse error.
        #[source]
        source: toml::de::Error,
    },

    /// Failed to write configuration file.
    #[error("failed to write config file '{path}'")]
    ConfigWrite {
        /// Path to the config file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to serialize configuration.
    #[error("failed to serialize config")]
    ConfigSerialize {
        /// Underlying serialization error.
        #[source]
        source: toml::ser::Error,
    },

    /// Configuration validation failed.
    #[error("configuration validation failed: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    /// A required command-line argument was not given.
    #[error("missing required argument --{name}")]
    MissingArgument {
        /// Long name of the argument.
        name: &'static str,
    },

    /// Batch directory with annotation files does not exist.
    #[error("annotation directory does not exist: {path}")]
    AnnotationDirNotFound {
        /// Expected directory.
        path: PathBuf,
    },

    /// Failed to read an annotation file.
    #[error("failed to read annotation file '{path}'")]
    AnnotationRead {
        /// Path to the annotation file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Annotation file is not valid JAMS JSON.
    #[error("failed to parse annotation file '{path}'")]
    AnnotationParse {
        /// Path to the annotation file.
        path: PathBuf,
        /// Underlying parse error.
        #[source]
        source: serde_json::Error,
    },

    /// Annotation file parsed but violates the event contract.
    #[error("malformed annotation '{path}': {message}")]
    MalformedAnnotation {
        /// Path to the annotation file.
        path: PathBuf,
        /// What was wrong.
        message: String,
    },

    /// External synthesizer could not be started.
    #[error("failed to start synthesizer '{program}'")]
    SynthesisSpawn {
        /// Program that was executed.
        program: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// External synthesizer exited unsuccessfully.
    #[error("synthesis of '{path}' failed ({status}): {stderr}")]
    SynthesisFailed {
        /// Target audio path.
        path: PathBuf,
        /// Exit status description.
        status: String,
        /// Captured standard error, trimmed.
        stderr: String,
    },

    /// External synthesizer exceeded its deadline and was killed.
    #[error("synthesis of '{path}' timed out after {timeout_secs}s")]
    SynthesisTimeout {
        /// Target audio path.
        path: PathBuf,
        /// Deadline in seconds.
        timeout_secs: u64,
    },

    /// Synthesizer reported success but produced no audio file.
    #[error("synthesizer produced no audio at '{path}'")]
    SynthesisOutputMissing {
        /// Expected audio path.
        path: PathBuf,
    },

    /// Failed to open audio file.
    #[error("failed to open audio file '{path}'")]
    AudioOpen {
        /// Path to the audio file.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Failed to decode audio.
    #[error("failed to decode audio from '{path}'")]
    AudioDecode {
        /// Path to the audio file.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// No audio tracks found.
    #[error("no audio tracks found in '{path}'")]
    NoAudioTracks {
        /// Path to the audio file.
        path: PathBuf,
    },

    /// Failed to resample audio.
    #[error("failed to resample audio: {reason}")]
    Resample {
        /// Description of the resampling failure.
        reason: String,
    },

    /// Failed to delete synthesized scene audio after decoding.
    #[error("failed to delete scene audio '{path}'")]
    SceneAudioDelete {
        /// Path to the scene audio.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to write WAV file.
    #[error("failed to write WAV file '{path}'")]
    WavWriteFailed {
        /// Path to the WAV file.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: hound::Error,
    },

    /// Failed to create output directory.
    #[error("failed to create output directory '{path}'")]
    OutputDirCreateFailed {
        /// Path to the output directory.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to write the CSV manifest.
    #[error("failed to write manifest '{path}'")]
    ManifestWrite {
        /// Path to the manifest.
        path: PathBuf,
        /// Underlying CSV error.
        #[source]
        source: csv::Error,
    },

    /// Failed to write the JSON manifest.
    #[error("failed to write JSON manifest '{path}'")]
    JsonWrite {
        /// Path to the JSON file.
        path: PathBuf,
        /// Underlying serialization error.
        #[source]
        source: serde_json::Error,
    },

    /// Worker pool could not be created.
    #[error("failed to build worker pool: {reason}")]
    WorkerPool {
        /// Description of the failure.
        reason: String,
    },
}
