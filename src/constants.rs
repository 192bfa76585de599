//! Application-wide constants.
//!
//! All magic numbers and strings are defined here to ensure consistency
//! and make changes easy to track.

/// Application name used for config directories and user-facing messages.
pub const APP_NAME: &str = "scenetag";

/// Config file name inside the platform config directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Default sample rate clips are decoded and written at.
pub const DEFAULT_SAMPLE_RATE: u32 = 16_000;

/// Default window length in seconds.
pub const DEFAULT_WINDOW_LEN: f64 = 1.0;

/// Default recording duration in seconds.
///
/// Every synthesized scene in the source corpus is exactly this long.
pub const DEFAULT_RECORDING_DURATION: f64 = 10.0;

/// Default number of recordings processed concurrently.
pub const DEFAULT_JOBS: usize = 1;

/// Default directory name for generated output, a sibling of the dataset root.
pub const DEFAULT_OUTPUT_DIR_NAME: &str = "tag-new";

/// Annotation (JAMS) constants.
pub mod annotation {
    /// File extension of annotation files.
    pub const EXTENSION: &str = "jams";

    /// Namespace of the scaper event annotation inside a JAMS document.
    pub const SCAPER_NAMESPACE: &str = "scaper";

    /// Role of the reserved first observation of every scaper annotation.
    pub const BACKGROUND_ROLE: &str = "background";
}

/// Dataset directory layout names.
pub mod layout {
    /// Directory holding annotation files below the dataset root.
    pub const ANNOTATION_DIR: &str = "jams";

    /// Directory holding scene audio (and clips, below the output root).
    pub const AUDIO_DIR: &str = "audio";

    /// Directory holding manifests below the output root.
    pub const MANIFEST_DIR: &str = "ann";

    /// Directory holding failure logs below the output root.
    pub const LOG_DIR: &str = "logs";

    /// Extension of scene audio and clip files.
    pub const AUDIO_EXTENSION: &str = "wav";

    /// Extension of failure log files.
    pub const LOG_EXTENSION: &str = "txt";
}

/// Manifest column names.
pub mod manifest {
    /// Clip path column.
    pub const FILE_NAME: &str = "file_name";
    /// Source annotation file column.
    pub const SOURCE_FILE: &str = "source_file";
    /// Window start column.
    pub const START_TIME: &str = "start_time";
    /// Label set column.
    pub const LABEL: &str = "label";
}

/// Synthesizer defaults.
pub mod synthesis {
    /// Placeholder replaced with the annotation path.
    pub const ANNOTATION_PLACEHOLDER: &str = "{annotation}";

    /// Placeholder replaced with the target audio path.
    pub const AUDIO_PLACEHOLDER: &str = "{audio}";

    /// Default synthesizer program.
    pub const DEFAULT_PROGRAM: &str = "python3";

    /// Inline script passed to the default program.
    pub const DEFAULT_SCRIPT: &str =
        "import sys, scaper; scaper.generate_from_jams(sys.argv[1], sys.argv[2])";

    /// Interval between polls of a running synthesizer when a timeout is set.
    pub const POLL_INTERVAL_MS: u64 = 50;
}
