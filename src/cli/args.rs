//! CLI argument definitions.

use crate::cli::validators::{parse_positive_seconds, parse_sample_rate};
use crate::config::ManifestFormat;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Build windowed per-event training clips from synthesized sound scenes.
#[derive(Debug, Parser)]
#[command(name = "scenetag")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Options for building a batch.
    #[command(flatten)]
    pub build: BuildArgs,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage configuration.
    Config {
        /// Configuration action to perform.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommand actions.
#[derive(Debug, Clone, Copy, Subcommand)]
pub enum ConfigAction {
    /// Create default configuration file.
    Init,
    /// Display current configuration.
    Show,
    /// Print configuration file path.
    Path,
}

/// Arguments for building one `openness/fold/split` batch.
#[derive(Debug, Args)]
#[allow(clippy::struct_excessive_bools)]
pub struct BuildArgs {
    /// Dataset root containing `jams/` and `audio/`.
    #[arg(long, env = "SCENETAG_DATASET_ROOT")]
    pub dataset_root: Option<PathBuf>,

    /// Openness partition (e.g. high, mid).
    #[arg(long, env = "SCENETAG_OPENNESS")]
    pub openness: Option<String>,

    /// Fold identifier (e.g. fold1).
    #[arg(long, env = "SCENETAG_FOLD")]
    pub fold: Option<String>,

    /// Split name (e.g. train, val, test).
    #[arg(long, env = "SCENETAG_SPLIT")]
    pub split: Option<String>,

    /// Output root (default: sibling of the dataset root named by `output.dir_name`).
    #[arg(short, long, env = "SCENETAG_OUTPUT_ROOT")]
    pub output_root: Option<PathBuf>,

    /// Failure log directory (default: `<output root>/logs`).
    #[arg(long, env = "SCENETAG_LOG_DIR")]
    pub log_dir: Option<PathBuf>,

    /// Clip sample rate in Hz.
    #[arg(long, value_parser = parse_sample_rate, env = "SCENETAG_SAMPLE_RATE")]
    pub sample_rate: Option<u32>,

    /// Window length in seconds.
    #[arg(long, value_parser = parse_positive_seconds, env = "SCENETAG_WINDOW_LEN")]
    pub window_len: Option<f64>,

    /// Recording duration in seconds.
    #[arg(long, value_parser = parse_positive_seconds, env = "SCENETAG_DURATION")]
    pub duration: Option<f64>,

    /// Manifest format.
    #[arg(short, long, value_enum, env = "SCENETAG_FORMAT")]
    pub format: Option<ManifestFormat>,

    /// Only write the manifest, no clip files.
    #[arg(long)]
    pub no_clips: bool,

    /// Keep synthesized scene audio after decoding.
    #[arg(long)]
    pub keep_scene_audio: bool,

    /// Drop manifest rows whose clip could not be written.
    #[arg(long)]
    pub drop_failed_clips: bool,

    /// Number of recordings processed concurrently.
    #[arg(short, long, value_parser = clap::value_parser!(u64).range(1..), env = "SCENETAG_JOBS")]
    pub jobs: Option<u64>,

    /// Kill the synthesizer after this many seconds.
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..), env = "SCENETAG_SYNTH_TIMEOUT")]
    pub synth_timeout: Option<u64>,

    /// Suppress progress output.
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity (-v: debug, -vv: trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Disable the progress bar.
    #[arg(long)]
    pub no_progress: bool,

    /// Configuration file (default: platform config path).
    #[arg(long, global = true, env = "SCENETAG_CONFIG")]
    pub config: Option<PathBuf>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_batch() {
        let cli = Cli::try_parse_from([
            "scenetag",
            "--dataset-root",
            "/data/synthetic",
            "--openness",
            "high",
            "--fold",
            "fold1",
            "--split",
            "train",
        ])
        .unwrap();
        assert!(cli.command.is_none());
        assert_eq!(
            cli.build.dataset_root,
            Some(PathBuf::from("/data/synthetic"))
        );
        assert_eq!(cli.build.openness.as_deref(), Some("high"));
        assert_eq!(cli.build.fold.as_deref(), Some("fold1"));
        assert_eq!(cli.build.split.as_deref(), Some("train"));
        assert!(!cli.build.no_clips);
    }

    #[test]
    fn test_cli_parse_with_options() {
        let cli = Cli::try_parse_from([
            "scenetag",
            "--window-len",
            "0.5",
            "-f",
            "json",
            "-j",
            "4",
            "--no-clips",
            "--drop-failed-clips",
            "-vv",
        ])
        .unwrap();
        assert_eq!(cli.build.window_len, Some(0.5));
        assert_eq!(cli.build.format, Some(ManifestFormat::Json));
        assert_eq!(cli.build.jobs, Some(4));
        assert!(cli.build.no_clips);
        assert!(cli.build.drop_failed_clips);
        assert_eq!(cli.build.verbose, 2);
    }

    #[test]
    fn test_cli_rejects_zero_jobs() {
        assert!(Cli::try_parse_from(["scenetag", "--jobs", "0"]).is_err());
    }

    #[test]
    fn test_cli_rejects_negative_window() {
        assert!(Cli::try_parse_from(["scenetag", "--window-len=-1"]).is_err());
    }

    #[test]
    fn test_cli_rejects_unknown_format() {
        assert!(Cli::try_parse_from(["scenetag", "--format", "parquet"]).is_err());
    }

    #[test]
    fn test_cli_config_path_is_global() {
        let cli =
            Cli::try_parse_from(["scenetag", "config", "path", "--config", "/tmp/c.toml"]).unwrap();
        assert_eq!(cli.build.config, Some(PathBuf::from("/tmp/c.toml")));
    }

    #[test]
    fn test_cli_parse_config_subcommand() {
        let cli = Cli::try_parse_from(["scenetag", "config", "show"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Command::Config {
                action: ConfigAction::Show
            })
        ));
    }
}
