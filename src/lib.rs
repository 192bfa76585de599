//! scenetag - windowed per-event dataset builder for synthesized sound scenes.
//!
//! Every annotated scene of an `openness/fold/split` batch is rendered,
//! decoded and cut into one fixed-length clip per foreground event. Each
//! clip is labelled with its own event plus every other event it overlaps,
//! and a manifest lists all clips of the batch.

#![warn(missing_docs)]

pub mod annotation;
pub mod audio;
pub mod cli;
pub mod clipper;
pub mod config;
pub mod constants;
pub mod error;
pub mod manifest;
pub mod output;
pub mod pipeline;
pub mod window;

use audio::{CommandSynthesizer, SymphoniaDecoder};
use clap::Parser;
use cli::{BuildArgs, Cli, Command, ConfigAction};
use clipper::WavWriter;
use config::{
    ClipWriteFailurePolicy, Config, DefaultsConfig, load_config, save_config_to, validate_config,
};
use output::{JsonSettings, write_manifest};
use pipeline::{BatchId, BatchOptions, Collaborators, DatasetLayout, run_batch};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub use error::{Error, Result};

/// Main entry point for the scenetag CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.build.verbose, cli.build.quiet);

    let config_path = cli.build.config.as_deref();

    if let Some(Command::Config { action }) = cli.command {
        return handle_config_command(action, config_path);
    }

    let config = load_config(config_path)?;
    build_dataset(&cli.build, config)
}

/// Initialize the tracing subscriber.
///
/// `RUST_LOG` takes precedence over the verbosity flags.
fn init_logging(verbose: u8, quiet: bool) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter_str = if quiet {
        "warn"
    } else {
        match verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter_str));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Handle config subcommands.
#[allow(clippy::print_stdout)]
fn handle_config_command(action: ConfigAction, explicit: Option<&Path>) -> Result<()> {
    let path = config::config_path(explicit)?;

    match action {
        ConfigAction::Init => {
            if path.exists() {
                println!("Configuration file already exists: {}", path.display());
            } else {
                let saved_path = save_config_to(&Config::default(), Some(&path))?;
                println!("Created configuration file: {}", saved_path.display());
            }
        }
        ConfigAction::Show => {
            let config = load_config(Some(&path))?;
            let rendered = toml::to_string_pretty(&config)
                .map_err(|e| Error::ConfigSerialize { source: e })?;
            println!("{rendered}");
        }
        ConfigAction::Path => println!("{}", path.display()),
    }
    Ok(())
}

/// Apply command-line overrides on top of configuration defaults.
pub fn resolve_defaults(args: &BuildArgs, defaults: &DefaultsConfig) -> Result<DefaultsConfig> {
    let mut resolved = defaults.clone();

    if let Some(sample_rate) = args.sample_rate {
        resolved.sample_rate = sample_rate;
    }
    if let Some(window_len) = args.window_len {
        resolved.window_len = window_len;
    }
    if let Some(duration) = args.duration {
        resolved.recording_duration = duration;
    }
    if let Some(format) = args.format {
        resolved.format = format;
    }
    if let Some(jobs) = args.jobs {
        resolved.jobs = usize::try_from(jobs).map_err(|_| Error::ConfigValidation {
            message: format!("jobs out of range: {jobs}"),
        })?;
    }
    if args.no_clips {
        resolved.generate_clips = false;
    }
    if args.keep_scene_audio {
        resolved.keep_scene_audio = true;
    }
    if args.drop_failed_clips {
        resolved.clip_write_failure = ClipWriteFailurePolicy::DropRow;
    }

    Ok(resolved)
}

fn required<T: Clone>(value: Option<&T>, name: &'static str) -> Result<T> {
    value.cloned().ok_or(Error::MissingArgument { name })
}

/// Build the manifest (and clips) of one batch.
fn build_dataset(args: &BuildArgs, mut config: Config) -> Result<()> {
    let dataset_root: PathBuf = required(args.dataset_root.as_ref(), "dataset-root")?;
    let batch = BatchId::new(
        required(args.openness.as_ref(), "openness")?,
        required(args.fold.as_ref(), "fold")?,
        required(args.split.as_ref(), "split")?,
    );

    config.defaults = resolve_defaults(args, &config.defaults)?;
    if let Some(timeout) = args.synth_timeout {
        config.synthesis.timeout_secs = Some(timeout);
    }
    validate_config(&config)?;
    let defaults = &config.defaults;

    let output_root = args.output_root.clone().unwrap_or_else(|| {
        DatasetLayout::default_output_root(&dataset_root, &config.output.dir_name)
    });
    let log_dir = args.log_dir.as_ref().or(config.output.log_dir.as_ref());
    let layout = DatasetLayout::derive(
        &dataset_root,
        &output_root,
        log_dir.map(PathBuf::as_path),
        batch,
    );

    info!(
        "Building {} (window {}s, duration {}s, {} Hz) into {}",
        layout.batch(),
        defaults.window_len,
        defaults.recording_duration,
        defaults.sample_rate,
        output_root.display()
    );

    let synthesizer = CommandSynthesizer::from_config(&config.synthesis);
    let mut options = BatchOptions::from_defaults(defaults);
    options.show_progress = !args.quiet && !args.no_progress;

    let report = run_batch(
        &layout,
        &options,
        Collaborators {
            synthesizer: &synthesizer,
            decoder: &SymphoniaDecoder,
            clip_sink: &WavWriter,
        },
    )?;

    let manifest_path = layout.manifest_path(defaults.format);
    write_manifest(
        &manifest_path,
        defaults.format,
        &layout.batch().to_string(),
        JsonSettings {
            window_len: defaults.window_len,
            recording_duration: defaults.recording_duration,
            sample_rate: defaults.sample_rate,
        },
        &report.manifest,
    )?;

    let summary = &report.summary;
    info!(
        "Done in {:.1}s: {} recordings, {} processed, {} skipped, {} rows",
        report.elapsed.as_secs_f64(),
        summary.recordings,
        summary.processed,
        summary.skipped,
        summary.rows
    );
    info!("Manifest: {}", manifest_path.display());
    if let Some(log) = &summary.failure_log {
        warn!(
            "{} skipped recordings and {} failed clips logged to {}",
            summary.skipped,
            summary.failed_clips,
            log.display()
        );
    }

    Ok(())
}
