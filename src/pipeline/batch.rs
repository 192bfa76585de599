//! Batch coordination over every recording of a split.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use rayon::prelude::*;
use tracing::{debug, info};

use crate::annotation::collect_annotation_files;
use crate::audio::{SceneDecoder, SceneSynthesizer};
use crate::clipper::ClipSink;
use crate::config::{ClipWriteFailurePolicy, DefaultsConfig};
use crate::error::{Error, Result};
use crate::manifest::Manifest;
use crate::output::progress;
use crate::pipeline::failure_log::FailureLog;
use crate::pipeline::layout::DatasetLayout;
use crate::pipeline::processor::{RecordingContext, RecordingOutcome, process_recording};

/// Settings of one batch run.
#[derive(Debug, Clone)]
pub struct BatchOptions {
    /// Clip sample rate in Hz.
    pub sample_rate: u32,
    /// Window length in seconds.
    pub window_len: f64,
    /// Duration of every recording in seconds.
    pub recording_duration: f64,
    /// Write a clip per window.
    pub generate_clips: bool,
    /// Keep scene audio after decoding.
    pub keep_scene_audio: bool,
    /// Handling of rows whose clip failed to write.
    pub clip_write_failure: ClipWriteFailurePolicy,
    /// Recordings processed concurrently.
    pub jobs: usize,
    /// Show a progress bar.
    pub show_progress: bool,
}

impl BatchOptions {
    /// Options taken from configuration defaults, with progress disabled.
    pub fn from_defaults(defaults: &DefaultsConfig) -> Self {
        Self {
            sample_rate: defaults.sample_rate,
            window_len: defaults.window_len,
            recording_duration: defaults.recording_duration,
            generate_clips: defaults.generate_clips,
            keep_scene_audio: defaults.keep_scene_audio,
            clip_write_failure: defaults.clip_write_failure,
            jobs: defaults.jobs,
            show_progress: false,
        }
    }
}

/// External collaborators used by a batch.
#[derive(Clone, Copy)]
pub struct Collaborators<'a> {
    /// Renders missing scene audio.
    pub synthesizer: &'a dyn SceneSynthesizer,
    /// Loads scene audio.
    pub decoder: &'a dyn SceneDecoder,
    /// Persists clips.
    pub clip_sink: &'a dyn ClipSink,
}

/// Counters of a finished batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    /// Annotation files found.
    pub recordings: usize,
    /// Recordings that produced rows.
    pub processed: usize,
    /// Recordings skipped after a failure.
    pub skipped: usize,
    /// Manifest rows.
    pub rows: usize,
    /// Clips that could not be written.
    pub failed_clips: usize,
    /// Failure log, if anything was logged.
    pub failure_log: Option<PathBuf>,
}

/// Manifest and counters of a finished batch.
#[derive(Debug)]
pub struct BatchReport {
    /// Rows in recording order, then event order.
    pub manifest: Manifest,
    /// Counters.
    pub summary: BatchSummary,
    /// Wall-clock time.
    pub elapsed: Duration,
}

/// Process every annotation file of the batch described by `layout`.
///
/// Recording failures are logged and skipped. Only batch-level problems
/// (missing annotation directory, unwritable clip directory, worker pool
/// creation) are returned as errors.
pub fn run_batch(
    layout: &DatasetLayout,
    options: &BatchOptions,
    collaborators: Collaborators<'_>,
) -> Result<BatchReport> {
    let started = Instant::now();
    let files = collect_annotation_files(layout.annotation_dir())?;
    info!(
        "Batch {}: {} annotation files in {}",
        layout.batch(),
        files.len(),
        layout.annotation_dir().display()
    );

    if options.generate_clips {
        std::fs::create_dir_all(layout.clip_dir()).map_err(|e| Error::OutputDirCreateFailed {
            path: layout.clip_dir().to_path_buf(),
            source: e,
        })?;
    }

    let failures = FailureLog::new(layout.error_log_path());
    let ctx = RecordingContext {
        layout,
        options,
        synthesizer: collaborators.synthesizer,
        decoder: collaborators.decoder,
        clip_sink: collaborators.clip_sink,
        failures: &failures,
    };

    let pb = progress::create_recording_progress(files.len(), options.show_progress);
    let process = |file: &PathBuf| {
        let outcome = process_recording(file, &ctx);
        progress::inc_progress(pb.as_ref());
        outcome
    };

    let outcomes: Vec<RecordingOutcome> = if options.jobs > 1 {
        debug!("Processing with {} workers", options.jobs);
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(options.jobs)
            .build()
            .map_err(|e| Error::WorkerPool {
                reason: e.to_string(),
            })?;
        // Indexed collect keeps listing order regardless of completion order.
        pool.install(|| files.par_iter().map(process).collect())
    } else {
        files.iter().map(process).collect()
    };

    let mut manifest = Manifest::new();
    let mut summary = BatchSummary {
        recordings: files.len(),
        ..BatchSummary::default()
    };

    for outcome in outcomes {
        match outcome {
            RecordingOutcome::Processed { rows, failed_clips } => {
                summary.processed += 1;
                summary.failed_clips += failed_clips;
                manifest.extend(rows);
            }
            RecordingOutcome::Skipped(_) => summary.skipped += 1,
        }
    }
    summary.rows = manifest.len();
    if failures.entries() > 0 {
        summary.failure_log = Some(failures.path().to_path_buf());
    }

    progress::finish_progress(
        pb,
        &format!("{} rows from {} recordings", summary.rows, summary.processed),
    );

    Ok(BatchReport {
        manifest,
        summary,
        elapsed: started.elapsed(),
    })
}
