//! Single recording processing.

use std::path::Path;

use tracing::debug;

use crate::annotation::Recording;
use crate::audio::{SceneDecoder, SceneSynthesizer};
use crate::clipper::{ClipSink, slice_window};
use crate::config::ClipWriteFailurePolicy;
use crate::error::Error;
use crate::manifest::{ManifestRow, accumulate, clip_id};
use crate::pipeline::batch::BatchOptions;
use crate::pipeline::failure_log::{FailureKind, FailureLog, RecordingFailure};
use crate::pipeline::layout::{DatasetLayout, recording_stem};
use crate::window::window_recording;

/// Everything a worker needs to process one recording.
#[derive(Clone, Copy)]
pub struct RecordingContext<'a> {
    /// Paths of the batch.
    pub layout: &'a DatasetLayout,
    /// Build settings.
    pub options: &'a BatchOptions,
    /// Renders missing scene audio.
    pub synthesizer: &'a dyn SceneSynthesizer,
    /// Loads scene audio.
    pub decoder: &'a dyn SceneDecoder,
    /// Persists clips.
    pub clip_sink: &'a dyn ClipSink,
    /// Shared failure log.
    pub failures: &'a FailureLog,
}

/// Result of processing one recording.
#[derive(Debug)]
pub enum RecordingOutcome {
    /// Windows were extracted.
    Processed {
        /// Manifest rows in event order.
        rows: Vec<ManifestRow>,
        /// Clips that could not be written.
        failed_clips: usize,
    },
    /// The recording was skipped at the given stage.
    Skipped(FailureKind),
}

/// Process one annotation file into manifest rows.
///
/// Recording-level failures are logged and reported as
/// [`RecordingOutcome::Skipped`]; they never propagate.
pub fn process_recording(annotation: &Path, ctx: &RecordingContext<'_>) -> RecordingOutcome {
    match extract_rows(annotation, ctx) {
        Ok((rows, failed_clips)) => {
            debug!(
                "{}: {} windows, {} failed clips",
                annotation.display(),
                rows.len(),
                failed_clips
            );
            RecordingOutcome::Processed { rows, failed_clips }
        }
        Err(failure) => {
            let kind = failure.kind;
            record_failure(ctx.failures, &failure);
            RecordingOutcome::Skipped(kind)
        }
    }
}

fn extract_rows(
    annotation: &Path,
    ctx: &RecordingContext<'_>,
) -> Result<(Vec<ManifestRow>, usize), RecordingFailure> {
    let options = ctx.options;

    let recording = Recording::load(annotation, options.recording_duration)
        .map_err(|e| RecordingFailure::new(FailureKind::Annotation, annotation, e))?;

    let audio_path = ctx.layout.scene_audio_path(annotation);
    if !audio_path.exists() {
        debug!("Synthesizing missing scene audio: {}", audio_path.display());
        ctx.synthesizer
            .synthesize(annotation, &audio_path)
            .map_err(|e| RecordingFailure::new(FailureKind::Synthesis, &audio_path, e))?;
    }

    let audio = ctx
        .decoder
        .decode(&audio_path, options.sample_rate)
        .map_err(|e| RecordingFailure::new(FailureKind::Decode, &audio_path, e))?;

    if !options.keep_scene_audio {
        std::fs::remove_file(&audio_path).map_err(|source| {
            RecordingFailure::new(
                FailureKind::Deletion,
                &audio_path,
                Error::SceneAudioDelete {
                    path: audio_path.clone(),
                    source,
                },
            )
        })?;
    }

    let stem = recording_stem(annotation);
    let windows = window_recording(&recording, options.window_len);
    let mut rows = Vec::with_capacity(windows.len());
    let mut failed_clips = 0;

    for event_window in windows {
        let id = clip_id(&stem, event_window.index + 1);
        let path = ctx.layout.clip_path(&id);

        if options.generate_clips {
            let samples = slice_window(&audio.samples, &event_window.window, audio.sample_rate);
            if let Err(e) = ctx.clip_sink.write_clip(&path, samples, audio.sample_rate) {
                failed_clips += 1;
                record_failure(
                    ctx.failures,
                    &RecordingFailure::new(FailureKind::ClipWrite, &path, e),
                );
                if options.clip_write_failure == ClipWriteFailurePolicy::DropRow {
                    continue;
                }
            }
        }

        rows.push(accumulate(
            &recording.id,
            id,
            path,
            &event_window.window,
            event_window.labels,
        ));
    }

    Ok((rows, failed_clips))
}

fn record_failure(log: &FailureLog, failure: &RecordingFailure) {
    if let Err(e) = log.record(failure) {
        tracing::error!(
            "Failed to append to failure log {}: {}",
            log.path().display(),
            e
        );
    }
}
