//! Batch processing pipeline.
//!
//! A batch walks the annotation files of one split, turns every recording
//! into manifest rows and keeps going past recording-level failures.

mod batch;
mod failure_log;
mod layout;
mod processor;

pub use crate::audio::{SceneDecoder, SceneSynthesizer};
pub use crate::clipper::ClipSink;
pub use batch::{BatchOptions, BatchReport, BatchSummary, Collaborators, run_batch};
pub use failure_log::{FailureKind, FailureLog, RecordingFailure};
pub use layout::{BatchId, DatasetLayout, recording_stem};
pub use processor::{RecordingContext, RecordingOutcome, process_recording};
