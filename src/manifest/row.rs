//! Manifest rows.

use std::path::PathBuf;

use serde::Serialize;

use crate::window::{LabelSet, Window};

/// One extracted window.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ManifestRow {
    /// `<recording stem>_<event number>`.
    pub clip_id: String,
    /// Where the clip is (or would have been) written.
    pub clip_path: PathBuf,
    /// Annotation file name of the source recording.
    pub recording_id: String,
    /// Window start in seconds.
    pub window_start: f64,
    /// Target label first, then overlapping labels.
    pub labels: LabelSet,
}

/// Clip identifier for the `event_number`-th (1-based) event of a recording.
pub fn clip_id(recording_stem: &str, event_number: usize) -> String {
    format!("{recording_stem}_{event_number}")
}

/// Build the manifest row of one window.
pub fn accumulate(
    recording_id: &str,
    clip_id: String,
    clip_path: PathBuf,
    window: &Window,
    labels: LabelSet,
) -> ManifestRow {
    ManifestRow {
        clip_id,
        clip_path,
        recording_id: recording_id.to_string(),
        window_start: window.start,
        labels,
    }
}
