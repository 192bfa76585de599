//! Event windowing and label overlap.
//!
//! Every event of a recording gets a fixed-length window centred on its
//! midpoint. The window's label set is the event's own label followed by
//! the labels of every other event overlapping the window.

mod derive;
mod overlap;

use std::ops::Range;

pub use derive::derive_window;
pub use overlap::{LabelSet, overlaps, resolve_overlaps};

use crate::annotation::Recording;

/// A time span cut out of a recording.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Window {
    /// Start time in seconds.
    pub start: f64,
    /// End time in seconds.
    pub end: f64,
}

impl Window {
    /// Window length in seconds.
    pub fn len(&self) -> f64 {
        self.end - self.start
    }

    /// Sample index range of this window at `sample_rate`.
    ///
    /// The start index truncates toward zero; the length is the window
    /// length in samples, rounded. The range is not clipped to any buffer.
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    pub fn sample_range(&self, sample_rate: u32) -> Range<usize> {
        let rate = f64::from(sample_rate);
        let start = (self.start * rate) as usize;
        let len = (self.len() * rate).round() as usize;
        start..start + len
    }
}

/// A derived window for one event of a recording.
#[derive(Debug, Clone)]
pub struct EventWindow {
    /// Zero-based index of the event in the recording.
    pub index: usize,
    /// The window.
    pub window: Window,
    /// Target label first, then overlapping labels.
    pub labels: LabelSet,
}

/// Derive windows and label sets for every event of a recording, in event order.
pub fn window_recording(recording: &Recording, window_len: f64) -> Vec<EventWindow> {
    recording
        .events
        .iter()
        .enumerate()
        .map(|(index, event)| {
            let window = derive_window(event, recording.duration, window_len);
            let labels = resolve_overlaps(index, &recording.events, &window);
            EventWindow {
                index,
                window,
                labels,
            }
        })
        .collect()
}
