//! Overlap resolution between a window and the events of its recording.

use serde::Serialize;

use super::Window;
use crate::annotation::Event;

/// Labels of one window: the target event's label first, then the labels of
/// overlapping events in event order. Duplicates are kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct LabelSet(Vec<String>);

impl LabelSet {
    /// Start a label set with the target event's label.
    pub fn new(target: impl Into<String>) -> Self {
        Self(vec![target.into()])
    }

    /// The target event's label.
    pub fn target(&self) -> &str {
        &self.0[0]
    }

    /// All labels, target first.
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Number of labels, at least one.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; a label set holds at least the target label.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the labels, target first.
    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }

    fn push(&mut self, label: String) {
        self.0.push(label);
    }
}

impl<'a> IntoIterator for &'a LabelSet {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Whether `event` overlaps `window`.
///
/// All comparisons are strict: an event edge lying exactly on a window
/// boundary does not count, and an event spanning exactly the window does
/// not count either. An event strictly containing the window counts.
pub fn overlaps(window: &Window, event: &Event) -> bool {
    let starts_inside = window.start < event.start && event.start < window.end;
    let ends_inside = window.start < event.end && event.end < window.end;
    let contains = event.start < window.start && event.end > window.end;
    starts_inside || ends_inside || contains
}

/// Build the label set of the window derived for `events[target_index]`.
///
/// # Panics
///
/// Panics if `target_index` is out of bounds.
pub fn resolve_overlaps(target_index: usize, events: &[Event], window: &Window) -> LabelSet {
    let mut labels = LabelSet::new(events[target_index].label.clone());

    for (j, other) in events.iter().enumerate() {
        if j != target_index && overlaps(window, other) {
            labels.push(other.label.clone());
        }
    }

    labels
}
