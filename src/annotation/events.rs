//! Event extraction from scaper observations.

use std::path::Path;

use tracing::warn;

use super::{Observation, load_annotation_file};
use crate::constants::annotation::BACKGROUND_ROLE;
use crate::error::{Error, Result};

/// A labelled sound event inside a recording.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    /// Event label.
    pub label: String,
    /// Onset in seconds.
    pub start: f64,
    /// Offset in seconds (onset + duration).
    pub end: f64,
}

impl Event {
    /// Create an event.
    pub fn new(label: impl Into<String>, start: f64, end: f64) -> Self {
        Self {
            label: label.into(),
            start,
            end,
        }
    }

    /// Time halfway between onset and offset.
    pub fn midpoint(&self) -> f64 {
        (self.start + self.end) / 2.0
    }
}

/// One annotated scene with its foreground events.
#[derive(Debug, Clone)]
pub struct Recording {
    /// Annotation file name, e.g. `soundscape_3.jams`.
    pub id: String,
    /// Recording duration in seconds.
    pub duration: f64,
    /// Events in annotation order, background excluded.
    pub events: Vec<Event>,
}

impl Recording {
    /// Load a recording from its annotation file.
    pub fn load(path: &Path, duration: f64) -> Result<Self> {
        let observations = load_annotation_file(path)?;
        let events = extract_events(path, &observations)?;
        let id = path
            .file_name()
            .map_or_else(String::new, |n| n.to_string_lossy().into_owned());

        Ok(Self {
            id,
            duration,
            events,
        })
    }
}

/// Turn scaper observations into events, dropping the background entry.
///
/// The first observation of every scaper annotation is the background
/// sentinel. It is dropped by position; a first entry whose role says
/// otherwise is reported but still dropped.
///
/// # Errors
///
/// Returns [`Error::MalformedAnnotation`] if there are no observations at
/// all, or if an event has no label or an invalid time span.
pub fn extract_events(source: &Path, observations: &[Observation]) -> Result<Vec<Event>> {
    let Some((background, rest)) = observations.split_first() else {
        return Err(malformed(source, "annotation has no background entry".to_string()));
    };

    if let Some(role) = background.value.role.as_deref()
        && role != BACKGROUND_ROLE
    {
        warn!(
            path = %source.display(),
            role,
            "first observation is not a background entry; dropping it anyway"
        );
    }

    rest.iter()
        .enumerate()
        .map(|(i, obs)| {
            let label = obs
                .value
                .label
                .clone()
                .ok_or_else(|| malformed(source, format!("event {} has no label", i + 1)))?;

            if !obs.time.is_finite() || obs.time < 0.0 {
                return Err(malformed(
                    source,
                    format!("event {} has invalid onset {}", i + 1, obs.time),
                ));
            }
            if !obs.duration.is_finite() || obs.duration <= 0.0 {
                return Err(malformed(
                    source,
                    format!("event {} has invalid duration {}", i + 1, obs.duration),
                ));
            }

            Ok(Event::new(label, obs.time, obs.time + obs.duration))
        })
        .collect()
}

fn malformed(source: &Path, message: String) -> Error {
    Error::MalformedAnnotation {
        path: source.to_path_buf(),
        message,
    }
}
