//! Scene annotations.
//!
//! Reads scaper annotations from JAMS documents and turns them into the
//! ordered event list of a recording.

mod events;
mod jams;

pub use events::{Event, Recording, extract_events};
pub use jams::{Observation, ObservationValue, collect_annotation_files, load_annotation_file};
