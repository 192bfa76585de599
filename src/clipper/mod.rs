//! Clip materialization: slicing windows out of scene audio and
//! persisting them.

mod extractor;
mod writer;

pub use extractor::slice_window;
pub use writer::{ClipSink, WavWriter};
