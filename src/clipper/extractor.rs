//! Window slicing of decoded scene audio.

use crate::window::Window;

/// Samples of `window` within `samples` recorded at `sample_rate`.
///
/// The slice starts at `floor(start * rate)` and spans the window length in
/// samples. It is cut short where the buffer ends, so a scene decoded
/// slightly shorter than its nominal duration still yields a clip.
pub fn slice_window<'a>(samples: &'a [f32], window: &Window, sample_rate: u32) -> &'a [f32] {
    let range = window.sample_range(sample_rate);
    let start = range.start.min(samples.len());
    let end = range.end.min(samples.len());
    &samples[start..end]
}
