//! Window derivation with boundary clamping.

use super::Window;
use crate::annotation::Event;

/// Derive the window of `window_len` seconds centred on `event`.
///
/// A window that would start before zero is moved to start at zero. A
/// window reaching or passing `recording_duration` is moved back by its
/// overshoot so that it ends exactly at the recording end.
///
/// Recordings shorter than `window_len` are not supported; the config
/// layer rejects them.
pub fn derive_window(event: &Event, recording_duration: f64, window_len: f64) -> Window {
    let midpoint = event.midpoint();
    let mut start = midpoint - window_len / 2.0;

    if start < 0.0 {
        start = 0.0;
    } else if start + window_len >= recording_duration {
        let overshoot = (start + window_len) - recording_duration;
        start -= overshoot;
    }

    Window {
        start,
        end: start + window_len,
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_centred_window() {
        let window = derive_window(&Event::new("A", 2.0, 3.0), 10.0, 1.0);
        assert_eq!(window.start, 2.0);
        assert_eq!(window.end, 3.0);
    }

    #[test]
    fn test_clamped_at_start() {
        let window = derive_window(&Event::new("A", 0.3, 0.5), 10.0, 1.0);
        assert_eq!(window.start, 0.0);
        assert_eq!(window.end, 1.0);
    }

    #[test]
    fn test_window_ending_exactly_at_duration_is_unchanged() {
        // midpoint 9.5, start 9.0, start + 1.0 == 10.0 triggers a zero shift
        let window = derive_window(&Event::new("A", 9.4, 9.6), 10.0, 1.0);
        assert!((window.start - 9.0).abs() < EPS);
        assert!((window.end - 10.0).abs() < EPS);
    }

    #[test]
    fn test_clamped_at_end() {
        // midpoint 9.85, raw start 9.35 overshoots by 0.35
        let window = derive_window(&Event::new("A", 9.8, 9.9), 10.0, 1.0);
        assert!((window.start - 9.0).abs() < EPS);
        assert!((window.end - 10.0).abs() < EPS);
    }

    #[test]
    fn test_near_end_without_overshoot() {
        // midpoint 9.1, start 8.6, 9.6 < 10
        let window = derive_window(&Event::new("C", 8.7, 9.5), 10.0, 1.0);
        assert!((window.start - 8.6).abs() < EPS);
        assert!((window.end - 9.6).abs() < EPS);
    }

    #[test]
    fn test_custom_window_len() {
        let window = derive_window(&Event::new("A", 4.0, 6.0), 10.0, 3.0);
        assert_eq!(window.start, 3.5);
        assert_eq!(window.end, 6.5);
    }

    #[test]
    fn test_window_always_in_bounds() {
        let duration: f64 = 10.0;
        let mut onset: f64 = 0.0;
        while onset < duration {
            for len in [0.05, 0.5, 1.0, 3.0] {
                let end = (onset + len).min(duration);
                if end <= onset {
                    continue;
                }
                let window = derive_window(&Event::new("x", onset, end), duration, 1.0);
                assert!(window.start >= 0.0, "start {} for {onset}", window.start);
                assert!(
                    window.end <= duration + EPS,
                    "end {} for {onset}",
                    window.end
                );
                assert!((window.len() - 1.0).abs() < EPS);
            }
            onset += 0.05;
        }
    }
}
