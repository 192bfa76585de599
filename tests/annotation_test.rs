//! Tests for loading recordings from JAMS files.

#![allow(clippy::unwrap_used, clippy::float_cmp)]

use scenetag::annotation::Recording;
use scenetag::error::Error;
use tempfile::TempDir;

const SCENE: &str = r#"{
  "annotations": [
    {
      "namespace": "tag_open",
      "data": [{"time": 0.0, "duration": 1.0, "value": "ignored", "confidence": null}]
    },
    {
      "namespace": "scaper",
      "data": [
        {"time": 0.0, "duration": 10.0, "confidence": 1,
         "value": {"label": "park", "source_file": "bg/park.wav", "role": "background",
                   "pitch_shift": null, "time_stretch": null, "snr": 0}},
        {"time": 2.0, "duration": 1.0, "confidence": 1,
         "value": {"label": "dog_bark", "source_file": "fg/dog.wav", "role": "foreground",
                   "pitch_shift": 1.2, "time_stretch": null, "snr": 6.5}},
        {"time": 2.4, "duration": 0.4, "confidence": 1,
         "value": {"label": "car_horn", "source_file": "fg/car.wav", "role": "foreground",
                   "pitch_shift": null, "time_stretch": 1.1, "snr": 3}}
      ],
      "sandbox": {"scaper": {"duration": 10.0}}
    }
  ],
  "file_metadata": {"duration": 10.0, "jams_version": "0.3.4"},
  "sandbox": {}
}"#;

#[test]
fn test_recording_skips_background_and_foreign_namespaces() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("soundscape_1.jams");
    std::fs::write(&path, SCENE).unwrap();

    let recording = Recording::load(&path, 10.0).unwrap();
    assert_eq!(recording.id, "soundscape_1.jams");
    assert_eq!(recording.duration, 10.0);
    assert_eq!(recording.events.len(), 2);
    assert_eq!(recording.events[0].label, "dog_bark");
    assert_eq!(recording.events[0].start, 2.0);
    assert_eq!(recording.events[0].end, 3.0);
    assert_eq!(recording.events[1].label, "car_horn");
}

#[test]
fn test_recording_without_scaper_annotation_is_malformed() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("x.jams");
    std::fs::write(&path, r#"{"annotations": []}"#).unwrap();

    let err = Recording::load(&path, 10.0).unwrap_err();
    assert!(matches!(err, Error::MalformedAnnotation { .. }));
}
