//! End-to-end tests of the scenetag binary.

#![allow(clippy::unwrap_used)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

const SCENE: &str = r#"{"annotations": [{"namespace": "scaper", "data": [
  {"time": 0.0, "duration": 10.0, "value": {"label": "park", "role": "background"}},
  {"time": 2.0, "duration": 1.0, "value": {"label": "A", "role": "foreground"}},
  {"time": 2.4, "duration": 0.4, "value": {"label": "B", "role": "foreground"}},
  {"time": 8.7, "duration": 0.8, "value": {"label": "C", "role": "foreground"}}
]}]}"#;

fn write_scene_wav(path: &Path) {
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: 16_000,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(path, spec).unwrap();
    for i in 0..16_000 * 10 {
        #[allow(clippy::cast_possible_truncation)]
        writer.write_sample(((i % 200) * 100 - 10_000) as i16).unwrap();
    }
    writer.finalize().unwrap();
}

/// Dataset with one rendered scene and one broken annotation.
fn dataset() -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let root = dir.path().join("synthetic");
    let jams = root.join("jams/high/fold1/train");
    std::fs::create_dir_all(&jams).unwrap();
    std::fs::write(jams.join("scene.jams"), SCENE).unwrap();
    std::fs::write(jams.join("zz_broken.jams"), "{").unwrap();
    write_scene_wav(&root.join("audio/high/fold1/train/scene.wav"));
    (dir, root)
}

fn scenetag(dir: &Path) -> Command {
    let mut cmd = Command::new(cargo_bin("scenetag"));
    cmd.env_remove("RUST_LOG")
        .arg("--config")
        .arg(dir.join("missing-config.toml"));
    cmd
}

#[test]
fn test_help_lists_batch_flags() {
    Command::new(cargo_bin("scenetag"))
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--dataset-root"))
        .stdout(predicate::str::contains("--window-len"))
        .stdout(predicate::str::contains("--drop-failed-clips"));
}

#[test]
fn test_config_path_prints_override() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("custom.toml");
    Command::new(cargo_bin("scenetag"))
        .args(["config", "path", "--config"])
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("custom.toml"));
}

#[test]
fn test_config_init_writes_defaults() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("scenetag.toml");
    Command::new(cargo_bin("scenetag"))
        .args(["config", "init", "--config"])
        .arg(&config)
        .assert()
        .success();

    let text = std::fs::read_to_string(&config).unwrap();
    assert!(text.contains("[defaults]"));
    assert!(text.contains("window_len = 1.0"));
    assert!(text.contains("dir_name = \"tag-new\""));
}

#[test]
fn test_missing_batch_arguments_fail() {
    let dir = TempDir::new().unwrap();
    scenetag(dir.path())
        .args(["--dataset-root", "/nonexistent", "--openness", "high"])
        .env_remove("SCENETAG_FOLD")
        .env_remove("SCENETAG_SPLIT")
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing required argument --fold"));
}

#[test]
fn test_build_batch_writes_manifest_clips_and_failure_log() {
    let (dir, root) = dataset();
    let out = dir.path().join("tag-new");

    scenetag(dir.path())
        .arg("--dataset-root")
        .arg(&root)
        .args(["--openness", "high", "--fold", "fold1", "--split", "train"])
        .args(["--keep-scene-audio", "--no-progress", "-q"])
        .assert()
        .success();

    let manifest = std::fs::read_to_string(out.join("ann/high_fold1_train.csv")).unwrap();
    let lines: Vec<&str> = manifest.lines().collect();
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[0], ",file_name,source_file,start_time,label");

    let clip_dir = out.join("audio/high/fold1/train");
    let first_clip = clip_dir.join("scene_1.wav");
    assert_eq!(
        lines[1],
        format!(
            "0,{},scene.jams,2.0,\"['A', 'B']\"",
            first_clip.display()
        )
    );
    assert!(lines[2].starts_with("1,"));
    assert!(lines[2].ends_with("\"['B', 'A']\""));
    assert!(lines[3].starts_with("2,"));
    assert!(lines[3].ends_with(",['C']"));

    for n in 1..=3 {
        let clip = clip_dir.join(format!("scene_{n}.wav"));
        let reader = hound::WavReader::open(&clip).unwrap();
        assert_eq!(reader.spec().sample_rate, 16_000);
        assert_eq!(reader.len(), 16_000);
    }

    assert!(root.join("audio/high/fold1/train/scene.wav").exists());

    let log = std::fs::read_to_string(out.join("logs/high.fold1.train.txt")).unwrap();
    assert_eq!(log.lines().count(), 1);
    assert!(log.starts_with("Annotation:"));
    assert!(log.trim_end().ends_with("zz_broken.jams"));
}

#[test]
fn test_build_batch_json_manifest_without_clips() {
    let (dir, root) = dataset();
    let out = dir.path().join("elsewhere");

    scenetag(dir.path())
        .arg("--dataset-root")
        .arg(&root)
        .arg("--output-root")
        .arg(&out)
        .args(["--openness", "high", "--fold", "fold1", "--split", "train"])
        .args(["--format", "json", "--no-clips", "--no-progress", "-q"])
        .assert()
        .success();

    let text = std::fs::read_to_string(out.join("ann/high_fold1_train.json")).unwrap();
    let document: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(document["batch"], "high/fold1/train");
    assert_eq!(document["rows"].as_array().unwrap().len(), 3);
    assert_eq!(document["rows"][0]["labels"], serde_json::json!(["A", "B"]));
    assert_eq!(document["summary"]["total_rows"], 3);

    assert!(!out.join("audio").exists());
    // Scene audio is removed once decoded.
    assert!(!root.join("audio/high/fold1/train/scene.wav").exists());
}

#[test]
fn test_missing_batch_directory_fails() {
    let (dir, root) = dataset();
    scenetag(dir.path())
        .arg("--dataset-root")
        .arg(&root)
        .args(["--openness", "mid", "--fold", "fold1", "--split", "train"])
        .args(["--no-progress", "-q"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("annotation directory does not exist"));
}
