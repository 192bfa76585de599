//! Dataset directory layout.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::config::ManifestFormat;
use crate::constants::layout::{
    ANNOTATION_DIR, AUDIO_DIR, AUDIO_EXTENSION, LOG_DIR, LOG_EXTENSION, MANIFEST_DIR,
};

/// One `openness/fold/split` partition of the dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchId {
    /// Openness partition, e.g. `open`.
    pub openness: String,
    /// Fold identifier, e.g. `fold0`.
    pub fold: String,
    /// Split name, e.g. `train`.
    pub split: String,
}

impl BatchId {
    /// Create a batch identifier.
    pub fn new(
        openness: impl Into<String>,
        fold: impl Into<String>,
        split: impl Into<String>,
    ) -> Self {
        Self {
            openness: openness.into(),
            fold: fold.into(),
            split: split.into(),
        }
    }

    /// Relative directory of this batch below a layout root.
    pub fn relative_dir(&self) -> PathBuf {
        Path::new(&self.openness).join(&self.fold).join(&self.split)
    }

    fn joined(&self, separator: &str) -> String {
        [self.openness.as_str(), self.fold.as_str(), self.split.as_str()].join(separator)
    }
}

impl fmt::Display for BatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.joined("/"))
    }
}

/// Every path a batch reads from or writes to.
#[derive(Debug, Clone)]
pub struct DatasetLayout {
    batch: BatchId,
    annotation_dir: PathBuf,
    scene_audio_dir: PathBuf,
    clip_dir: PathBuf,
    manifest_dir: PathBuf,
    log_dir: PathBuf,
}

impl DatasetLayout {
    /// Derive the layout of `batch`.
    ///
    /// `log_dir` defaults to `<output_root>/logs`.
    pub fn derive(
        dataset_root: &Path,
        output_root: &Path,
        log_dir: Option<&Path>,
        batch: BatchId,
    ) -> Self {
        let relative = batch.relative_dir();
        Self {
            annotation_dir: dataset_root.join(ANNOTATION_DIR).join(&relative),
            scene_audio_dir: dataset_root.join(AUDIO_DIR).join(&relative),
            clip_dir: output_root.join(AUDIO_DIR).join(&relative),
            manifest_dir: output_root.join(MANIFEST_DIR),
            log_dir: log_dir.map_or_else(|| output_root.join(LOG_DIR), Path::to_path_buf),
            batch,
        }
    }

    /// Default output root: a sibling of the dataset root named `dir_name`.
    pub fn default_output_root(dataset_root: &Path, dir_name: &str) -> PathBuf {
        dataset_root
            .parent()
            .map_or_else(|| PathBuf::from(dir_name), |parent| parent.join(dir_name))
    }

    /// The batch this layout belongs to.
    pub fn batch(&self) -> &BatchId {
        &self.batch
    }

    /// Directory holding the batch's annotation files.
    pub fn annotation_dir(&self) -> &Path {
        &self.annotation_dir
    }

    /// Directory clips are written to.
    pub fn clip_dir(&self) -> &Path {
        &self.clip_dir
    }

    /// Scene audio belonging to `annotation`.
    pub fn scene_audio_path(&self, annotation: &Path) -> PathBuf {
        let stem = recording_stem(annotation);
        self.scene_audio_dir.join(format!("{stem}.{AUDIO_EXTENSION}"))
    }

    /// Path of the clip with identifier `clip_id`.
    pub fn clip_path(&self, clip_id: &str) -> PathBuf {
        self.clip_dir.join(format!("{clip_id}.{AUDIO_EXTENSION}"))
    }

    /// Manifest path for `format`, e.g. `ann/open_fold0_train.csv`.
    pub fn manifest_path(&self, format: ManifestFormat) -> PathBuf {
        self.manifest_dir.join(format!("{}.{}", self.batch.joined("_"), format.extension()))
    }

    /// Failure log path, e.g. `logs/open.fold0.train.txt`.
    pub fn error_log_path(&self) -> PathBuf {
        self.log_dir.join(format!("{}.{LOG_EXTENSION}", self.batch.joined(".")))
    }
}

/// File stem of an annotation path, lossily converted.
pub fn recording_stem(annotation: &Path) -> String {
    annotation
        .file_stem()
        .map_or_else(String::new, |s| s.to_string_lossy().into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> DatasetLayout {
        DatasetLayout::derive(
            Path::new("/data/synthetic"),
            Path::new("/data/tag-new"),
            None,
            BatchId::new("open", "fold0", "train"),
        )
    }

    #[test]
    fn test_batch_display() {
        assert_eq!(BatchId::new("open", "fold1", "val").to_string(), "open/fold1/val");
    }

    #[test]
    fn test_annotation_and_scene_audio_paths() {
        let layout = layout();
        assert_eq!(
            layout.annotation_dir(),
            Path::new("/data/synthetic/jams/open/fold0/train")
        );
        assert_eq!(
            layout.scene_audio_path(Path::new("/data/synthetic/jams/open/fold0/train/s_3.jams")),
            PathBuf::from("/data/synthetic/audio/open/fold0/train/s_3.wav")
        );
    }

    #[test]
    fn test_output_paths() {
        let layout = layout();
        assert_eq!(
            layout.clip_path("s_3_2"),
            PathBuf::from("/data/tag-new/audio/open/fold0/train/s_3_2.wav")
        );
        assert_eq!(
            layout.manifest_path(ManifestFormat::Csv),
            PathBuf::from("/data/tag-new/ann/open_fold0_train.csv")
        );
        assert_eq!(
            layout.manifest_path(ManifestFormat::Json),
            PathBuf::from("/data/tag-new/ann/open_fold0_train.json")
        );
        assert_eq!(
            layout.error_log_path(),
            PathBuf::from("/data/tag-new/logs/open.fold0.train.txt")
        );
    }

    #[test]
    fn test_explicit_log_dir() {
        let layout = DatasetLayout::derive(
            Path::new("/r"),
            Path::new("/o"),
            Some(Path::new("/var/log/scenetag")),
            BatchId::new("a", "b", "c"),
        );
        assert_eq!(
            layout.error_log_path(),
            PathBuf::from("/var/log/scenetag/a.b.c.txt")
        );
    }

    #[test]
    fn test_default_output_root_is_sibling() {
        assert_eq!(
            DatasetLayout::default_output_root(Path::new("/data/synthetic"), "tag-new"),
            PathBuf::from("/data/tag-new")
        );
    }
}
