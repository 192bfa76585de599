//! JAMS annotation file parsing.
//!
//! Only the parts of a JAMS document scenetag needs are modelled: the list
//! of annotations, their namespace and their observations. Everything else
//! (file metadata, sandbox, scaper-specific value fields) is ignored.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::constants::annotation::{EXTENSION, SCAPER_NAMESPACE};
use crate::error::{Error, Result};

#[derive(Debug, Deserialize)]
struct JamsDocument {
    #[serde(default)]
    annotations: Vec<JamsAnnotation>,
}

/// Observations stay untyped until the namespace is known; other
/// namespaces use value shapes scaper's do not.
#[derive(Debug, Deserialize)]
struct JamsAnnotation {
    namespace: String,
    #[serde(default)]
    data: serde_json::Value,
}

/// One timed observation of a scaper annotation.
#[derive(Debug, Clone, Deserialize)]
pub struct Observation {
    /// Onset in seconds.
    pub time: f64,
    /// Duration in seconds.
    pub duration: f64,
    /// Scaper event description.
    #[serde(default)]
    pub value: ObservationValue,
}

/// The scaper fields of an observation value that matter here.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ObservationValue {
    /// Event label.
    #[serde(default)]
    pub label: Option<String>,
    /// `background` or `foreground`.
    #[serde(default)]
    pub role: Option<String>,
}

/// Load the scaper observations of a JAMS file, in file order.
///
/// # Errors
///
/// Returns [`Error::AnnotationRead`] if the file cannot be read,
/// [`Error::AnnotationParse`] if it is not a JAMS document and
/// [`Error::MalformedAnnotation`] if it has no scaper annotation.
pub fn load_annotation_file(path: &Path) -> Result<Vec<Observation>> {
    let contents = std::fs::read_to_string(path).map_err(|e| Error::AnnotationRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    let document: JamsDocument =
        serde_json::from_str(&contents).map_err(|e| Error::AnnotationParse {
            path: path.to_path_buf(),
            source: e,
        })?;

    let annotation = document
        .annotations
        .into_iter()
        .find(|a| a.namespace == SCAPER_NAMESPACE)
        .ok_or_else(|| Error::MalformedAnnotation {
            path: path.to_path_buf(),
            message: format!("no '{SCAPER_NAMESPACE}' annotation"),
        })?;

    if annotation.data.is_null() {
        return Ok(Vec::new());
    }
    serde_json::from_value(annotation.data).map_err(|e| Error::AnnotationParse {
        path: path.to_path_buf(),
        source: e,
    })
}

/// List the annotation files of a batch directory, sorted by file name.
///
/// Sorting keeps manifests identical across filesystems whose directory
/// listing order differs.
pub fn collect_annotation_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(Error::AnnotationDirNotFound {
            path: dir.to_path_buf(),
        });
    }

    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && is_annotation_file(&path) {
            files.push(path);
        }
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

fn is_annotation_file(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case(EXTENSION))
}
