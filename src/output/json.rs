//! JSON manifest writer.

use crate::error::{Error, Result};
use crate::manifest::ManifestRow;
use crate::output::ManifestWriter;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// JSON manifest file structure.
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonManifestFile {
    /// Batch identifier, `openness/fold/split`.
    pub batch: String,
    /// Generation timestamp.
    pub generated_at: DateTime<Utc>,
    /// Windowing settings.
    pub settings: JsonSettings,
    /// One entry per extracted window.
    pub rows: Vec<JsonRow>,
    /// Summary statistics.
    pub summary: JsonSummary,
}

/// Windowing settings recorded in the manifest.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct JsonSettings {
    /// Window length in seconds.
    pub window_len: f64,
    /// Recording duration in seconds.
    pub recording_duration: f64,
    /// Clip sample rate in Hz.
    pub sample_rate: u32,
}

/// Single manifest row in JSON format.
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonRow {
    /// Row position in the manifest.
    pub index: usize,
    /// Clip identifier.
    pub clip_id: String,
    /// Clip file path.
    pub file_name: PathBuf,
    /// Source annotation file name.
    pub source_file: String,
    /// Window start in seconds.
    pub start_time: f64,
    /// Target label first, then overlapping labels.
    pub labels: Vec<String>,
}

/// Summary statistics.
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonSummary {
    /// Total number of rows.
    pub total_rows: usize,
    /// Number of distinct source recordings.
    pub recordings: usize,
    /// Number of distinct target labels.
    pub unique_labels: usize,
}

/// Writer for JSON manifests.
///
/// Rows are buffered and the document is written at [`ManifestWriter::finalize`].
pub struct JsonManifestWriter {
    rows: Vec<JsonRow>,
    output_path: PathBuf,
    batch: String,
    settings: JsonSettings,
}

impl JsonManifestWriter {
    /// Create a new JSON manifest writer.
    pub fn new(output_path: &Path, batch: &str, settings: JsonSettings) -> Self {
        Self {
            rows: Vec::new(),
            output_path: output_path.to_path_buf(),
            batch: batch.to_string(),
            settings,
        }
    }

    fn compute_summary(&self) -> JsonSummary {
        let recordings: BTreeSet<&str> = self.rows.iter().map(|r| r.source_file.as_str()).collect();
        let labels: BTreeSet<&str> = self
            .rows
            .iter()
            .filter_map(|r| r.labels.first().map(String::as_str))
            .collect();

        JsonSummary {
            total_rows: self.rows.len(),
            recordings: recordings.len(),
            unique_labels: labels.len(),
        }
    }
}

impl ManifestWriter for JsonManifestWriter {
    fn write_header(&mut self) -> Result<()> {
        // Written at finalize
        Ok(())
    }

    fn write_row(&mut self, index: usize, row: &ManifestRow) -> Result<()> {
        self.rows.push(JsonRow {
            index,
            clip_id: row.clip_id.clone(),
            file_name: row.clip_path.clone(),
            source_file: row.recording_id.clone(),
            start_time: row.window_start,
            labels: row.labels.as_slice().to_vec(),
        });
        Ok(())
    }

    fn finalize(&mut self) -> Result<()> {
        let summary = self.compute_summary();
        let document = JsonManifestFile {
            batch: self.batch.clone(),
            generated_at: Utc::now(),
            settings: self.settings,
            rows: std::mem::take(&mut self.rows),
            summary,
        };

        let mut out = BufWriter::new(File::create(&self.output_path)?);
        serde_json::to_writer_pretty(&mut out, &document).map_err(|e| Error::JsonWrite {
            path: self.output_path.clone(),
            source: e,
        })?;
        out.flush()?;
        Ok(())
    }
}
