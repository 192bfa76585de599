//! CSV manifest writer.
//!
//! The layout matches what the dataset loaders already read: an unnamed
//! leading row-index column, float start times in shortest round-trip form,
//! and label sets rendered as Python list literals.

use std::fs::File;
use std::path::{Path, PathBuf};

use crate::constants::manifest::{FILE_NAME, LABEL, SOURCE_FILE, START_TIME};
use crate::error::{Error, Result};
use crate::manifest::ManifestRow;
use crate::output::ManifestWriter;
use crate::window::LabelSet;

/// CSV format manifest writer.
pub struct CsvManifestWriter {
    writer: csv::Writer<File>,
    path: PathBuf,
}

impl CsvManifestWriter {
    /// Create a new CSV manifest writer.
    pub fn new(path: &Path) -> Result<Self> {
        let writer = csv::Writer::from_path(path).map_err(|e| Error::ManifestWrite {
            path: path.to_path_buf(),
            source: e,
        })?;
        Ok(Self {
            writer,
            path: path.to_path_buf(),
        })
    }

    fn write_record(&mut self, fields: &[&str]) -> Result<()> {
        self.writer
            .write_record(fields)
            .map_err(|e| Error::ManifestWrite {
                path: self.path.clone(),
                source: e,
            })
    }
}

impl ManifestWriter for CsvManifestWriter {
    fn write_header(&mut self) -> Result<()> {
        self.write_record(&["", FILE_NAME, SOURCE_FILE, START_TIME, LABEL])
    }

    fn write_row(&mut self, index: usize, row: &ManifestRow) -> Result<()> {
        let index = index.to_string();
        let file_name = row.clip_path.display().to_string();
        let start = format_seconds(row.window_start);
        let labels = python_list(&row.labels);
        self.write_record(&[&index, &file_name, &row.recording_id, &start, &labels])
    }

    fn finalize(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

/// Python float `repr`: shortest round-trip digits, fixed notation with a
/// fractional part (`2.0`, `8.6`), scientific below 1e-4 or from 1e16
/// with a signed two-digit exponent (`5e-06`).
fn format_seconds(value: f64) -> String {
    let scientific = format!("{value:e}");
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return scientific;
    };
    let exponent: i32 = exponent.parse().unwrap_or(0);

    if value != 0.0 && !(-4..16).contains(&exponent) {
        let sign = if exponent < 0 { '-' } else { '+' };
        return format!("{mantissa}e{sign}{:02}", exponent.unsigned_abs());
    }

    let fixed = value.to_string();
    if fixed.contains('.') {
        fixed
    } else {
        format!("{fixed}.0")
    }
}

/// Render labels as a Python list literal, e.g. `['dog_bark', 'siren']`.
fn python_list(labels: &LabelSet) -> String {
    let items: Vec<String> = labels.iter().map(String::as_str).map(python_str).collect();
    format!("[{}]", items.join(", "))
}

/// Python `repr` of a string: single quotes unless only double quotes avoid escaping.
fn python_str(value: &str) -> String {
    let quote = if value.contains('\'') && !value.contains('"') {
        '"'
    } else {
        '\''
    };

    let mut out = String::with_capacity(value.len() + 2);
    out.push(quote);
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
    }
    out.push(quote);
    out
}
