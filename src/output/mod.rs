//! Manifest serialization and progress reporting.

mod csv;
mod json;
pub mod progress;
mod writer;

pub use csv::CsvManifestWriter;
pub use json::{JsonManifestFile, JsonManifestWriter, JsonRow, JsonSettings, JsonSummary};
pub use writer::ManifestWriter;

use crate::config::ManifestFormat;
use crate::error::{Error, Result};
use crate::manifest::Manifest;
use std::path::Path;
use tracing::debug;

/// Write `manifest` to `path` in the given format, creating parent directories.
pub fn write_manifest(
    path: &Path,
    format: ManifestFormat,
    batch: &str,
    settings: JsonSettings,
    manifest: &Manifest,
) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| Error::OutputDirCreateFailed {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }

    debug!("Writing {} manifest: {}", format, path.display());

    let mut writer: Box<dyn ManifestWriter> = match format {
        ManifestFormat::Csv => Box::new(CsvManifestWriter::new(path)?),
        ManifestFormat::Json => Box::new(JsonManifestWriter::new(path, batch, settings)),
    };

    writer.write_header()?;
    for (index, row) in manifest.rows().iter().enumerate() {
        writer.write_row(index, row)?;
    }
    writer.finalize()
}
