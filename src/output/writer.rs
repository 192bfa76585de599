//! Manifest writer trait definition.

use crate::error::Result;
use crate::manifest::ManifestRow;

/// Trait for serializing manifest rows.
pub trait ManifestWriter {
    /// Write the file header (if applicable).
    fn write_header(&mut self) -> Result<()>;

    /// Write a single row; `index` is its zero-based position in the manifest.
    fn write_row(&mut self, index: usize, row: &ManifestRow) -> Result<()>;

    /// Finalize the output (flush, close, etc.).
    fn finalize(&mut self) -> Result<()>;
}
