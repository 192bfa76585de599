//! Manifest accumulation.
//!
//! A manifest is the append-only list of rows describing every extracted
//! window of a batch. Rows are built once and never modified.

mod row;

pub use row::{ManifestRow, accumulate, clip_id};

/// Ordered rows of one batch.
#[derive(Debug, Clone, Default)]
pub struct Manifest {
    rows: Vec<ManifestRow>,
}

impl Manifest {
    /// Create an empty manifest.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a row.
    pub fn push(&mut self, row: ManifestRow) {
        self.rows.push(row);
    }

    /// Append the rows of one recording, keeping their order.
    pub fn extend(&mut self, rows: impl IntoIterator<Item = ManifestRow>) {
        self.rows.extend(rows);
    }

    /// Rows in processing order.
    pub fn rows(&self) -> &[ManifestRow] {
        &self.rows
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether no row has been added.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
