//! Table types.

use super::TextRun;
use serde::{Deserialize, Serialize};

/// A table structure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    /// Rows in the table
    pub rows: Vec<TableRow>,

    /// Whether the first row holds column headers
    pub has_column_header: bool,
}

impl Table {
    /// Create a new empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a row to the table.
    pub fn add_row(&mut self, row: TableRow) {
        self.rows.push(row);
    }

    /// Get the number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Maximum cell count across all rows (0 for an empty table).
    pub fn width(&self) -> usize {
        self.rows.iter().map(TableRow::width).max().unwrap_or(0)
    }

    /// Check if the table has no cells at all.
    pub fn is_empty(&self) -> bool {
        self.width() == 0
    }

    /// Get plain text representation of the table.
    pub fn plain_text(&self) -> String {
        self.rows
            .iter()
            .map(|row| row.plain_text())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// A table row. Each cell holds a single annotated text value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRow {
    /// Cells in the row
    pub cells: Vec<TextRun>,
}

impl TableRow {
    /// Create a new empty row.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a row from text values.
    pub fn from_strings<S: Into<String>>(values: impl IntoIterator<Item = S>) -> Self {
        Self {
            cells: values.into_iter().map(TextRun::new).collect(),
        }
    }

    /// Append a cell value.
    pub fn add_cell(&mut self, cell: TextRun) {
        self.cells.push(cell);
    }

    /// Number of cells in this row.
    pub fn width(&self) -> usize {
        self.cells.len()
    }

    /// Get plain text representation.
    pub fn plain_text(&self) -> String {
        self.cells
            .iter()
            .map(|c| c.content.as_str())
            .collect::<Vec<_>>()
            .join("\t")
    }
}
