use modematrix_engine::engine::{Grid, parse_cell};

pub const DEFAULT_ROWS: usize = 3;
pub const DEFAULT_COLUMNS: usize = 3;

/// A cell position in the table (0-indexed).
#[derive(Clone, Copy, Debug, Default, Hash, Eq, PartialEq)]
pub struct CellPos {
    pub row: usize,
    pub col: usize,
}

impl CellPos {
    pub fn new(row: usize, col: usize) -> Self {
        CellPos { row, col }
    }
}

/// The data-entry table: column labels plus the raw text of every cell.
///
/// Every row has exactly one entry per label, and there is always at least
/// one row and one column.
#[derive(Clone, Debug, PartialEq)]
pub struct Document {
    pub(crate) labels: Vec<String>,
    pub(crate) rows: Vec<Vec<String>>,
}

impl Document {
    /// Create a blank table. Both dimensions are raised to at least 1.
    pub fn new(rows: usize, columns: usize) -> Self {
        let columns = columns.max(1);
        let rows = rows.max(1);
        Document {
            labels: (1..=columns).map(column_label).collect(),
            rows: vec![vec![String::new(); columns]; rows],
        }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.labels.len()
    }

    pub fn column_labels(&self) -> &[String] {
        &self.labels
    }

    /// Raw text of a cell, `None` outside the table.
    pub fn cell(&self, pos: CellPos) -> Option<&str> {
        self.rows
            .get(pos.row)
            .and_then(|row| row.get(pos.col))
            .map(String::as_str)
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Parse every cell into the engine's grid form.
    pub fn to_grid(&self) -> Grid {
        self.rows
            .iter()
            .map(|row| row.iter().map(|text| parse_cell(text)).collect())
            .collect()
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new(DEFAULT_ROWS, DEFAULT_COLUMNS)
    }
}

/// Label for the 1-based column `n`.
pub(crate) fn column_label(n: usize) -> String {
    format!("Column {}", n)
}
