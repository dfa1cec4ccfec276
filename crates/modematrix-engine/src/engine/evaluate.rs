//! Row evaluation: one mode per non-empty row.

use serde::{Deserialize, Serialize};

use super::cell::Cell;
use super::mode::mode;

/// The mode of one grid row.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RowResult {
    /// 1-based position of the row in the evaluated grid.
    pub row: usize,
    /// Present cells of the row, in column order. Never empty.
    pub values: Vec<f64>,
    pub mode: f64,
}

/// Results of one evaluation pass, in row order.
pub type ResultBatch = Vec<RowResult>;

/// Compute the mode of every row that holds at least one number.
///
/// Absent cells are skipped. Rows without any number produce no result but
/// keep their position, so later rows are still numbered by their place in
/// `grid`. A grid with no numbers at all yields an empty batch.
pub fn evaluate<R: AsRef<[Cell]>>(grid: &[R]) -> ResultBatch {
    grid.iter()
        .enumerate()
        .filter_map(|(idx, row)| {
            let values: Vec<f64> = row
                .as_ref()
                .iter()
                .flatten()
                .copied()
                .filter(|n| n.is_finite())
                .collect();
            let mode = mode(&values).ok()?;
            Some(RowResult {
                row: idx + 1,
                values,
                mode,
            })
        })
        .collect()
}
