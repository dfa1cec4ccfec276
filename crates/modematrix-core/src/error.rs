//! Error types for ModeMatrix core.

use thiserror::Error;

use modematrix_engine::ModeError;

/// Errors that can occur in the ModeMatrix application
#[derive(Error, Debug)]
pub enum ModeMatrixError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    InvalidInput(#[from] ModeError),

    #[error("Cannot record an empty result batch")]
    EmptyBatch,

    #[error("History index {index} out of range (history has {len} entries)")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Results not saved to history: {0}")]
    HistoryNotSaved(Box<ModeMatrixError>),

    #[error("Please enter some numbers first")]
    NoNumericData,

    #[error("No results to export")]
    NoResults,

    #[error("Cannot remove the last row")]
    CannotRemoveLastRow,

    #[error("Cannot remove the last column")]
    CannotRemoveLastColumn,

    #[error("Cell ({row}, {col}) is outside the table")]
    CellOutOfBounds { row: usize, col: usize },

    #[error("CSV input is empty")]
    EmptyCsv,
}

pub type Result<T> = std::result::Result<T, ModeMatrixError>;
