//! Error types for the mode engine.

use thiserror::Error;

/// Errors raised by the mode calculator.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModeError {
    #[error("Invalid input: {0}")]
    InvalidInput(&'static str),
}
