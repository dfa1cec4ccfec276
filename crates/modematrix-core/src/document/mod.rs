//! Data-entry table state and logic (UI-agnostic).

mod io;
mod ops;
mod state;

pub use state::{CellPos, DEFAULT_COLUMNS, DEFAULT_ROWS, Document};
