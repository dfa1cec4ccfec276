//! Row engine API.
//!
//! - [`Cell`], [`Grid`], [`parse_cell`] - Cell storage and the input parsing policy
//! - [`mode`] - Most frequent value with first-encountered tie-break
//! - [`evaluate`], [`RowResult`], [`ResultBatch`] - One evaluation pass over a grid
//! - [`format_number`], [`format_values`] - Number rendering for display and export

mod cell;
mod evaluate;
mod format;
mod mode;

pub use cell::{Cell, Grid, parse_cell};
pub use evaluate::{ResultBatch, RowResult, evaluate};
pub use format::{format_number, format_values};
pub use mode::mode;
