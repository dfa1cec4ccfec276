//! modematrix-core - UI-agnostic document, history, storage and export.

pub mod document;
pub mod error;
pub mod export;
pub mod history;
pub mod session;
pub mod storage;
pub mod theme;

pub use document::{CellPos, Document};
pub use error::{ModeMatrixError, Result};
pub use export::CsvArtifact;
pub use history::{History, HistoryEntry, HistoryStore};
pub use session::Session;
pub use storage::{FileStore, KeyValueStore, MemoryStore};
pub use theme::Theme;

pub use modematrix_engine::engine::{ResultBatch, RowResult};
