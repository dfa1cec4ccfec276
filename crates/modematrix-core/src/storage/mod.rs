//! Key-value slot storage.
//!
//! Each key names one opaque text slot that is always read whole and
//! overwritten whole, like browser local storage.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use crate::error::Result;

/// Slot holding the serialized history.
pub const HISTORY_KEY: &str = "history";
/// Slot holding the last selected theme name.
pub const THEME_KEY: &str = "theme";

/// A store of named text slots.
pub trait KeyValueStore {
    /// Read a slot. A slot that was never written is `Ok(None)`.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Overwrite a slot.
    fn set(&self, key: &str, value: &str) -> Result<()>;
}
