use dashmap::DashMap;
use std::sync::Arc;

use super::KeyValueStore;
use crate::error::Result;

/// In-memory slots. Clones share the same map (DashMap is behind an Arc).
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    slots: Arc<DashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove a slot, as if it had never been written.
    #[cfg(test)]
    pub fn remove(&self, key: &str) {
        self.slots.remove(key);
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.slots.get(key).map(|v| v.value().clone()))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.slots.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
