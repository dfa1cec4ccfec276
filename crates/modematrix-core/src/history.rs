//! Bounded, persisted log of past calculations.
//!
//! The whole history lives in a single slot as a JSON array, most recent
//! entry first. It is read once when the store is opened and written back in
//! full after every mutation.

use chrono::{DateTime, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{ModeMatrixError, Result};
use crate::storage::{HISTORY_KEY, KeyValueStore};
use modematrix_engine::engine::ResultBatch;

/// Maximum number of entries kept; older ones are dropped on insert.
pub const HISTORY_CAPACITY: usize = 50;

/// One recorded calculation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    #[serde(with = "iso_timestamp")]
    pub timestamp: DateTime<Utc>,
    pub results: ResultBatch,
}

/// ISO-8601 with millisecond precision and a `Z` suffix, e.g.
/// `2024-05-01T10:20:30.123Z`.
mod iso_timestamp {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(ts: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&ts.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(d)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}

/// History entries, most recent first.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct History {
    entries: Vec<HistoryEntry>,
}

impl History {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&HistoryEntry> {
        self.entries.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, HistoryEntry> {
        self.entries.iter()
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }
}

/// Owner of the in-memory history and its storage slot.
pub struct HistoryStore<S> {
    store: S,
    history: History,
}

impl<S: KeyValueStore> HistoryStore<S> {
    /// Open the store and load whatever history the slot holds.
    pub fn open(store: S) -> Self {
        let history = read_history(&store);
        HistoryStore { store, history }
    }

    /// Re-read the slot, replacing the in-memory history.
    ///
    /// A missing, unreadable or malformed slot yields an empty history.
    pub fn load(&mut self) -> &History {
        self.history = read_history(&self.store);
        &self.history
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Record a batch stamped with the current instant.
    pub fn record(&mut self, batch: ResultBatch) -> Result<HistoryEntry> {
        self.record_at(batch, Utc::now())
    }

    /// Record a batch stamped with `at` (truncated to milliseconds).
    ///
    /// The new entry goes first and the history is cut to
    /// [`HISTORY_CAPACITY`]. Memory is only updated once the slot write
    /// succeeds.
    pub fn record_at(&mut self, batch: ResultBatch, at: DateTime<Utc>) -> Result<HistoryEntry> {
        if batch.is_empty() {
            return Err(ModeMatrixError::EmptyBatch);
        }

        let entry = HistoryEntry {
            timestamp: truncate_to_millis(at),
            results: batch,
        };

        let mut entries = Vec::with_capacity(HISTORY_CAPACITY);
        entries.push(entry.clone());
        entries.extend(
            self.history
                .entries
                .iter()
                .take(HISTORY_CAPACITY - 1)
                .cloned(),
        );
        let next = History { entries };

        self.persist(&next)?;
        self.history = next;
        log::debug!("Recorded history entry ({} total)", self.history.len());
        Ok(entry)
    }

    /// Drop every entry. There is no way back.
    pub fn clear(&mut self) -> Result<()> {
        let next = History::default();
        self.persist(&next)?;
        self.history = next;
        log::debug!("Cleared history");
        Ok(())
    }

    pub fn entry_at(&self, index: usize) -> Result<&HistoryEntry> {
        self.history
            .get(index)
            .ok_or(ModeMatrixError::IndexOutOfRange {
                index,
                len: self.history.len(),
            })
    }

    fn persist(&self, history: &History) -> Result<()> {
        let json = serde_json::to_string(history)?;
        self.store.set(HISTORY_KEY, &json)
    }
}

fn read_history<S: KeyValueStore>(store: &S) -> History {
    let raw = match store.get(HISTORY_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return History::default(),
        Err(err) => {
            log::warn!("Failed to read history, starting empty: {}", err);
            return History::default();
        }
    };

    match serde_json::from_str::<History>(&raw) {
        Ok(history) => history,
        Err(err) => {
            log::warn!("Discarding unreadable history: {}", err);
            History::default()
        }
    }
}

fn truncate_to_millis(at: DateTime<Utc>) -> DateTime<Utc> {
    let nanos = at.nanosecond() / 1_000_000 * 1_000_000;
    at.with_nanosecond(nanos).unwrap_or(at)
}
