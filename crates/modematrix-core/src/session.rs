//! Application context: the table, the history, the theme and the results
//! currently on display, owned together instead of living in globals.

use chrono::{DateTime, Utc};

use crate::document::{CellPos, Document};
use crate::error::{ModeMatrixError, Result};
use crate::export::{CsvArtifact, export_batch, export_entry};
use crate::history::{History, HistoryEntry, HistoryStore};
use crate::storage::KeyValueStore;
use crate::theme::Theme;
use modematrix_engine::engine::{ResultBatch, RowResult, evaluate};

pub struct Session<S> {
    pub document: Document,
    history: HistoryStore<S>,
    theme: Theme,
    /// Results of the last calculation, until hidden by an edit that
    /// invalidates them.
    current_results: Option<ResultBatch>,
}

impl<S: KeyValueStore> Session<S> {
    /// Open a session over `store`, loading the theme and history it holds.
    pub fn open(store: S, document: Document) -> Self {
        let theme = Theme::load(&store);
        let history = HistoryStore::open(store);
        log::debug!(
            "Opened session: {} history entries, {} theme",
            history.history().len(),
            theme
        );
        Session {
            document,
            history,
            theme,
            current_results: None,
        }
    }

    /// Compute the mode of every row and record the batch in history.
    ///
    /// A table without any number is [`ModeMatrixError::NoNumericData`] and
    /// records nothing. The results are shown even when the history write
    /// fails; that failure comes back as [`ModeMatrixError::HistoryNotSaved`].
    pub fn calculate(&mut self) -> Result<&[RowResult]> {
        let batch = evaluate(&self.document.to_grid());
        if batch.is_empty() {
            return Err(ModeMatrixError::NoNumericData);
        }
        let recorded = self.history.record(batch.clone());
        let results = self.current_results.insert(batch);
        match recorded {
            Ok(_) => Ok(results.as_slice()),
            Err(err) => Err(ModeMatrixError::HistoryNotSaved(Box::new(err))),
        }
    }

    pub fn current_results(&self) -> Option<&[RowResult]> {
        self.current_results.as_deref()
    }

    pub fn hide_results(&mut self) {
        self.current_results = None;
    }

    pub fn add_row(&mut self) {
        self.document.add_row();
    }

    pub fn add_column(&mut self) {
        self.document.add_column();
    }

    pub fn set_cell(&mut self, pos: CellPos, text: &str) -> Result<()> {
        self.document.set_cell(pos, text)
    }

    pub fn remove_row(&mut self) -> Result<()> {
        self.document.remove_row()?;
        self.hide_results();
        Ok(())
    }

    pub fn remove_column(&mut self) -> Result<()> {
        self.document.remove_column()?;
        self.hide_results();
        Ok(())
    }

    /// Blank every cell and hide the results.
    pub fn clear_all(&mut self) {
        self.document.clear_values();
        self.hide_results();
    }

    /// Export the results on display, labelled with the table's columns.
    pub fn export_results(&self, at: DateTime<Utc>) -> Result<CsvArtifact> {
        let results = self
            .current_results
            .as_deref()
            .ok_or(ModeMatrixError::NoResults)?;
        Ok(export_batch(results, self.document.column_labels(), at))
    }

    /// The history entry at `index` (0 = most recent).
    pub fn entry_at(&self, index: usize) -> Result<&HistoryEntry> {
        self.history.entry_at(index)
    }

    /// Export the history entry at `index` (0 = most recent).
    pub fn export_history_entry(&self, index: usize) -> Result<CsvArtifact> {
        Ok(export_entry(self.entry_at(index)?))
    }

    pub fn history(&self) -> &History {
        self.history.history()
    }

    pub fn clear_history(&mut self) -> Result<()> {
        self.history.clear()
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn set_theme(&mut self, theme: Theme) -> Result<()> {
        theme.save(self.history.store())?;
        self.theme = theme;
        Ok(())
    }

    pub fn toggle_theme(&mut self) -> Result<Theme> {
        self.set_theme(self.theme.toggled())?;
        Ok(self.theme)
    }
}
