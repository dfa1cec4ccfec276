//! TUI application state.

use chrono::Utc;
use std::path::PathBuf;

use modematrix_core::{CellPos, FileStore, Result, Session};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tab {
    DataEntry,
    History,
}

impl Tab {
    pub fn index(self) -> usize {
        match self {
            Tab::DataEntry => 0,
            Tab::History => 1,
        }
    }

    pub fn other(self) -> Tab {
        match self {
            Tab::DataEntry => Tab::History,
            Tab::History => Tab::DataEntry,
        }
    }
}

/// Destructive actions that wait for a y/n answer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Confirm {
    ClearAll,
    ClearHistory,
}

impl Confirm {
    pub fn prompt(self) -> &'static str {
        match self {
            Confirm::ClearAll => "Clear all data? (y/n)",
            Confirm::ClearHistory => "Clear all history? This cannot be undone. (y/n)",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Normal,
    Edit,
    Confirm(Confirm),
}

pub struct App {
    pub session: Session<FileStore>,
    pub tab: Tab,
    pub mode: Mode,
    pub cursor: CellPos,
    pub edit_buffer: String,
    /// Byte offset of the edit cursor in `edit_buffer`.
    pub edit_cursor: usize,
    pub history_selected: usize,
    pub status_message: String,
    pub export_dir: PathBuf,
    pub should_quit: bool,
}

impl App {
    pub fn new(session: Session<FileStore>, export_dir: PathBuf) -> Self {
        App {
            session,
            tab: Tab::DataEntry,
            mode: Mode::Normal,
            cursor: CellPos::default(),
            edit_buffer: String::new(),
            edit_cursor: 0,
            history_selected: 0,
            status_message: String::new(),
            export_dir,
            should_quit: false,
        }
    }

    fn report<T>(&mut self, result: Result<T>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(err) => {
                self.status_message = err.to_string();
                None
            }
        }
    }

    pub fn switch_tab(&mut self) {
        if self.mode == Mode::Edit {
            self.commit_edit();
        }
        self.tab = self.tab.other();
        self.clamp_history_selection();
    }

    pub fn move_cursor(&mut self, dcol: i32, drow: i32) {
        let doc = &self.session.document;
        let row = (self.cursor.row as i64 + drow as i64).clamp(0, doc.row_count() as i64 - 1);
        let col = (self.cursor.col as i64 + dcol as i64).clamp(0, doc.column_count() as i64 - 1);
        self.cursor = CellPos::new(row as usize, col as usize);
    }

    fn clamp_cursor(&mut self) {
        self.move_cursor(0, 0);
    }

    /// Start editing the current cell, either keeping its text or replacing
    /// it with `first_char`.
    pub fn enter_edit_mode(&mut self, first_char: Option<char>) {
        self.edit_buffer = match first_char {
            Some(c) => c.to_string(),
            None => self
                .session
                .document
                .cell(self.cursor)
                .unwrap_or_default()
                .to_string(),
        };
        self.edit_cursor = self.edit_buffer.len();
        self.mode = Mode::Edit;
    }

    pub fn cancel_edit(&mut self) {
        self.mode = Mode::Normal;
        self.edit_buffer.clear();
        self.edit_cursor = 0;
    }

    pub fn commit_edit(&mut self) {
        let text = std::mem::take(&mut self.edit_buffer);
        let result = self.session.set_cell(self.cursor, &text);
        self.report(result);
        self.edit_cursor = 0;
        self.mode = Mode::Normal;
    }

    /// Commit and continue editing one row down, growing the table at the
    /// bottom edge.
    pub fn commit_and_advance_down(&mut self) {
        self.commit_edit();
        self.cursor = self.session.document.advance_down(self.cursor);
        self.enter_edit_mode(None);
    }

    /// Commit and continue editing at the top of the next column, growing the
    /// table at the right edge.
    pub fn commit_and_advance_right(&mut self) {
        self.commit_edit();
        self.cursor = self.session.document.advance_right(self.cursor);
        self.enter_edit_mode(None);
    }

    pub fn clear_current_cell(&mut self) {
        let result = self.session.set_cell(self.cursor, "");
        self.report(result);
    }

    pub fn add_row(&mut self) {
        self.session.add_row();
    }

    pub fn add_column(&mut self) {
        self.session.add_column();
    }

    pub fn remove_row(&mut self) {
        let result = self.session.remove_row();
        self.report(result);
        self.clamp_cursor();
    }

    pub fn remove_column(&mut self) {
        let result = self.session.remove_column();
        self.report(result);
        self.clamp_cursor();
    }

    pub fn calculate(&mut self) {
        if self.mode == Mode::Edit {
            self.commit_edit();
        }
        let result = self.session.calculate().map(|rows| rows.len());
        if let Some(rows) = self.report(result) {
            self.status_message = format!(
                "Calculated {} row{} (saved to history)",
                rows,
                if rows == 1 { "" } else { "s" }
            );
        }
    }

    pub fn export_results(&mut self) {
        let result = self
            .session
            .export_results(Utc::now())
            .and_then(|artifact| artifact.write_to(&self.export_dir));
        if let Some(path) = self.report(result) {
            self.status_message = format!("Exported to {}", path.display());
        }
    }

    pub fn export_selected_history(&mut self) {
        let result = self
            .session
            .export_history_entry(self.history_selected)
            .and_then(|artifact| artifact.write_to(&self.export_dir));
        if let Some(path) = self.report(result) {
            self.status_message = format!("Exported to {}", path.display());
        }
    }

    pub fn select_history(&mut self, delta: i32) {
        let len = self.session.history().len();
        if len == 0 {
            return;
        }
        let next = (self.history_selected as i64 + delta as i64).clamp(0, len as i64 - 1);
        self.history_selected = next as usize;
    }

    fn clamp_history_selection(&mut self) {
        let len = self.session.history().len();
        self.history_selected = self.history_selected.min(len.saturating_sub(1));
    }

    pub fn toggle_theme(&mut self) {
        let result = self.session.toggle_theme();
        if let Some(theme) = self.report(result) {
            self.status_message = format!("Theme: {}", theme);
        }
    }

    pub fn request_confirm(&mut self, confirm: Confirm) {
        self.mode = Mode::Confirm(confirm);
        self.status_message = confirm.prompt().to_string();
    }

    /// Answer the pending confirmation.
    pub fn resolve_confirm(&mut self, accepted: bool) {
        let Mode::Confirm(confirm) = self.mode else {
            return;
        };
        self.mode = Mode::Normal;
        if !accepted {
            self.status_message = "Cancelled".to_string();
            return;
        }
        match confirm {
            Confirm::ClearAll => {
                self.session.clear_all();
                self.status_message = "Cleared all data".to_string();
            }
            Confirm::ClearHistory => {
                let result = self.session.clear_history();
                if self.report(result).is_some() {
                    self.history_selected = 0;
                    self.status_message = "History cleared".to_string();
                }
            }
        }
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }
}
