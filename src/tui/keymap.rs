//! Key translation layer.
//!
//! Keeps key handling separate from app behavior: a key event plus the
//! current mode and tab becomes an [`Action`], or nothing.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::app::{Confirm, Mode, Tab};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Quit,
    SwitchTab,
    ToggleTheme,
    Calculate,

    Move(i32, i32),
    EnterEdit,
    EditWith(char),
    CommitDown,
    CommitRight,
    CommitMove(i32, i32),
    CancelEdit,
    ClearCell,

    AddRow,
    AddColumn,
    RemoveRow,
    RemoveColumn,
    RequestConfirm(Confirm),
    ExportResults,

    SelectHistory(i32),
    ExportHistory,

    Answer(bool),
}

/// Translate a key event to an action for the current mode and tab.
///
/// Returns `None` for keys that should reach the text editor (in edit mode)
/// or that have no binding.
pub fn translate(mode: Mode, tab: Tab, key: KeyEvent) -> Option<Action> {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Some(Action::Quit);
    }

    match mode {
        Mode::Confirm(_) => Some(Action::Answer(matches!(
            key.code,
            KeyCode::Char('y') | KeyCode::Char('Y')
        ))),
        Mode::Edit => translate_edit(key),
        Mode::Normal => match key.code {
            KeyCode::Char('q') => Some(Action::Quit),
            KeyCode::Tab | KeyCode::BackTab => Some(Action::SwitchTab),
            KeyCode::Char('t') => Some(Action::ToggleTheme),
            _ => match tab {
                Tab::DataEntry => translate_data_entry(key),
                Tab::History => translate_history(key),
            },
        },
    }
}

fn translate_edit(key: KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Esc => Some(Action::CancelEdit),
        KeyCode::Enter => Some(Action::CommitDown),
        KeyCode::Tab => Some(Action::CommitRight),
        KeyCode::Up => Some(Action::CommitMove(0, -1)),
        KeyCode::Down => Some(Action::CommitMove(0, 1)),
        KeyCode::F(5) => Some(Action::Calculate),
        _ => None,
    }
}

fn translate_data_entry(key: KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Left | KeyCode::Char('h') => Some(Action::Move(-1, 0)),
        KeyCode::Right | KeyCode::Char('l') => Some(Action::Move(1, 0)),
        KeyCode::Up | KeyCode::Char('k') => Some(Action::Move(0, -1)),
        KeyCode::Down | KeyCode::Char('j') => Some(Action::Move(0, 1)),
        KeyCode::Enter | KeyCode::Char('i') => Some(Action::EnterEdit),
        KeyCode::Char(c @ ('0'..='9' | '-' | '+' | '.')) => Some(Action::EditWith(c)),
        KeyCode::Backspace | KeyCode::Delete => Some(Action::ClearCell),
        KeyCode::Char('c') | KeyCode::F(5) => Some(Action::Calculate),
        KeyCode::Char('a') => Some(Action::AddRow),
        KeyCode::Char('A') => Some(Action::AddColumn),
        KeyCode::Char('x') => Some(Action::RemoveRow),
        KeyCode::Char('X') => Some(Action::RemoveColumn),
        KeyCode::Char('C') => Some(Action::RequestConfirm(Confirm::ClearAll)),
        KeyCode::Char('e') => Some(Action::ExportResults),
        _ => None,
    }
}

fn translate_history(key: KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => Some(Action::SelectHistory(-1)),
        KeyCode::Down | KeyCode::Char('j') => Some(Action::SelectHistory(1)),
        KeyCode::PageUp => Some(Action::SelectHistory(-10)),
        KeyCode::PageDown => Some(Action::SelectHistory(10)),
        KeyCode::Char('e') => Some(Action::ExportHistory),
        KeyCode::Char('D') => Some(Action::RequestConfirm(Confirm::ClearHistory)),
        _ => None,
    }
}
