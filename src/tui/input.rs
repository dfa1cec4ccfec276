use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use ratatui::prelude::*;
use std::io;

use super::actions::{apply_action, handle_edit_text};
use super::app::{App, Mode};
use super::keymap::translate;
use super::ui;

/// Route one key press to the app.
pub fn handle_key(app: &mut App, key: KeyEvent) {
    app.status_message.clear();
    match translate(app.mode, app.tab, key) {
        Some(action) => apply_action(app, action),
        None if app.mode == Mode::Edit => handle_edit_text(app, key),
        None => {}
    }
}

pub fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    while !app.should_quit {
        terminal.draw(|f| ui::draw(f, app))?;

        if let Event::Key(key) = event::read()? {
            // Only process key press events (Windows reports Press + Release)
            if key.kind != KeyEventKind::Press {
                continue;
            }
            handle_key(app, key);
        }
    }
    Ok(())
}
