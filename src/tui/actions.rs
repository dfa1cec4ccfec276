use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::app::App;
use super::keymap::Action;

/// Handle text editing operations on a buffer with UTF-8 aware cursor movement.
fn handle_text_input(buffer: &mut String, cursor: &mut usize, key: KeyEvent) {
    match key.code {
        KeyCode::Left => {
            if *cursor > 0 {
                let mut new_pos = *cursor - 1;
                while new_pos > 0 && !buffer.is_char_boundary(new_pos) {
                    new_pos -= 1;
                }
                *cursor = new_pos;
            }
        }
        KeyCode::Right => {
            if *cursor < buffer.len() {
                let mut new_pos = *cursor + 1;
                while new_pos < buffer.len() && !buffer.is_char_boundary(new_pos) {
                    new_pos += 1;
                }
                *cursor = new_pos;
            }
        }
        KeyCode::Home => *cursor = 0,
        KeyCode::End => *cursor = buffer.len(),
        KeyCode::Backspace => {
            if *cursor > 0 {
                let mut del_start = *cursor - 1;
                while del_start > 0 && !buffer.is_char_boundary(del_start) {
                    del_start -= 1;
                }
                buffer.drain(del_start..*cursor);
                *cursor = del_start;
            }
        }
        KeyCode::Delete => {
            if *cursor < buffer.len() {
                let mut del_end = *cursor + 1;
                while del_end < buffer.len() && !buffer.is_char_boundary(del_end) {
                    del_end += 1;
                }
                buffer.drain(*cursor..del_end);
            }
        }
        KeyCode::Char(c) => {
            if key.modifiers.is_empty() || key.modifiers == KeyModifiers::SHIFT {
                buffer.insert(*cursor, c);
                *cursor += c.len_utf8();
            }
        }
        _ => {}
    }
}

pub fn handle_edit_text(app: &mut App, key: KeyEvent) {
    handle_text_input(&mut app.edit_buffer, &mut app.edit_cursor, key);
}

/// Apply an action to the application state.
pub fn apply_action(app: &mut App, action: Action) {
    match action {
        Action::Quit => app.quit(),
        Action::SwitchTab => app.switch_tab(),
        Action::ToggleTheme => app.toggle_theme(),
        Action::Calculate => app.calculate(),

        Action::Move(dcol, drow) => app.move_cursor(dcol, drow),
        Action::EnterEdit => app.enter_edit_mode(None),
        Action::EditWith(c) => app.enter_edit_mode(Some(c)),
        Action::CommitDown => app.commit_and_advance_down(),
        Action::CommitRight => app.commit_and_advance_right(),
        Action::CommitMove(dcol, drow) => {
            app.commit_edit();
            app.move_cursor(dcol, drow);
        }
        Action::CancelEdit => app.cancel_edit(),
        Action::ClearCell => app.clear_current_cell(),

        Action::AddRow => app.add_row(),
        Action::AddColumn => app.add_column(),
        Action::RemoveRow => app.remove_row(),
        Action::RemoveColumn => app.remove_column(),
        Action::RequestConfirm(confirm) => app.request_confirm(confirm),
        Action::ExportResults => app.export_results(),

        Action::SelectHistory(delta) => app.select_history(delta),
        Action::ExportHistory => app.export_selected_history(),

        Action::Answer(accepted) => app.resolve_confirm(accepted),
    }
}
