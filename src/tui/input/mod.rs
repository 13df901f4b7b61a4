mod browse;
mod form;
mod search;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::util::line_buffer::LineBuffer;

use super::app::{App, Mode};

/// Handle a key event in the current mode
pub fn handle_key(app: &mut App, key: KeyEvent) {
    // Ignore bare modifier key presses (Shift, Ctrl, Alt, etc.)
    if matches!(key.code, KeyCode::Modifier(_)) {
        return;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }
    match app.mode {
        Mode::Browse => browse::handle_browse(app, key),
        Mode::Search => search::handle_search(app, key),
        Mode::Form => form::handle_form(app, key),
    }
}

/// What a key did to a line buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineEdit {
    /// Text changed
    Changed,
    /// Only the cursor moved
    Moved,
    /// Not a line-editing key
    Ignored,
}

/// Shared single-line editing keys for the search prompt and form text fields
fn edit_line(buf: &mut LineBuffer, key: KeyEvent) -> LineEdit {
    match (key.modifiers, key.code) {
        (m, KeyCode::Char('w')) if m.contains(KeyModifiers::CONTROL) => {
            buf.delete_word_left();
            LineEdit::Changed
        }
        (m, KeyCode::Backspace) if m.contains(KeyModifiers::ALT) => {
            buf.delete_word_left();
            LineEdit::Changed
        }
        (m, KeyCode::Char('u')) if m.contains(KeyModifiers::CONTROL) => {
            buf.clear();
            LineEdit::Changed
        }
        (m, KeyCode::Char('a')) if m.contains(KeyModifiers::CONTROL) => {
            buf.home();
            LineEdit::Moved
        }
        (m, KeyCode::Char('e')) if m.contains(KeyModifiers::CONTROL) => {
            buf.end();
            LineEdit::Moved
        }
        (_, KeyCode::Backspace) => {
            if buf.backspace() {
                LineEdit::Changed
            } else {
                LineEdit::Moved
            }
        }
        (_, KeyCode::Delete) => {
            if buf.delete() {
                LineEdit::Changed
            } else {
                LineEdit::Moved
            }
        }
        (_, KeyCode::Left) => {
            buf.left();
            LineEdit::Moved
        }
        (_, KeyCode::Right) => {
            buf.right();
            LineEdit::Moved
        }
        (_, KeyCode::Home) => {
            buf.home();
            LineEdit::Moved
        }
        (_, KeyCode::End) => {
            buf.end();
            LineEdit::Moved
        }
        (KeyModifiers::NONE | KeyModifiers::SHIFT, KeyCode::Char(c)) => {
            buf.insert(c);
            LineEdit::Changed
        }
        _ => LineEdit::Ignored,
    }
}
