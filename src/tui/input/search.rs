use crossterm::event::{KeyCode, KeyEvent};

use crate::ops::catalog::Event;
use crate::tui::app::{App, Mode};

use super::{LineEdit, edit_line};

/// Live search: the filter follows the prompt on every keystroke
pub(super) fn handle_search(app: &mut App, key: KeyEvent) {
    match key.code {
        // Cancel: drop the search entirely
        KeyCode::Esc => {
            app.search_input.clear();
            app.apply(Event::SetSearch(String::new()));
            app.mode = Mode::Browse;
        }
        // Accept: keep the search, back to browsing
        KeyCode::Enter => app.mode = Mode::Browse,
        KeyCode::Down => app.move_cursor(1),
        KeyCode::Up => app.move_cursor(-1),
        _ => {
            if edit_line(&mut app.search_input, key) == LineEdit::Changed {
                let text = app.search_input.as_str().to_string();
                app.apply(Event::SetSearch(text));
            }
        }
    }
}
