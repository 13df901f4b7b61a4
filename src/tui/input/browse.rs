use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::ops::catalog::Event;
use crate::ops::form::FormField;
use crate::tui::app::{App, Mode};
use crate::util::line_buffer::LineBuffer;

const PAGE: isize = 10;

pub(super) fn handle_browse(app: &mut App, key: KeyEvent) {
    // A notice stays up until the next key
    app.catalog.clear_notice();

    match (key.modifiers, key.code) {
        (_, KeyCode::Char('q')) => app.should_quit = true,

        // Movement
        (KeyModifiers::NONE, KeyCode::Down | KeyCode::Char('j')) => app.move_cursor(1),
        (KeyModifiers::NONE, KeyCode::Up | KeyCode::Char('k')) => app.move_cursor(-1),
        (_, KeyCode::PageDown) => app.move_cursor(PAGE),
        (_, KeyCode::PageUp) => app.move_cursor(-PAGE),
        (KeyModifiers::NONE, KeyCode::Home | KeyCode::Char('g')) => app.jump_to(0),
        (_, KeyCode::End | KeyCode::Char('G')) => {
            app.jump_to(app.catalog.visible_len().saturating_sub(1))
        }

        // Filters
        (KeyModifiers::NONE, KeyCode::Char('/')) => {
            app.search_input = LineBuffer::new(app.catalog.filter().search.clone());
            app.mode = Mode::Search;
        }
        (_, KeyCode::Esc) => {
            if !app.catalog.filter().search.is_empty() {
                app.apply(Event::SetSearch(String::new()));
            }
        }
        (KeyModifiers::NONE, KeyCode::Char('d')) => {
            let next = app.catalog.filter().difficulty.cycle();
            app.apply(Event::SetDifficulty(next));
        }
        (KeyModifiers::NONE, KeyCode::Char('f')) => {
            let on = !app.catalog.filter().favorites_only;
            app.apply(Event::SetFavoritesOnly(on));
        }

        // Plants
        (KeyModifiers::NONE, KeyCode::Char(' ')) => {
            if let Some(plant) = app.selected_plant() {
                let id = plant.id.clone();
                app.apply(Event::ToggleFavorite(id));
            }
        }
        (KeyModifiers::NONE, KeyCode::Char('a')) => {
            app.apply(Event::OpenCreate);
            open_form(app);
        }
        (KeyModifiers::NONE, KeyCode::Char('e') | KeyCode::Enter) => {
            if let Some(plant) = app.selected_plant() {
                let id = plant.id.clone();
                app.apply(Event::OpenEdit(id));
                open_form(app);
            }
        }
        (KeyModifiers::NONE, KeyCode::Char('r')) => app.apply(Event::Reload),
        _ => {}
    }
}

fn open_form(app: &mut App) {
    if app.catalog.form().is_some() {
        app.mode = Mode::Form;
        app.focus_field(FormField::Name);
    }
}
