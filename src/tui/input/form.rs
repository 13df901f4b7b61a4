use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::ops::catalog::Event;
use crate::ops::form::{FieldValue, FormField};
use crate::tui::app::App;

use super::{LineEdit, edit_line};

pub(super) fn handle_form(app: &mut App, key: KeyEvent) {
    // Cancel is always available, even mid-save
    if key.code == KeyCode::Esc {
        app.apply(Event::Cancel);
        return;
    }
    if app.catalog.is_submitting() {
        return;
    }

    let field = app.form_focus;
    match (key.modifiers, key.code) {
        (_, KeyCode::Enter) => submit(app),
        (_, KeyCode::Tab | KeyCode::Down) => app.focus_field(field.next()),
        (_, KeyCode::BackTab | KeyCode::Up) => app.focus_field(field.prev()),
        (KeyModifiers::NONE, KeyCode::Left) if !field.is_text() => {
            app.apply(Event::CycleField {
                field,
                forward: false,
            });
        }
        (KeyModifiers::NONE, KeyCode::Right | KeyCode::Char(' ')) if !field.is_text() => {
            app.apply(Event::CycleField {
                field,
                forward: true,
            });
        }
        _ if field.is_text() => {
            if edit_line(&mut app.field_input, key) == LineEdit::Changed {
                let text = app.field_input.as_str().to_string();
                app.apply(Event::EditField(field, FieldValue::Text(text)));
            }
        }
        _ => {}
    }
}

fn submit(app: &mut App) {
    app.apply(Event::Submit);
    // Validation failed: jump to the first field that needs attention
    let first_error = app
        .catalog
        .form()
        .filter(|_| !app.catalog.is_submitting())
        .and_then(|form| form.errors().first())
        .map(|e| e.field);
    if let Some(field) = first_error {
        app.focus_field(field);
    }
}
