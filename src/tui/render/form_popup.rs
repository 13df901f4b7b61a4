use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::ops::form::{FieldValue, FormField, FormState};
use crate::tui::app::App;
use crate::util::unicode;

use super::helpers::{centered_rect_fixed, cursor_window};

const POPUP_WIDTH: u16 = 64;
const LABEL_WIDTH: usize = 22;

/// Render the add/edit popup over `area`
pub fn render_form_popup(frame: &mut Frame, app: &App, area: Rect) {
    let Some(form) = app.catalog.form() else {
        return;
    };
    let theme = &app.theme;
    let bg = theme.background;

    let inner_width = POPUP_WIDTH.min(area.width).saturating_sub(2) as usize;
    let value_width = inner_width.saturating_sub(LABEL_WIDTH + 2);

    let mut lines = vec![Line::default()];
    for field in FormField::ALL {
        let focused = field == app.form_focus;
        let mut spans = vec![label_span(app, field, focused)];
        spans.extend(value_spans(app, form, field, focused, value_width));
        lines.push(Line::from(spans));
        if let Some(message) = form.error_for(field) {
            lines.push(Line::from(Span::styled(
                format!("{}{}", " ".repeat(LABEL_WIDTH + 1), message),
                Style::default().fg(theme.red).bg(bg),
            )));
        }
    }
    lines.push(Line::default());
    lines.push(footer(app, form));

    let title = if form.is_edit() {
        " Edit Plant "
    } else {
        " Add New Plant "
    };
    let height = lines.len() as u16 + 2;
    let popup = centered_rect_fixed(POPUP_WIDTH, height, area);
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(
            title,
            Style::default()
                .fg(theme.text_bright)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ))
        .border_style(Style::default().fg(theme.highlight).bg(bg))
        .style(Style::default().bg(bg));

    frame.render_widget(
        Paragraph::new(lines)
            .block(block)
            .style(Style::default().bg(bg)),
        popup,
    );
}

fn label_span(app: &App, field: FormField, focused: bool) -> Span<'static> {
    let marker = if field.is_required() { " *" } else { "" };
    let label = format!("{}{}", field.label(), marker);
    let style = if focused {
        Style::default()
            .fg(app.theme.highlight)
            .bg(app.theme.background)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(app.theme.text).bg(app.theme.background)
    };
    Span::styled(
        format!(" {}", unicode::pad_to_width(&label, LABEL_WIDTH)),
        style,
    )
}

fn value_spans(
    app: &App,
    form: &FormState,
    field: FormField,
    focused: bool,
    width: usize,
) -> Vec<Span<'static>> {
    let theme = &app.theme;
    let bg = theme.background;
    let text = Style::default().fg(theme.text_bright).bg(bg);
    let dim = Style::default().fg(theme.dim).bg(bg);

    let choice = |label: &str| -> Vec<Span<'static>> {
        if focused {
            vec![
                Span::styled("\u{25C2} ", Style::default().fg(theme.highlight).bg(bg)),
                Span::styled(label.to_string(), text),
                Span::styled(" \u{25B8}", Style::default().fg(theme.highlight).bg(bg)),
            ]
        } else {
            vec![Span::styled(label.to_string(), text)]
        }
    };

    match form.get(field) {
        FieldValue::Text(_) if focused && !app.catalog.is_submitting() => {
            let input = &app.field_input;
            let (before, after) = cursor_window(input.as_str(), input.cursor(), width);
            let room = width.saturating_sub(unicode::display_width(before) + 1);
            vec![
                Span::styled(before.to_string(), text),
                Span::styled("\u{258C}", Style::default().fg(theme.highlight).bg(bg)),
                Span::styled(unicode::truncate_to_width(after, room), text),
            ]
        }
        FieldValue::Text(value) if value.is_empty() => {
            vec![Span::styled(
                unicode::truncate_to_width(placeholder(field), width),
                dim,
            )]
        }
        FieldValue::Text(value) => {
            vec![Span::styled(unicode::truncate_to_width(&value, width), text)]
        }
        FieldValue::Sun(v) => choice(v.map_or(NOT_SET, |s| s.label())),
        FieldValue::Water(v) => choice(v.map_or(NOT_SET, |w| w.label())),
        FieldValue::Difficulty(v) => {
            let mut spans = choice(v.map_or(NOT_SET, |d| d.label()));
            let idx = if focused { 1 } else { 0 };
            spans[idx].style = Style::default().fg(theme.difficulty_color(v)).bg(bg);
            spans
        }
        FieldValue::Flag(on) => {
            let mark = if on { "[x]" } else { "[ ]" };
            let style = if focused {
                Style::default().fg(theme.highlight).bg(bg)
            } else {
                text
            };
            vec![Span::styled(mark, style)]
        }
    }
}

const NOT_SET: &str = "Not set";

fn placeholder(field: FormField) -> &'static str {
    match field {
        FormField::Name => "e.g., Boston Fern",
        FormField::ScientificName => "e.g., Nephrolepis exaltata",
        FormField::Description => "Appearance, characteristics, care notes",
        FormField::Habitat => "e.g., Tropical rainforests",
        FormField::Height => "e.g., 1-3 feet",
        FormField::ImageUrl => "https://example.com/fern-image.jpg",
        _ => "",
    }
}

fn footer(app: &App, form: &FormState) -> Line<'static> {
    let theme = &app.theme;
    let bg = theme.background;
    if app.catalog.is_submitting() {
        return Line::from(Span::styled(
            " Saving\u{2026}",
            Style::default().fg(theme.yellow).bg(bg),
        ));
    }
    let button = if form.is_edit() {
        "Update Plant"
    } else {
        "Add Plant"
    };
    Line::from(vec![
        Span::styled(" ", Style::default().bg(bg)),
        Span::styled(
            format!("[ {} ]", button),
            Style::default()
                .fg(theme.background)
                .bg(theme.highlight)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            "  Enter save  Esc cancel",
            Style::default().fg(theme.dim).bg(bg),
        ),
    ])
}
