pub mod detail_pane;
pub mod form_popup;
pub mod header;
mod helpers;
pub mod list_view;
pub mod status_row;

#[cfg(test)]
pub mod test_helpers;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::Style;
use ratatui::text::Span;
use ratatui::widgets::Block;
use regex::Regex;

use super::app::App;

/// Main render function: dispatches to sub-renderers
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    // Background fill
    let bg_style = Style::default().bg(app.theme.background);
    frame.render_widget(Block::default().style(bg_style), area);

    // Layout: header (2 rows) | content | status row (1 row)
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // header + separator
            Constraint::Min(1),    // content area
            Constraint::Length(1), // status row
        ])
        .split(area);

    header::render_header(frame, app, chunks[0]);

    // Content: list | divider | detail
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(45),
            Constraint::Length(1),
            Constraint::Min(1),
        ])
        .split(chunks[1]);

    list_view::render_list_view(frame, app, columns[0]);
    helpers::render_divider(frame, app, columns[1]);
    detail_pane::render_detail_pane(frame, app, columns[2]);

    // Form popup (rendered on top of the content)
    if app.catalog.form().is_some() {
        form_popup::render_form_popup(frame, app, chunks[1]);
    }

    status_row::render_status_row(frame, app, chunks[2]);
}

/// Append `text` as spans, styling search matches with `highlight_style`.
/// Without a pattern the whole text is one `base_style` span.
pub(super) fn push_highlighted_spans(
    spans: &mut Vec<Span<'_>>,
    text: &str,
    base_style: Style,
    highlight_style: Style,
    search_re: Option<&Regex>,
) {
    let matches = search_re
        .into_iter()
        .flat_map(|re| re.find_iter(text))
        .filter(|m| !m.is_empty());
    let mut plain_from = 0;
    for m in matches {
        if m.start() > plain_from {
            spans.push(Span::styled(text[plain_from..m.start()].to_string(), base_style));
        }
        spans.push(Span::styled(m.as_str().to_string(), highlight_style));
        plain_from = m.end();
    }
    if plain_from < text.len() || text.is_empty() {
        spans.push(Span::styled(text[plain_from..].to_string(), base_style));
    }
}
