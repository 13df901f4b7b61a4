use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::ops::filter::DifficultyFilter;
use crate::tui::app::App;
use crate::util::unicode;

use super::helpers::{FAVORITE_MARK, push_right_aligned};

/// Render the catalog name and filter chips, with a separator line below
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1)])
        .split(area);

    let bg = app.theme.background;
    let bg_style = Style::default().bg(bg);
    let width = chunks[0].width as usize;

    let mut spans = vec![
        Span::styled(" ", bg_style),
        Span::styled(
            app.name.clone(),
            Style::default()
                .fg(app.theme.highlight)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ),
    ];
    push_right_aligned(&mut spans, filter_chips(app), width, bg_style);
    frame.render_widget(
        Paragraph::new(Line::from(spans)).style(bg_style),
        chunks[0],
    );

    let sep = Span::styled(
        "\u{2500}".repeat(chunks[1].width as usize),
        Style::default().fg(app.theme.dim).bg(bg),
    );
    frame.render_widget(Paragraph::new(Line::from(sep)), chunks[1]);
}

/// Active filters as chips; "all plants" when nothing is filtered
fn filter_chips(app: &App) -> Vec<Span<'static>> {
    let bg = app.theme.background;
    let filter = app.catalog.filter();
    let chip = |text: String, fg: Color| {
        Span::styled(
            format!(" {} ", text),
            Style::default().fg(fg).bg(app.theme.selection_bg),
        )
    };
    let gap = || Span::styled(" ", Style::default().bg(bg));

    let mut spans = Vec::new();
    if !filter.search.is_empty() {
        let shown = unicode::truncate_to_width(&filter.search, 20);
        spans.push(chip(format!("/{}", shown), app.theme.text_bright));
        spans.push(gap());
    }
    if let DifficultyFilter::Only(d) = filter.difficulty {
        spans.push(chip(
            filter.difficulty.label().to_string(),
            app.theme.difficulty_color(Some(d)),
        ));
        spans.push(gap());
    }
    if filter.favorites_only {
        spans.push(chip(format!("{} Favorites", FAVORITE_MARK), app.theme.yellow));
        spans.push(gap());
    }
    if spans.is_empty() {
        spans.push(Span::styled(
            "all plants ",
            Style::default().fg(app.theme.dim).bg(bg),
        ));
    }
    spans
}
