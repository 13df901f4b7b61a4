use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::model::plant::Plant;
use crate::tui::app::App;
use crate::util::unicode;

use super::helpers::{FAVORITE_MARK, push_right_aligned};
use super::push_highlighted_spans;

/// Render the visible plants, one per row, keeping the cursor in view
pub fn render_list_view(frame: &mut Frame, app: &mut App, area: Rect) {
    let bg = app.theme.background;
    let height = area.height as usize;

    if app.catalog.visible_len() == 0 {
        let lines = empty_lines(app);
        frame.render_widget(
            Paragraph::new(lines).style(Style::default().bg(bg)),
            area,
        );
        return;
    }

    // Scroll so the cursor row is visible
    if app.cursor < app.scroll_offset {
        app.scroll_offset = app.cursor;
    } else if height > 0 && app.cursor >= app.scroll_offset + height {
        app.scroll_offset = app.cursor + 1 - height;
    }

    let app: &App = app;
    let search_re = app.active_search_re();
    let width = area.width as usize;
    let lines: Vec<Line> = app
        .catalog
        .visible()
        .enumerate()
        .skip(app.scroll_offset)
        .take(height)
        .map(|(i, plant)| plant_row(app, plant, i == app.cursor, width, search_re.as_ref()))
        .collect();

    frame.render_widget(Paragraph::new(lines).style(Style::default().bg(bg)), area);
}

fn plant_row(
    app: &App,
    plant: &Plant,
    selected: bool,
    width: usize,
    search_re: Option<&regex::Regex>,
) -> Line<'static> {
    let row_bg = if selected {
        app.theme.selection_bg
    } else {
        app.theme.background
    };
    let bg_style = Style::default().bg(row_bg);
    let name_style = if selected {
        Style::default()
            .fg(app.theme.text_bright)
            .bg(row_bg)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(app.theme.text).bg(row_bg)
    };
    let match_style = Style::default()
        .fg(app.theme.search_match_fg)
        .bg(app.theme.search_match_bg);

    let difficulty = plant.fields.difficulty;
    let level = plant.difficulty_label();
    let right = vec![
        Span::styled(
            level,
            Style::default()
                .fg(app.theme.difficulty_color(difficulty))
                .bg(row_bg),
        ),
        Span::styled(" ", bg_style),
    ];

    let mut spans = vec![Span::styled(" ", bg_style)];
    if plant.is_favorite() {
        spans.push(Span::styled(
            FAVORITE_MARK,
            Style::default().fg(app.theme.yellow).bg(row_bg),
        ));
    } else {
        spans.push(Span::styled(" ", bg_style));
    }
    spans.push(Span::styled(" ", bg_style));

    // Leave room for the difficulty column and a gap
    let name_room = width.saturating_sub(3 + unicode::display_width(level) + 2);
    let name = unicode::truncate_to_width(plant.name(), name_room);
    push_highlighted_spans(&mut spans, &name, name_style, match_style, search_re);

    push_right_aligned(&mut spans, right, width, bg_style);
    Line::from(spans)
}

fn empty_lines(app: &App) -> Vec<Line<'static>> {
    let bg = app.theme.background;
    if app.catalog.is_loading() {
        return vec![
            Line::default(),
            Line::from(Span::styled(
                "  Loading plants\u{2026}",
                Style::default().fg(app.theme.dim).bg(bg),
            )),
        ];
    }
    let hint = if app.catalog.filter().is_active() {
        "Try adjusting your search or filters"
    } else {
        "Press a to add your first plant"
    };
    vec![
        Line::default(),
        Line::from(Span::styled(
            "  No plants found",
            Style::default().fg(app.theme.text_bright).bg(bg),
        )),
        Line::from(Span::styled(
            format!("  {}", hint),
            Style::default().fg(app.theme.dim).bg(bg),
        )),
    ]
}
