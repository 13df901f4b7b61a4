use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::ops::catalog::NoticeKind;
use crate::tui::app::{App, Mode};

use super::helpers::{cursor_window, push_right_aligned};

const BROWSE_HINTS: &str = "a add  e edit  / search  d level  f favs  q quit";
const FORM_HINTS: &str = "Tab next  \u{2190}/\u{2192} change  Enter save  Esc cancel";
const SEARCH_HINTS: &str = "Enter keep  Esc clear";

/// Render the status row (bottom of screen)
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let bg_style = Style::default().bg(bg);
    let width = area.width as usize;
    let dim = Style::default().fg(app.theme.dim).bg(bg);

    let mut spans: Vec<Span> = Vec::new();
    let hints = match app.mode {
        Mode::Search => {
            // Search prompt: /pattern▌
            let input = &app.search_input;
            let room = width.saturating_sub(1 + SEARCH_HINTS.len() + 2);
            let (before, after) = cursor_window(input.as_str(), input.cursor(), room);
            let text = Style::default().fg(app.theme.text_bright).bg(bg);
            spans.push(Span::styled("/", text));
            spans.push(Span::styled(before.to_string(), text));
            spans.push(Span::styled(
                "\u{258C}",
                Style::default().fg(app.theme.highlight).bg(bg),
            ));
            spans.push(Span::styled(after.to_string(), text));
            SEARCH_HINTS
        }
        Mode::Browse | Mode::Form => {
            match app.catalog.notice() {
                Some(notice) => {
                    let fg = match notice.kind {
                        NoticeKind::Info => app.theme.green,
                        NoticeKind::Error => app.theme.red,
                    };
                    spans.push(Span::styled(
                        format!(" {}", notice.text),
                        Style::default().fg(fg).bg(bg),
                    ));
                }
                None => {
                    spans.push(Span::styled(
                        format!(" {}", app.catalog.summary()),
                        Style::default().fg(app.theme.text).bg(bg),
                    ));
                    if app.catalog.is_loading() {
                        spans.push(Span::styled("  loading\u{2026}", dim));
                    }
                }
            }
            if app.mode == Mode::Form {
                FORM_HINTS
            } else {
                BROWSE_HINTS
            }
        }
    };

    if app.ui.show_key_hints {
        let right = vec![Span::styled(hints, dim), Span::styled(" ", bg_style)];
        push_right_aligned(&mut spans, right, width, bg_style);
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(bg_style);
    frame.render_widget(paragraph, area);
}
