use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::App;
use crate::util::unicode;

pub(super) const FAVORITE_MARK: &str = "\u{2605}";

/// Compute total display width of a slice of spans
pub(super) fn spans_width(spans: &[Span]) -> usize {
    spans
        .iter()
        .map(|s| unicode::display_width(&s.content))
        .sum()
}

/// Pad `spans` out to `width` cells and append `right`, if it fits
pub(super) fn push_right_aligned<'a>(
    spans: &mut Vec<Span<'a>>,
    right: Vec<Span<'a>>,
    width: usize,
    bg: Style,
) {
    let used = spans_width(spans);
    let right_width = spans_width(&right);
    if used + right_width < width {
        spans.push(Span::styled(" ".repeat(width - used - right_width), bg));
        spans.extend(right);
    }
}

/// Vertical line between the list and the detail pane
pub(super) fn render_divider(frame: &mut Frame, app: &App, area: Rect) {
    let style = Style::default().fg(app.theme.dim).bg(app.theme.background);
    let lines: Vec<Line> = (0..area.height)
        .map(|_| Line::from(Span::styled("\u{2502}", style)))
        .collect();
    frame.render_widget(Paragraph::new(lines), area);
}

pub(super) fn centered_rect_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width, height)
}

/// The slice of `text` to show in `width` cells so that the cursor (a byte
/// offset) stays visible. Returns the text before and after the cursor.
pub(super) fn cursor_window(text: &str, cursor: usize, width: usize) -> (&str, &str) {
    let (before, after) = text.split_at(cursor);
    let mut start = 0;
    // Keep one cell for the cursor itself
    while unicode::display_width(&before[start..]) + 1 > width {
        match unicode::next_grapheme_boundary(before, start) {
            Some(next) => start = next,
            None => break,
        }
    }
    (&before[start..], after)
}
