use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};

use crate::model::plant::Plant;
use crate::tui::app::App;
use crate::util::unicode;

use super::helpers::FAVORITE_MARK;
use super::push_highlighted_spans;

const LABEL_WIDTH: usize = 12;

/// Render every field of the plant under the cursor
pub fn render_detail_pane(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let lines = match app.selected_plant() {
        Some(plant) => detail_lines(app, plant, area.width as usize),
        None => Vec::new(),
    };
    let paragraph = Paragraph::new(lines)
        .style(Style::default().bg(bg))
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

fn detail_lines(app: &App, plant: &Plant, width: usize) -> Vec<Line<'static>> {
    let theme = &app.theme;
    let bg = theme.background;
    let search_re = app.active_search_re();
    let match_style = Style::default()
        .fg(theme.search_match_fg)
        .bg(theme.search_match_bg);
    let text = Style::default().fg(theme.text).bg(bg);

    let mut lines = Vec::new();

    // Title
    let mut title = vec![Span::styled(" ", text)];
    push_highlighted_spans(
        &mut title,
        plant.name(),
        Style::default()
            .fg(theme.text_bright)
            .bg(bg)
            .add_modifier(Modifier::BOLD),
        match_style,
        search_re.as_ref(),
    );
    if plant.is_favorite() {
        title.push(Span::styled(" ", text));
        title.push(Span::styled(
            FAVORITE_MARK,
            Style::default().fg(theme.yellow).bg(bg),
        ));
    }
    lines.push(Line::from(title));

    let mut sci = vec![Span::styled(" ", text)];
    push_highlighted_spans(
        &mut sci,
        plant.scientific_name(),
        Style::default()
            .fg(theme.dim)
            .bg(bg)
            .add_modifier(Modifier::ITALIC),
        match_style,
        search_re.as_ref(),
    );
    lines.push(Line::from(sci));
    lines.push(Line::default());

    // Care facts
    let field = |label: &str, value: String, style: Style| {
        Line::from(vec![
            Span::styled(
                format!(" {}", unicode::pad_to_width(label, LABEL_WIDTH)),
                Style::default().fg(theme.dim).bg(bg),
            ),
            Span::styled(value, style),
        ])
    };
    lines.push(field(
        "Difficulty",
        plant.difficulty_label().to_string(),
        Style::default()
            .fg(theme.difficulty_color(plant.fields.difficulty))
            .bg(bg),
    ));
    lines.push(field(
        "Sun",
        format!("{} {}", plant.sun_icon(), plant.sun_label()),
        text,
    ));
    lines.push(field(
        "Water",
        format!("{} {}", plant.water_icon(), plant.water_label()),
        text,
    ));
    if let Some(height) = &plant.fields.height {
        lines.push(field("Height", height.clone(), text));
    }
    if let Some(habitat) = &plant.fields.habitat {
        lines.push(field("Habitat", habitat.clone(), text));
    }
    // URLs have no break points; keep the reference on the label's row
    lines.push(field(
        "Image",
        unicode::truncate_to_width(
            plant.image_or(&app.ui.placeholder_image),
            width.saturating_sub(LABEL_WIDTH + 1),
        ),
        Style::default().fg(theme.dim).bg(bg),
    ));

    // Description
    if !plant.description().is_empty() {
        lines.push(Line::default());
        for para in plant.description().lines() {
            let mut spans = vec![Span::styled(" ", text)];
            push_highlighted_spans(&mut spans, para, text, match_style, search_re.as_ref());
            lines.push(Line::from(spans));
        }
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::plant::{PlantFields, PlantId};
    use crate::tui::render::test_helpers::*;

    fn render_detail(app: &App) -> String {
        render_to_string(44, 16, |frame, area| render_detail_pane(frame, app, area))
    }

    #[test]
    fn shows_all_fields_of_selection() {
        let mut app = app_with_plants(sample_plants());
        app.jump_to(1);
        let output = render_detail(&app);
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines[0], " Maidenhair Fern \u{2605}");
        assert_eq!(lines[1], " Adiantum raddianum");
        assert_eq!(lines[3], " Difficulty  Hard");
        assert!(lines[4].starts_with(" Sun "));
        assert!(lines[4].ends_with("Shade"));
        assert!(lines[5].ends_with("High"));
        assert_eq!(lines[6], " Height      1-2 feet");
        assert_eq!(lines[7], " Habitat     Moist, shaded forest floors");
        assert!(lines[8].starts_with(" Image       https://images.unsplash.com"));
        assert!(lines[8].ends_with('\u{2026}'));
        assert_eq!(unicode::display_width(lines[8]), 44);
        assert_eq!(lines[9], "");
        assert!(!output.contains("fit=crop"));
        assert!(output.contains("Delicate, lacy fronds"));
    }

    #[test]
    fn absent_values_fall_back() {
        let plant = Plant::new(
            PlantId::new("bare"),
            PlantFields {
                name: "Holly Fern".into(),
                scientific_name: "Cyrtomium falcatum".into(),
                ..Default::default()
            },
        );
        let mut app = app_with_plants(vec![plant]);
        app.ui.placeholder_image = "placeholder.jpg".into();
        let output = render_detail(&app);
        assert!(output.contains(" Difficulty  unknown"));
        assert!(output.contains("unknown"));
        assert!(output.contains(" Image       placeholder.jpg"));
        assert!(!output.contains("Height"));
    }

    #[test]
    fn empty_selection_renders_nothing() {
        let app = app_with_plants(Vec::new());
        assert_eq!(render_detail(&app), "");
    }
}
