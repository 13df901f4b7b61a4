use ratatui::style::Color;

use crate::model::UiConfig;
use crate::model::plant::Difficulty;

/// Parsed color theme for the TUI
#[derive(Debug, Clone)]
pub struct Theme {
    pub background: Color,
    pub text: Color,
    pub text_bright: Color,
    pub highlight: Color,
    pub dim: Color,
    pub red: Color,
    pub yellow: Color,
    pub green: Color,
    pub selection_bg: Color,
    pub search_match_bg: Color,
    pub search_match_fg: Color,
    pub easy: Color,
    pub medium: Color,
    pub hard: Color,
}

impl Default for Theme {
    fn default() -> Self {
        let red = Color::Rgb(0xFF, 0x55, 0x55);
        let yellow = Color::Rgb(0xFF, 0xD1, 0x66);
        let green = Color::Rgb(0x4A, 0xDE, 0x80);
        Theme {
            background: Color::Rgb(0x0B, 0x1A, 0x10),
            text: Color::Rgb(0xB8, 0xD8, 0xBE),
            text_bright: Color::Rgb(0xFF, 0xFF, 0xFF),
            highlight: Color::Rgb(0x7B, 0xD8, 0x8F),
            dim: Color::Rgb(0x56, 0x73, 0x5C),
            red,
            yellow,
            green,
            selection_bg: Color::Rgb(0x1C, 0x3A, 0x25),
            search_match_bg: Color::Rgb(0xFF, 0xD1, 0x66),
            search_match_fg: Color::Rgb(0x0B, 0x1A, 0x10),
            easy: green,
            medium: yellow,
            hard: red,
        }
    }
}

/// Parse a hex color string like "#FF4444" into an RGB Color
fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}

impl Theme {
    /// Create a theme from the catalog's UI config, falling back to defaults
    pub fn from_config(ui: &UiConfig) -> Self {
        let mut theme = Theme::default();

        // [ui.colors]
        for (key, value) in &ui.colors {
            let Some(color) = parse_hex_color(value) else {
                continue;
            };
            match key.as_str() {
                "background" => theme.background = color,
                "text" => theme.text = color,
                "text_bright" => theme.text_bright = color,
                "highlight" => theme.highlight = color,
                "dim" => theme.dim = color,
                "red" => theme.red = color,
                "yellow" => theme.yellow = color,
                "green" => theme.green = color,
                "selection_bg" => theme.selection_bg = color,
                "search_match_bg" => theme.search_match_bg = color,
                "search_match_fg" => theme.search_match_fg = color,
                _ => {}
            }
        }

        // [ui.difficulty_colors]
        for (key, value) in &ui.difficulty_colors {
            let (Ok(difficulty), Some(color)) = (key.parse::<Difficulty>(), parse_hex_color(value))
            else {
                continue;
            };
            match difficulty {
                Difficulty::Easy => theme.easy = color,
                Difficulty::Medium => theme.medium = color,
                Difficulty::Hard => theme.hard = color,
            }
        }

        theme
    }

    /// Color for a difficulty; absent values are dim
    pub fn difficulty_color(&self, difficulty: Option<Difficulty>) -> Color {
        match difficulty {
            Some(Difficulty::Easy) => self.easy,
            Some(Difficulty::Medium) => self.medium,
            Some(Difficulty::Hard) => self.hard,
            None => self.dim,
        }
    }
}
