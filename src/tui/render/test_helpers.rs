use std::path::PathBuf;

use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;

use crate::model::catalog_dir::CatalogDir;
use crate::model::config::CatalogConfig;
use crate::model::plant::{Plant, PlantId};
use crate::ops::catalog::Event;
use crate::ops::seed;
use crate::tui::app::App;

pub const TERM_W: u16 = 80;
pub const TERM_H: u16 = 24;

/// Render into an in-memory buffer and return plain text (no styles).
pub fn render_to_string<F>(w: u16, h: u16, f: F) -> String
where
    F: FnOnce(&mut ratatui::Frame, Rect),
{
    let backend = TestBackend::new(w, h);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|frame| {
            let area = frame.area();
            f(frame, area);
        })
        .unwrap();

    let buf = terminal.backend().buffer().clone();
    let w = buf.area.width as usize;
    let lines: Vec<String> = buf
        .content
        .chunks(w)
        .map(|row| {
            let s: String = row.iter().map(|cell| cell.symbol()).collect();
            s.trim_end().to_string()
        })
        .collect();

    // Trim trailing blank lines
    let end = lines
        .iter()
        .rposition(|l| !l.is_empty())
        .map_or(0, |i| i + 1);
    lines[..end].join("\n")
}

/// A catalog directory that is never touched on disk. Seeding is off so
/// an empty load stays empty.
pub fn test_catalog() -> CatalogDir {
    let mut config = CatalogConfig::default();
    config.seed.on_empty = false;
    CatalogDir {
        root: PathBuf::from("/tmp/test-frond"),
        dir: PathBuf::from("/tmp/test-frond/frond"),
        config,
    }
}

/// The three sample ferns with fixed ids `p-1`, `p-2`, `p-3`.
pub fn sample_plants() -> Vec<Plant> {
    seed::sample_plants()
        .into_iter()
        .enumerate()
        .map(|(i, fields)| Plant::new(PlantId::new(format!("p-{}", i + 1)), fields))
        .collect()
}

/// Build an App whose collection has finished loading with `plants`.
pub fn app_with_plants(plants: Vec<Plant>) -> App {
    let mut app = App::new(&test_catalog());
    app.apply(Event::Loaded(Ok(plants)));
    app
}
