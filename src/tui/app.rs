use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crossterm::event::{self, Event as TermEvent, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use regex::Regex;
use tracing::{info, warn};

use crate::io::catalog_io::open_catalog;
use crate::io::json_store::JsonFileStore;
use crate::io::state::{UiState, read_ui_state, write_ui_state};
use crate::io::watcher::{CatalogWatcher, FileEvent};
use crate::model::catalog_dir::CatalogDir;
use crate::model::config::UiConfig;
use crate::model::plant::{Plant, PlantId};
use crate::ops::catalog::{Catalog, Effect, Event};
use crate::ops::filter::{DifficultyFilter, FilterState};
use crate::ops::form::FormField;
use crate::util::line_buffer::LineBuffer;

use super::input;
use super::render;
use super::theme::Theme;
use super::worker::StoreWorker;

/// Current interaction mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Browse,
    /// Live search: every keystroke updates the filter
    Search,
    /// The add/edit popup is open
    Form,
}

/// Main application state
pub struct App {
    pub catalog: Catalog,
    pub catalog_dir: PathBuf,
    /// Display name from catalog.toml
    pub name: String,
    pub ui: UiConfig,
    pub theme: Theme,
    pub mode: Mode,
    pub should_quit: bool,
    /// Index into the visible list
    pub cursor: usize,
    /// First visible row of the list
    pub scroll_offset: usize,
    /// Search prompt buffer (Search mode)
    pub search_input: LineBuffer,
    /// Focused form field (Form mode)
    pub form_focus: FormField,
    /// Edit buffer for the focused field when it holds text
    pub field_input: LineBuffer,
    /// Id under the cursor, kept across reloads and filter changes
    selected: Option<PlantId>,
    /// Effects waiting to be handed to the store worker
    pending: Vec<Effect>,
}

impl App {
    pub fn new(catalog: &CatalogDir) -> Self {
        App {
            catalog: Catalog::new(catalog.config.seed.on_empty),
            catalog_dir: catalog.dir.clone(),
            name: catalog.config.catalog.name.clone(),
            ui: catalog.config.ui.clone(),
            theme: Theme::from_config(&catalog.config.ui),
            mode: Mode::Browse,
            should_quit: false,
            cursor: 0,
            scroll_offset: 0,
            search_input: LineBuffer::default(),
            form_focus: FormField::Name,
            field_input: LineBuffer::default(),
            selected: None,
            pending: Vec::new(),
        }
    }

    /// Apply an event to the catalog, queue its effects, and keep the
    /// cursor on the same plant where possible.
    pub fn apply(&mut self, event: Event) {
        let effects = self.catalog.apply(event);
        self.pending.extend(effects);
        self.sync_selection();
        if self.mode == Mode::Form && self.catalog.form().is_none() {
            self.mode = Mode::Browse;
        }
    }

    /// Drain effects queued since the last call
    pub fn take_effects(&mut self) -> Vec<Effect> {
        std::mem::take(&mut self.pending)
    }

    pub fn selected_plant(&self) -> Option<&Plant> {
        self.catalog.visible_at(self.cursor)
    }

    /// Move the cursor by `delta` rows, clamped to the list
    pub fn move_cursor(&mut self, delta: isize) {
        let len = self.catalog.visible_len();
        if len == 0 {
            return;
        }
        let target = self.cursor.saturating_add_signed(delta).min(len - 1);
        self.cursor = target;
        self.selected = self.catalog.visible_at(target).map(|p| p.id.clone());
    }

    pub fn jump_to(&mut self, index: usize) {
        self.cursor = 0;
        self.move_cursor(index as isize);
    }

    fn sync_selection(&mut self) {
        let len = self.catalog.visible_len();
        if let Some(id) = &self.selected
            && let Some(pos) = self.catalog.visible_position(id)
        {
            self.cursor = pos;
            return;
        }
        self.cursor = self.cursor.min(len.saturating_sub(1));
        // A restored selection waits for the first load
        if self.catalog.is_loading() && self.catalog.plants().is_empty() {
            return;
        }
        self.selected = self.catalog.visible_at(self.cursor).map(|p| p.id.clone());
    }

    /// Focus a form field and load its text into the edit buffer
    pub fn focus_field(&mut self, field: FormField) {
        self.form_focus = field;
        let text = self
            .catalog
            .form()
            .and_then(|form| form.text(field))
            .unwrap_or_default();
        self.field_input = LineBuffer::new(text);
    }

    /// Case-insensitive regex for highlighting the current search text
    pub fn active_search_re(&self) -> Option<Regex> {
        let pattern = self.catalog.filter().search.trim();
        if pattern.is_empty() {
            return None;
        }
        Regex::new(&format!("(?i){}", regex::escape(pattern))).ok()
    }
}

/// Restore filter inputs and selection from .state.json
pub fn restore_ui_state(app: &mut App) {
    let Some(state) = read_ui_state(&app.catalog_dir) else {
        return;
    };
    let difficulty = state.difficulty.parse::<DifficultyFilter>().unwrap_or_default();
    let filter = FilterState {
        search: state.search,
        difficulty,
        favorites_only: state.favorites_only,
    };
    app.catalog = std::mem::take(&mut app.catalog).with_filter(filter);
    app.selected = state.selected.map(PlantId::new);
}

/// Save filter inputs and selection to .state.json
pub fn save_ui_state(app: &App) {
    let filter = app.catalog.filter();
    let state = UiState {
        search: filter.search.clone(),
        difficulty: filter.difficulty.to_string(),
        favorites_only: filter.favorites_only,
        selected: app.selected.as_ref().map(|id| id.to_string()),
    };
    if let Err(e) = write_ui_state(&app.catalog_dir, &state) {
        warn!(error = %e, "could not save UI state");
    }
}

/// Run the TUI application
pub fn run(explicit: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let catalog = open_catalog(explicit)?;
    crate::logging::init_file(&catalog.log_path(), &catalog.config.log.level)?;
    info!(dir = %catalog.dir.display(), "starting TUI");

    let store = JsonFileStore::new(&catalog.dir);
    store.ensure_file()?;
    let worker = StoreWorker::spawn(store, Some(catalog.dir.clone()))?;
    let watcher = match CatalogWatcher::start(&catalog.dir) {
        Ok(w) => Some(w),
        Err(e) => {
            warn!(error = %e, "file watcher unavailable; external edits need `r`");
            None
        }
    };

    let mut app = App::new(&catalog);

    // Restore saved UI state, then fetch
    restore_ui_state(&mut app);
    app.apply(Event::Reload);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app, &worker, watcher.as_ref());

    // Save UI state before exit
    save_ui_state(&app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    worker: &StoreWorker,
    watcher: Option<&CatalogWatcher>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut save_counter = 0u32;
    loop {
        for effect in app.take_effects() {
            if !worker.send(effect) {
                warn!("store worker stopped");
            }
        }

        terminal.draw(|frame| render::render(frame, app))?;

        if event::poll(Duration::from_millis(100))?
            && let TermEvent::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            input::handle_key(app, key);
            // Debounced state save: every ~5 key presses
            save_counter += 1;
            if save_counter >= 5 {
                save_ui_state(app);
                save_counter = 0;
            }
        }

        for reply in worker.poll() {
            app.apply(reply);
        }

        if let Some(FileEvent::PlantsChanged) = watcher.and_then(CatalogWatcher::poll) {
            app.apply(Event::Reload);
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::render::test_helpers::{app_with_plants, sample_plants};
    use tempfile::TempDir;

    #[test]
    fn selection_follows_plant_across_filter_changes() {
        let mut app = app_with_plants(sample_plants());
        app.jump_to(1);
        assert_eq!(app.selected_plant().unwrap().name(), "Maidenhair Fern");

        app.apply(Event::SetFavoritesOnly(true));
        assert_eq!(app.cursor, 0);
        assert_eq!(app.selected_plant().unwrap().name(), "Maidenhair Fern");

        app.apply(Event::SetFavoritesOnly(false));
        assert_eq!(app.cursor, 1);
    }

    #[test]
    fn cursor_clamps_when_selection_filtered_out() {
        let mut app = app_with_plants(sample_plants());
        app.jump_to(2);
        app.apply(Event::SetSearch("boston".into()));
        assert_eq!(app.cursor, 0);
        assert_eq!(app.selected_plant().unwrap().name(), "Boston Fern");
    }

    #[test]
    fn move_cursor_stays_in_bounds() {
        let mut app = app_with_plants(sample_plants());
        app.move_cursor(-1);
        assert_eq!(app.cursor, 0);
        app.move_cursor(10);
        assert_eq!(app.cursor, 2);
    }

    #[test]
    fn search_regex_escapes_input() {
        let mut app = app_with_plants(sample_plants());
        assert!(app.active_search_re().is_none());
        app.apply(Event::SetSearch("bird's (nest".into()));
        let re = app.active_search_re().unwrap();
        assert!(re.is_match("BIRD'S (NEST"));
    }

    #[test]
    fn ui_state_round_trip() {
        let dir = TempDir::new().unwrap();
        let mut app = app_with_plants(sample_plants());
        app.catalog_dir = dir.path().to_path_buf();
        app.apply(Event::SetSearch("fern".into()));
        app.apply(Event::SetDifficulty("hard".parse().unwrap()));
        app.jump_to(0);
        save_ui_state(&app);

        let mut restored = app_with_plants(Vec::new());
        restored.catalog_dir = dir.path().to_path_buf();
        restore_ui_state(&mut restored);
        assert_eq!(restored.catalog.filter().search, "fern");
        assert_eq!(restored.catalog.filter().difficulty.to_string(), "hard");

        // Selection is applied once plants arrive
        restored.apply(Event::Reload);
        restored.apply(Event::Loaded(Ok(sample_plants())));
        assert_eq!(restored.selected_plant().unwrap().name(), "Maidenhair Fern");
    }

    #[test]
    fn save_reply_closes_form_mode() {
        let mut app = app_with_plants(sample_plants());
        app.apply(Event::OpenCreate);
        app.mode = Mode::Form;
        app.apply(Event::Cancel);
        assert_eq!(app.mode, Mode::Browse);
    }
}
