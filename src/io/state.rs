use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Persisted TUI state (written to .state.json)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct UiState {
    /// Search text as typed
    #[serde(default)]
    pub search: String,
    /// Difficulty filter ("all", "easy", "medium", "hard")
    #[serde(default = "default_difficulty")]
    pub difficulty: String,
    #[serde(default)]
    pub favorites_only: bool,
    /// Id of the plant under the cursor
    #[serde(default)]
    pub selected: Option<String>,
}

fn default_difficulty() -> String {
    "all".to_string()
}

/// Read .state.json from the catalog directory
pub fn read_ui_state(catalog_dir: &Path) -> Option<UiState> {
    let path = catalog_dir.join(".state.json");
    let content = fs::read_to_string(&path).ok()?;
    serde_json::from_str(&content).ok()
}

/// Write .state.json to the catalog directory
pub fn write_ui_state(catalog_dir: &Path, state: &UiState) -> Result<(), std::io::Error> {
    let path = catalog_dir.join(".state.json");
    let content = serde_json::to_string_pretty(state)?;
    crate::io::recovery::atomic_write(&path, content.as_bytes())
}
