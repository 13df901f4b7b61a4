use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Image shown when a plant has no image of its own
pub const DEFAULT_PLACEHOLDER_IMAGE: &str =
    "https://images.unsplash.com/photo-1518531933037-91b2f5f229cc?w=400&h=300&fit=crop";

/// Configuration from catalog.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogConfig {
    #[serde(default)]
    pub catalog: CatalogInfo,
    #[serde(default)]
    pub seed: SeedConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogInfo {
    #[serde(default = "default_catalog_name")]
    pub name: String,
}

impl Default for CatalogInfo {
    fn default() -> Self {
        CatalogInfo {
            name: default_catalog_name(),
        }
    }
}

fn default_catalog_name() -> String {
    "Fern Collection".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedConfig {
    /// Seed the sample plants when the TUI loads an empty catalog
    #[serde(default = "default_true")]
    pub on_empty: bool,
}

impl Default for SeedConfig {
    fn default() -> Self {
        SeedConfig { on_empty: true }
    }
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_true")]
    pub show_key_hints: bool,
    #[serde(default = "default_placeholder")]
    pub placeholder_image: String,
    /// Hex overrides for theme colors, keyed by theme slot name
    #[serde(default)]
    pub colors: HashMap<String, String>,
    /// Hex overrides keyed by difficulty (easy, medium, hard)
    #[serde(default)]
    pub difficulty_colors: HashMap<String, String>,
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig {
            show_key_hints: true,
            placeholder_image: default_placeholder(),
            colors: HashMap::new(),
            difficulty_colors: HashMap::new(),
        }
    }
}

fn default_placeholder() -> String {
    DEFAULT_PLACEHOLDER_IMAGE.to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// tracing filter directive, e.g. "info" or "frond=debug"
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        LogConfig {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}
