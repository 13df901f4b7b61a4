use std::path::PathBuf;

use super::config::CatalogConfig;

/// A discovered catalog: where it lives and how it is configured
#[derive(Debug, Clone)]
pub struct CatalogDir {
    /// Directory containing `frond/`
    pub root: PathBuf,
    /// Path to the `frond/` directory
    pub dir: PathBuf,
    /// Parsed catalog.toml
    pub config: CatalogConfig,
}

impl CatalogDir {
    pub fn plants_path(&self) -> PathBuf {
        self.dir.join("plants.json")
    }

    pub fn log_path(&self) -> PathBuf {
        self.dir.join("frond.log")
    }
}
