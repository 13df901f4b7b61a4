use std::fs;
use std::path::{Path, PathBuf};

use crate::model::catalog_dir::CatalogDir;
use crate::model::config::CatalogConfig;

/// Name of the catalog directory
pub const CATALOG_DIR: &str = "frond";
/// Name of the config file inside the catalog directory
pub const CONFIG_FILE: &str = "catalog.toml";

/// Error type for catalog directory operations
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("not a frond catalog: no frond/ directory found")]
    NotACatalog,
    #[error("a frond catalog already exists in {0}")]
    AlreadyExists(PathBuf),
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse catalog.toml: {0}")]
    ConfigParseError(#[from] toml::de::Error),
    #[error("io error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Discover a catalog by walking up from the given directory,
/// looking for a `frond/` subdirectory with a catalog.toml.
pub fn discover_catalog(start: &Path) -> Result<PathBuf, CatalogError> {
    let mut current = start.to_path_buf();
    loop {
        let dir = current.join(CATALOG_DIR);
        if dir.is_dir() && dir.join(CONFIG_FILE).exists() {
            return Ok(current);
        }
        if !current.pop() {
            return Err(CatalogError::NotACatalog);
        }
    }
}

/// Load the catalog rooted at `root` (the directory containing `frond/`).
pub fn load_catalog(root: &Path) -> Result<CatalogDir, CatalogError> {
    let dir = root.join(CATALOG_DIR);
    if !dir.is_dir() {
        return Err(CatalogError::NotACatalog);
    }
    let config = read_config(&dir)?;
    Ok(CatalogDir {
        root: root.to_path_buf(),
        dir,
        config,
    })
}

/// Resolve `-C <dir>` or the current directory to a loaded catalog.
/// An explicit directory may point at the root or at `frond/` itself.
pub fn open_catalog(explicit: Option<&Path>) -> Result<CatalogDir, CatalogError> {
    match explicit {
        Some(path) => {
            if path.file_name().and_then(|n| n.to_str()) == Some(CATALOG_DIR)
                && path.join(CONFIG_FILE).exists()
                && let Some(parent) = path.parent()
            {
                return load_catalog(parent);
            }
            load_catalog(path)
        }
        None => {
            let cwd = std::env::current_dir()?;
            let root = discover_catalog(&cwd)?;
            load_catalog(&root)
        }
    }
}

/// Read and parse catalog.toml. A missing file yields the defaults.
pub fn read_config(catalog_dir: &Path) -> Result<CatalogConfig, CatalogError> {
    let path = catalog_dir.join(CONFIG_FILE);
    if !path.exists() {
        return Ok(CatalogConfig::default());
    }
    let text = fs::read_to_string(&path).map_err(|e| CatalogError::ReadError {
        path: path.clone(),
        source: e,
    })?;
    Ok(toml::from_str(&text)?)
}

const CATALOG_TOML_TEMPLATE: &str = r##"[catalog]
name = "{name}"

[seed]
# Add the sample plants when the browser opens an empty catalog
on_empty = true

[log]
# tracing filter directive; RUST_LOG overrides it
level = "info"

# --- UI Customization ---
# Uncomment and edit to override defaults.

[ui]
# show_key_hints = false
# placeholder_image = "https://images.unsplash.com/photo-1518531933037-91b2f5f229cc?w=400&h=300&fit=crop"
#
# [ui.colors]
# background = "#0B1A10"
# text = "#B8D8BE"
# text_bright = "#FFFFFF"
# highlight = "#7BD88F"
# dim = "#56735C"
# red = "#FF5555"
# yellow = "#FFD166"
# green = "#4ADE80"
#
# [ui.difficulty_colors]
# easy = "#4ADE80"
# medium = "#FFD166"
# hard = "#FF5555"
"##;

/// Render catalog.toml for a new catalog
pub fn render_catalog_toml(name: &str) -> String {
    let escaped = name.replace('\\', "\\\\").replace('"', "\\\"");
    CATALOG_TOML_TEMPLATE.replace("{name}", &escaped)
}

/// Create `frond/` under `root` with a default config and an empty collection.
pub fn init_catalog(root: &Path, name: &str) -> Result<CatalogDir, CatalogError> {
    let dir = root.join(CATALOG_DIR);
    if dir.join(CONFIG_FILE).exists() {
        return Err(CatalogError::AlreadyExists(dir));
    }
    fs::create_dir_all(&dir)?;
    fs::write(dir.join(CONFIG_FILE), render_catalog_toml(name))?;
    let plants = dir.join(crate::io::json_store::PLANTS_FILE);
    if !plants.exists() {
        fs::write(&plants, "[]\n")?;
    }
    load_catalog(root)
}

/// Infer a catalog name from a directory name: hyphens to spaces, title-case.
pub fn infer_name(dir_name: &str) -> String {
    dir_name
        .split(['-', '_'])
        .filter(|w| !w.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                None => String::new(),
                Some(c) => {
                    let upper: String = c.to_uppercase().collect();
                    upper + chars.as_str()
                }
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn init_then_discover_from_a_subdirectory() {
        let tmp = TempDir::new().unwrap();
        init_catalog(tmp.path(), "Shade Garden").unwrap();
        let nested = tmp.path().join("a/b");
        fs::create_dir_all(&nested).unwrap();

        let root = discover_catalog(&nested).unwrap();
        assert_eq!(root, tmp.path());
        let catalog = load_catalog(&root).unwrap();
        assert_eq!(catalog.config.catalog.name, "Shade Garden");
        assert_eq!(fs::read_to_string(catalog.plants_path()).unwrap(), "[]\n");
    }

    #[test]
    fn init_twice_is_refused() {
        let tmp = TempDir::new().unwrap();
        init_catalog(tmp.path(), "A").unwrap();
        assert!(matches!(
            init_catalog(tmp.path(), "B"),
            Err(CatalogError::AlreadyExists(_))
        ));
    }

    #[test]
    fn discover_without_catalog_fails() {
        let tmp = TempDir::new().unwrap();
        assert!(matches!(
            discover_catalog(tmp.path()),
            Err(CatalogError::NotACatalog)
        ));
    }

    #[test]
    fn open_accepts_the_frond_directory_itself() {
        let tmp = TempDir::new().unwrap();
        init_catalog(tmp.path(), "A").unwrap();
        let via_root = open_catalog(Some(tmp.path())).unwrap();
        let via_dir = open_catalog(Some(&tmp.path().join(CATALOG_DIR))).unwrap();
        assert_eq!(via_root.dir, via_dir.dir);
    }

    #[test]
    fn template_parses_to_defaults_with_name() {
        let config: CatalogConfig = toml::from_str(&render_catalog_toml("My \"Ferns\"")).unwrap();
        assert_eq!(config.catalog.name, "My \"Ferns\"");
        assert!(config.seed.on_empty);
        assert!(config.ui.colors.is_empty());
        assert_eq!(config.log.level, "info");
    }

    #[test]
    fn bad_config_is_a_parse_error() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join(CATALOG_DIR);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(CONFIG_FILE), "[catalog\nname=").unwrap();
        assert!(matches!(
            load_catalog(tmp.path()),
            Err(CatalogError::ConfigParseError(_))
        ));
    }

    #[test]
    fn infer_name_title_cases() {
        assert_eq!(infer_name("shade-garden"), "Shade Garden");
        assert_eq!(infer_name("my_ferns"), "My Ferns");
        assert_eq!(infer_name("ferns"), "Ferns");
    }
}
