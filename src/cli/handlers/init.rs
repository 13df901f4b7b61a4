use std::path::Path;

use crate::cli::commands::InitArgs;
use crate::io::catalog_io::{self, CATALOG_DIR};

/// Create `frond/` in `-C <dir>` or the current directory.
pub fn cmd_init(args: InitArgs, explicit: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let root = match explicit {
        Some(dir) => dir.to_path_buf(),
        None => std::env::current_dir()?,
    };

    // Check for an enclosing catalog and warn
    if let Some(parent) = root.parent()
        && let Ok(parent_root) = catalog_io::discover_catalog(parent)
    {
        eprintln!(
            "Note: parent catalog found at {}/",
            parent_root.join(CATALOG_DIR).display()
        );
        eprintln!("Creating new catalog in ./{}/", CATALOG_DIR);
    }

    let name = args.name.unwrap_or_else(|| default_name(&root));
    let catalog = catalog_io::init_catalog(&root, &name)?;
    println!("Initialized frond catalog: {}", catalog.config.catalog.name);

    if args.seed {
        super::seed_new_catalog(&catalog.dir, false)?;
    }
    Ok(())
}

/// Name inferred from the directory, or the stock name for odd paths
fn default_name(root: &Path) -> String {
    root.file_name()
        .and_then(|n| n.to_str())
        .map(catalog_io::infer_name)
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| "Fern Collection".to_string())
}
