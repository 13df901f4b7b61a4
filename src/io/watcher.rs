use std::path::{Path, PathBuf};
use std::sync::mpsc;

use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};

use crate::io::json_store::PLANTS_FILE;

/// Events sent from the file watcher to the TUI event loop.
#[derive(Debug, PartialEq, Eq)]
pub enum FileEvent {
    /// plants.json changed on disk
    PlantsChanged,
}

/// Watches the `frond/` directory for changes to the collection file.
pub struct CatalogWatcher {
    _watcher: RecommendedWatcher,
    rx: mpsc::Receiver<FileEvent>,
}

impl CatalogWatcher {
    /// Start watching the given `frond/` directory.
    /// `poll()` should be called each tick.
    pub fn start(catalog_dir: &Path) -> Result<Self, notify::Error> {
        let (tx, rx) = mpsc::channel();
        let dir = catalog_dir.to_path_buf();

        let mut watcher = RecommendedWatcher::new(
            move |result: Result<Event, notify::Error>| {
                let Ok(event) = result else {
                    return;
                };
                if is_relevant(&dir, &event.kind, &event.paths) {
                    let _ = tx.send(FileEvent::PlantsChanged);
                }
            },
            Config::default(),
        )?;

        // Atomic writes replace the file, so watch the directory, not the file
        watcher.watch(catalog_dir, RecursiveMode::NonRecursive)?;
        Ok(CatalogWatcher {
            _watcher: watcher,
            rx,
        })
    }

    /// Non-blocking poll. Bursts of events collapse into one.
    pub fn poll(&self) -> Option<FileEvent> {
        let mut seen = None;
        while let Ok(evt) = self.rx.try_recv() {
            seen = Some(evt);
        }
        seen
    }
}

fn is_relevant(dir: &Path, kind: &EventKind, paths: &[PathBuf]) -> bool {
    match kind {
        EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_) => {}
        _ => return false,
    }
    paths
        .iter()
        .any(|p| p.starts_with(dir) && p.file_name().and_then(|n| n.to_str()) == Some(PLANTS_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use notify::event::{AccessKind, CreateKind, ModifyKind};

    #[test]
    fn only_plants_file_changes_are_relevant() {
        let dir = PathBuf::from("/cat/frond");
        let plants = vec![dir.join("plants.json")];
        let state = vec![dir.join(".state.json")];

        assert!(is_relevant(&dir, &EventKind::Modify(ModifyKind::Any), &plants));
        assert!(is_relevant(&dir, &EventKind::Create(CreateKind::File), &plants));
        assert!(!is_relevant(&dir, &EventKind::Modify(ModifyKind::Any), &state));
        assert!(!is_relevant(&dir, &EventKind::Access(AccessKind::Any), &plants));
        assert!(!is_relevant(
            &dir,
            &EventKind::Modify(ModifyKind::Any),
            &[PathBuf::from("/elsewhere/plants.json")]
        ));
    }
}
