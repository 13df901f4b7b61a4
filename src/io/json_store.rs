use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};
use uuid::Uuid;

use crate::io::lock::StoreLock;
use crate::io::recovery::atomic_write;
use crate::io::store::{ListResponse, PlantStore, StoreError};
use crate::model::plant::{Plant, PlantFields, PlantId};

/// File name of the collection inside the catalog directory
pub const PLANTS_FILE: &str = "plants.json";

/// Store backed by `plants.json` in a catalog directory.
///
/// Every mutation is a locked read-modify-write with an atomic replace, so
/// concurrent CLI and TUI processes see whole collections only.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(catalog_dir: &Path) -> Self {
        JsonFileStore {
            dir: catalog_dir.to_path_buf(),
        }
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(PLANTS_FILE)
    }

    /// Write an empty collection if none exists yet
    pub fn ensure_file(&self) -> Result<(), StoreError> {
        let path = self.path();
        if !path.exists() {
            self.write_all(&[])?;
        }
        Ok(())
    }

    fn read_all(&self) -> Result<Vec<Plant>, StoreError> {
        let path = self.path();
        if !path.exists() {
            return Ok(Vec::new());
        }
        let text = fs::read_to_string(&path).map_err(|e| StoreError::Read {
            path: path.clone(),
            source: e,
        })?;
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_str(&text).map_err(|e| StoreError::Parse { path, source: e })
    }

    fn write_all(&self, plants: &[Plant]) -> Result<(), StoreError> {
        let path = self.path();
        let mut content = serde_json::to_string_pretty(plants)?;
        content.push('\n');
        atomic_write(&path, content.as_bytes())
            .map_err(|e| StoreError::Write { path, source: e })
    }

    fn mutate<T>(&self, f: impl FnOnce(&mut Vec<Plant>) -> Result<T, StoreError>) -> Result<T, StoreError> {
        let _lock = StoreLock::acquire(&self.dir)?;
        let mut plants = self.read_all()?;
        let out = f(&mut plants)?;
        self.write_all(&plants)?;
        Ok(out)
    }
}

impl PlantStore for JsonFileStore {
    fn list(&self) -> Result<ListResponse, StoreError> {
        let plants = self.read_all()?;
        debug!(count = plants.len(), "listed plants");
        Ok(ListResponse::ok(plants))
    }

    fn create(&self, fields: PlantFields) -> Result<Plant, StoreError> {
        let plant = self.mutate(|plants| {
            let plant = Plant::new(PlantId::new(Uuid::new_v4().to_string()), fields);
            plants.push(plant.clone());
            Ok(plant)
        })?;
        info!(id = %plant.id, name = %plant.name(), "created plant");
        Ok(plant)
    }

    fn update(&self, id: &PlantId, fields: PlantFields) -> Result<Plant, StoreError> {
        let plant = self.mutate(|plants| {
            let existing = plants
                .iter_mut()
                .find(|p| &p.id == id)
                .ok_or_else(|| StoreError::NotFound(id.clone()))?;
            existing.fields = fields;
            Ok(existing.clone())
        })?;
        info!(id = %plant.id, name = %plant.name(), "updated plant");
        Ok(plant)
    }
}
