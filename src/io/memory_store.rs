#[cfg(test)]
use std::cell::{Cell, RefCell};
use std::sync::Mutex;

use uuid::Uuid;

use crate::io::store::{ListResponse, PlantStore, StoreError};
use crate::model::plant::{Plant, PlantFields, PlantId};

/// Which operations should fail, for exercising error paths
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FailureSwitches {
    pub list: bool,
    /// Report `success: false` instead of an error
    pub list_unsuccessful: bool,
    pub create: bool,
    pub update: bool,
}

/// In-memory store. Keeps insertion order and counts calls.
#[derive(Debug, Default)]
pub struct MemoryStore {
    plants: Mutex<Vec<Plant>>,
    failures: Mutex<FailureSwitches>,
    calls: Mutex<CallCounts>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CallCounts {
    pub list: usize,
    pub create: usize,
    pub update: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_failures(&self, failures: FailureSwitches) {
        if let Ok(mut f) = self.failures.lock() {
            *f = failures;
        }
    }

    pub fn calls(&self) -> CallCounts {
        self.calls.lock().map(|c| *c).unwrap_or_default()
    }

    pub fn snapshot(&self) -> Vec<Plant> {
        self.plants.lock().map(|p| p.clone()).unwrap_or_default()
    }

    fn failures(&self) -> FailureSwitches {
        self.failures.lock().map(|f| *f).unwrap_or_default()
    }

    fn count(&self, f: impl FnOnce(&mut CallCounts)) {
        if let Ok(mut c) = self.calls.lock() {
            f(&mut c);
        }
    }

    fn poisoned() -> StoreError {
        StoreError::Unavailable("memory store lock poisoned".into())
    }
}

impl PlantStore for MemoryStore {
    fn list(&self) -> Result<ListResponse, StoreError> {
        self.count(|c| c.list += 1);
        let failures = self.failures();
        if failures.list {
            return Err(StoreError::Unavailable("list failed".into()));
        }
        if failures.list_unsuccessful {
            return Ok(ListResponse::default());
        }
        let plants = self.plants.lock().map_err(|_| Self::poisoned())?;
        Ok(ListResponse::ok(plants.clone()))
    }

    fn create(&self, fields: PlantFields) -> Result<Plant, StoreError> {
        self.count(|c| c.create += 1);
        if self.failures().create {
            return Err(StoreError::Unavailable("create failed".into()));
        }
        let plant = Plant::new(PlantId::new(Uuid::new_v4().to_string()), fields);
        let mut plants = self.plants.lock().map_err(|_| Self::poisoned())?;
        plants.push(plant.clone());
        Ok(plant)
    }

    fn update(&self, id: &PlantId, fields: PlantFields) -> Result<Plant, StoreError> {
        self.count(|c| c.update += 1);
        if self.failures().update {
            return Err(StoreError::Unavailable("update failed".into()));
        }
        let mut plants = self.plants.lock().map_err(|_| Self::poisoned())?;
        let existing = plants
            .iter_mut()
            .find(|p| &p.id == id)
            .ok_or_else(|| StoreError::NotFound(id.clone()))?;
        existing.fields = fields;
        Ok(existing.clone())
    }
}

/// A store that fails the first `n` creates, then delegates.
/// Used to exercise partial seeding.
#[cfg(test)]
#[derive(Debug)]
pub struct FlakyCreates<S> {
    inner: S,
    remaining: Cell<usize>,
    failed: RefCell<Vec<String>>,
}

#[cfg(test)]
impl<S> FlakyCreates<S> {
    pub fn new(inner: S, fail_first: usize) -> Self {
        FlakyCreates {
            inner,
            remaining: Cell::new(fail_first),
            failed: RefCell::new(Vec::new()),
        }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    /// Names whose create was refused
    pub fn refused(&self) -> Vec<String> {
        self.failed.borrow().clone()
    }
}

#[cfg(test)]
impl<S: PlantStore> PlantStore for FlakyCreates<S> {
    fn list(&self) -> Result<ListResponse, StoreError> {
        self.inner.list()
    }

    fn create(&self, fields: PlantFields) -> Result<Plant, StoreError> {
        let left = self.remaining.get();
        if left > 0 {
            self.remaining.set(left - 1);
            self.failed.borrow_mut().push(fields.name.clone());
            return Err(StoreError::Unavailable("create refused".into()));
        }
        self.inner.create(fields)
    }

    fn update(&self, id: &PlantId, fields: PlantFields) -> Result<Plant, StoreError> {
        self.inner.update(id, fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(name: &str) -> PlantFields {
        PlantFields {
            name: name.into(),
            scientific_name: format!("{} sp.", name),
            ..Default::default()
        }
    }

    #[test]
    fn create_assigns_unique_ids_and_keeps_order() {
        let store = MemoryStore::new();
        let a = store.create(fields("A")).unwrap();
        let b = store.create(fields("B")).unwrap();
        assert_ne!(a.id, b.id);
        let listed = store.list().unwrap();
        assert!(listed.success);
        let names: Vec<&str> = listed.data.iter().map(|p| p.name()).collect();
        assert_eq!(names, vec!["A", "B"]);
    }

    #[test]
    fn update_replaces_all_fields_and_keeps_id() {
        let store = MemoryStore::new();
        let mut original = fields("A");
        original.habitat = Some("Bog".into());
        let a = store.create(original).unwrap();
        let updated = store.update(&a.id, fields("A2")).unwrap();
        assert_eq!(updated.id, a.id);
        assert_eq!(updated.fields.habitat, None);
        assert_eq!(store.snapshot()[0].name(), "A2");
    }

    #[test]
    fn update_unknown_id_is_not_found() {
        let store = MemoryStore::new();
        let err = store.update(&PlantId::new("nope"), fields("X")).unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[test]
    fn failure_switches_and_call_counts() {
        let store = MemoryStore::new();
        store.set_failures(FailureSwitches {
            create: true,
            ..Default::default()
        });
        assert!(store.create(fields("A")).is_err());
        assert!(store.snapshot().is_empty());
        store.set_failures(FailureSwitches {
            list_unsuccessful: true,
            ..Default::default()
        });
        assert!(!store.list().unwrap().success);
        assert_eq!(
            store.calls(),
            CallCounts {
                list: 1,
                create: 1,
                update: 0
            }
        );
    }

    #[test]
    fn flaky_creates_refuse_then_delegate() {
        let store = FlakyCreates::new(MemoryStore::new(), 1);
        assert!(store.create(fields("A")).is_err());
        assert!(store.create(fields("B")).is_ok());
        assert_eq!(store.refused(), vec!["A".to_string()]);
        assert_eq!(store.inner().snapshot().len(), 1);
    }
}
