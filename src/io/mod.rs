pub mod catalog_io;
pub mod json_store;
pub mod lock;
pub mod memory_store;
pub mod recovery;
pub mod state;
pub mod store;
pub mod watcher;

pub use json_store::JsonFileStore;
pub use memory_store::MemoryStore;
pub use store::{ListResponse, PlantStore, StoreError};
