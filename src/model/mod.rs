pub mod catalog_dir;
pub mod config;
pub mod plant;

pub use catalog_dir::*;
pub use config::*;
pub use plant::*;
