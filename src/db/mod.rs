pub mod catalog;
pub mod seed;
pub mod sqlite;

pub use catalog::{CatalogStore, SqlCatalog};
pub use sqlite::{create_memory_pool, create_pool};
