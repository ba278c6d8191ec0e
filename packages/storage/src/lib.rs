// ABOUTME: Persistence layer for ShopX
// ABOUTME: Repository traits plus the in-memory store and its demo seed data

pub mod error;
pub mod memory;
pub mod repository;
pub mod seed;

// Re-export main types
pub use error::{StorageError, StorageResult};
pub use memory::{CatalogState, InMemoryStore};
pub use repository::{BulkAction, CategoryRepository, MessageRepository, ProductRepository};
pub use seed::demo_catalog;
