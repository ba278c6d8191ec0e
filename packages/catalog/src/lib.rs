//! # ShopX Catalog
//!
//! The catalog query engine: conjunctive filtering, stable sorting and
//! pagination over an in-memory product snapshot, plus the inventory and
//! dashboard summaries built from the same data.

pub mod pagination;
pub mod query;
pub mod stats;

// Re-export pagination types
pub use pagination::{
    paginate, Page, PaginationMeta, PaginationParams, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE,
};

// Re-export query engine
pub use query::{query, sort_products, CategoryFilter, ProductQuery, QueryEngine, SortKey};

// Re-export stats
pub use stats::{DashboardSummary, InventoryStats, RECENT_PRODUCTS_LIMIT};
