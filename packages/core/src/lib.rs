// ABOUTME: Core catalog types, payloads and utilities for ShopX
// ABOUTME: Foundational package shared by the query engine, forms and storage

pub mod constants;
pub mod payload;
pub mod types;
pub mod utils;
pub mod validation;

// Re-export main types
pub use types::{
    is_ancestor_or_self, Category, CategoryStatus, Message, Product, ProductStatus,
};

// Re-export payload records
pub use payload::{CategoryPayload, MessageInput, ProductPayload, ReplyInput};

// Re-export constants
pub use constants::{DEFAULT_LOW_STOCK_THRESHOLD, DEFAULT_MAX_IMAGES};

// Re-export utilities
pub use utils::{is_valid_email, is_valid_url, next_id, non_blank, slugify, truncate};

// Re-export validation
pub use validation::{FieldError, ValidationErrors};
