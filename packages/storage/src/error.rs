// ABOUTME: Error types for repository operations
// ABOUTME: Not-found, duplicate, reference and simulated transport failures

use shopx_core::ValidationErrors;
use thiserror::Error;

pub type StorageResult<T> = Result<T, StorageError>;

/// Storage errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StorageError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: u64 },

    #[error("Duplicate {entity} slug: {slug}")]
    DuplicateSlug { entity: &'static str, slug: String },

    #[error("Invalid reference: {0}")]
    InvalidReference(String),

    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    /// Injected transport failure standing in for a rejected network call
    #[error("Request failed: {0}")]
    Simulated(String),
}

impl StorageError {
    pub fn not_found(entity: &'static str, id: u64) -> Self {
        StorageError::NotFound { entity, id }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, StorageError::NotFound { .. })
    }
}
