use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use shopx_catalog::{Page, PaginationParams, ProductQuery};
use shopx_core::{
    Category, CategoryPayload, Message, MessageInput, Product, ProductPayload, ReplyInput,
};
use std::fmt;
use std::str::FromStr;

use crate::error::StorageResult;

/// Operations applied to a selection of products at once
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BulkAction {
    Activate,
    Deactivate,
    Feature,
    Unfeature,
    Delete,
}

impl BulkAction {
    /// Destructive actions ask for confirmation before running
    pub fn requires_confirmation(&self) -> bool {
        matches!(self, BulkAction::Delete)
    }
}

impl fmt::Display for BulkAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            BulkAction::Activate => "activate",
            BulkAction::Deactivate => "deactivate",
            BulkAction::Feature => "feature",
            BulkAction::Unfeature => "unfeature",
            BulkAction::Delete => "delete",
        };
        write!(f, "{}", label)
    }
}

impl FromStr for BulkAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "activate" => Ok(BulkAction::Activate),
            "deactivate" => Ok(BulkAction::Deactivate),
            "feature" => Ok(BulkAction::Feature),
            "unfeature" => Ok(BulkAction::Unfeature),
            "delete" => Ok(BulkAction::Delete),
            _ => Err(format!("Unknown bulk action: {}", s)),
        }
    }
}

/// Product persistence
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Filtered, sorted and paged listing
    async fn list_products(&self, query: &ProductQuery) -> StorageResult<Page<Product>>;
    async fn get_product(&self, id: u64) -> StorageResult<Product>;
    /// Assigns the next id (max existing + 1)
    async fn create_product(&self, payload: ProductPayload) -> StorageResult<Product>;
    /// Merge update: only fields present in `payload` change
    async fn update_product(&self, id: u64, payload: ProductPayload) -> StorageResult<Product>;
    async fn delete_product(&self, id: u64) -> StorageResult<()>;
    /// Applies `action` to every existing id; returns how many were affected
    async fn bulk_action(&self, ids: &[u64], action: BulkAction) -> StorageResult<usize>;
}

/// Category persistence
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    async fn list_categories(&self) -> StorageResult<Vec<Category>>;
    async fn get_category(&self, id: u64) -> StorageResult<Category>;
    async fn create_category(&self, payload: CategoryPayload) -> StorageResult<Category>;
    async fn update_category(&self, id: u64, payload: CategoryPayload) -> StorageResult<Category>;
    async fn delete_category(&self, id: u64) -> StorageResult<()>;
}

/// Contact message persistence
#[async_trait]
pub trait MessageRepository: Send + Sync {
    /// Newest first
    async fn list_messages(&self, params: &PaginationParams) -> StorageResult<Page<Message>>;
    async fn get_message(&self, id: u64) -> StorageResult<Message>;
    async fn create_message(&self, input: MessageInput) -> StorageResult<Message>;
    async fn reply_to_message(&self, id: u64, reply: ReplyInput) -> StorageResult<Message>;
    async fn delete_message(&self, id: u64) -> StorageResult<()>;
}
