// ABOUTME: In-memory implementation of the product, category and message repositories
// ABOUTME: Owns its locking; mutations are applied to a copy and committed only on success

use async_trait::async_trait;
use chrono::Utc;
use shopx_catalog::{paginate, DashboardSummary, Page, PaginationParams, ProductQuery, QueryEngine};
use shopx_core::{
    is_ancestor_or_self, is_valid_email, next_id, Category, CategoryPayload, Message,
    MessageInput, Product, ProductPayload, ProductStatus, ReplyInput, ValidationErrors,
    DEFAULT_LOW_STOCK_THRESHOLD,
};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::error::{StorageError, StorageResult};
use crate::repository::{BulkAction, CategoryRepository, MessageRepository, ProductRepository};

/// Everything the store holds, in insertion order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogState {
    pub products: Vec<Product>,
    pub categories: Vec<Category>,
    /// Newest first
    pub messages: Vec<Message>,
}

/// Process-lifetime catalog store
pub struct InMemoryStore {
    state: RwLock<CatalogState>,
    latency: Duration,
    /// Store-wide low stock default, kept in step with the site settings
    low_stock_threshold: AtomicU32,
    pending_failure: Mutex<Option<String>>,
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStore {
    /// Empty store with no simulated latency
    pub fn new() -> Self {
        Self::with_state(CatalogState::default())
    }

    pub fn with_state(state: CatalogState) -> Self {
        Self {
            state: RwLock::new(state),
            latency: Duration::ZERO,
            low_stock_threshold: AtomicU32::new(DEFAULT_LOW_STOCK_THRESHOLD),
            pending_failure: Mutex::new(None),
        }
    }

    /// Store pre-loaded with the demo catalog
    pub fn seeded() -> Self {
        Self::with_state(crate::seed::demo_catalog())
    }

    /// Delay applied before every operation, standing in for network time
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn with_low_stock_threshold(self, threshold: u32) -> Self {
        self.set_low_stock_threshold(threshold);
        self
    }

    pub fn low_stock_threshold(&self) -> u32 {
        self.low_stock_threshold.load(Ordering::Relaxed)
    }

    /// Changes the default used by the low stock filter and the dashboard
    pub fn set_low_stock_threshold(&self, threshold: u32) {
        let previous = self.low_stock_threshold.swap(threshold, Ordering::Relaxed);
        if previous != threshold {
            info!("Low stock threshold changed: {} -> {}", previous, threshold);
        }
    }

    fn engine(&self) -> QueryEngine {
        QueryEngine::new(self.low_stock_threshold())
    }

    /// Makes the next operation fail with `StorageError::Simulated`
    pub fn fail_next(&self, reason: impl Into<String>) {
        let mut pending = self
            .pending_failure
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *pending = Some(reason.into());
    }

    /// Copy of the current state
    pub async fn snapshot(&self) -> CatalogState {
        self.state.read().await.clone()
    }

    pub async fn dashboard(&self) -> StorageResult<DashboardSummary> {
        self.begin().await?;
        let state = self.state.read().await;
        Ok(DashboardSummary::build(
            &state.products,
            &state.categories,
            &state.messages,
            self.low_stock_threshold(),
        ))
    }

    /// Simulated transport: wait out the latency, then surface any injected failure.
    /// Runs before the lock is taken so an abandoned call never mutates state.
    async fn begin(&self) -> StorageResult<()> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        let failure = self
            .pending_failure
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .take();
        match failure {
            Some(reason) => {
                warn!("Simulated request failure: {}", reason);
                Err(StorageError::Simulated(reason))
            }
            None => Ok(()),
        }
    }
}

/// `check_category_exists` is off for merge updates that leave the category
/// alone, so a product orphaned by a category delete stays editable.
fn check_product(
    state: &CatalogState,
    product: &Product,
    check_category_exists: bool,
) -> StorageResult<()> {
    if let Some(discount) = product.discount_price {
        if discount >= product.price {
            let mut errors = ValidationErrors::new();
            errors.add(
                "discountPrice",
                "Discount price must be less than regular price",
            );
            return Err(errors.into());
        }
    }

    if check_category_exists && !state.categories.iter().any(|c| c.id == product.category_id) {
        return Err(StorageError::InvalidReference(format!(
            "category {} does not exist",
            product.category_id
        )));
    }

    if state
        .products
        .iter()
        .any(|p| p.id != product.id && p.slug == product.slug)
    {
        return Err(StorageError::DuplicateSlug {
            entity: "product",
            slug: product.slug.clone(),
        });
    }

    Ok(())
}

fn check_category(
    state: &CatalogState,
    category: &Category,
    check_parent_exists: bool,
) -> StorageResult<()> {
    if let Some(parent_id) = category.parent_id {
        if parent_id == category.id {
            return Err(StorageError::InvalidReference(
                "category cannot be its own parent".to_string(),
            ));
        }
        if check_parent_exists && !state.categories.iter().any(|c| c.id == parent_id) {
            return Err(StorageError::InvalidReference(format!(
                "parent category {} does not exist",
                parent_id
            )));
        }
        if is_ancestor_or_self(&state.categories, parent_id, category.id) {
            return Err(StorageError::InvalidReference(format!(
                "category {} cannot be placed under its own descendant {}",
                category.id, parent_id
            )));
        }
    }

    if state
        .categories
        .iter()
        .any(|c| c.id != category.id && c.slug == category.slug)
    {
        return Err(StorageError::DuplicateSlug {
            entity: "category",
            slug: category.slug.clone(),
        });
    }

    Ok(())
}

fn apply_bulk_update(product: &mut Product, action: BulkAction) {
    match action {
        BulkAction::Activate => product.status = ProductStatus::Active,
        BulkAction::Deactivate => product.status = ProductStatus::Inactive,
        BulkAction::Feature => product.featured = true,
        BulkAction::Unfeature => product.featured = false,
        BulkAction::Delete => {}
    }
}

fn check_message(input: &MessageInput) -> StorageResult<()> {
    let mut errors = ValidationErrors::new();
    if input.name.trim().is_empty() {
        errors.add("name", "Name is required");
    }
    let email = input.email.trim();
    if email.is_empty() {
        errors.add("email", "Email is required");
    } else if !is_valid_email(email) {
        errors.add("email", "Please enter a valid email address");
    }
    if input.message.trim().is_empty() {
        errors.add("message", "Message is required");
    }
    errors.into_result().map_err(StorageError::from)
}

#[async_trait]
impl ProductRepository for InMemoryStore {
    async fn list_products(&self, query: &ProductQuery) -> StorageResult<Page<Product>> {
        self.begin().await?;
        let state = self.state.read().await;
        Ok(self
            .engine()
            .query_with_categories(&state.products, &state.categories, query))
    }

    async fn get_product(&self, id: u64) -> StorageResult<Product> {
        self.begin().await?;
        debug!("Fetching product: {}", id);
        let state = self.state.read().await;
        state
            .products
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| StorageError::not_found("Product", id))
    }

    async fn create_product(&self, payload: ProductPayload) -> StorageResult<Product> {
        self.begin().await?;
        let mut state = self.state.write().await;

        let id = next_id(state.products.iter().map(|p| p.id));
        let product = payload.into_product(id, Utc::now())?;
        check_product(&state, &product, true)?;

        info!("Creating product: {} (name: {})", id, product.name);
        state.products.push(product.clone());
        Ok(product)
    }

    async fn update_product(&self, id: u64, payload: ProductPayload) -> StorageResult<Product> {
        self.begin().await?;
        let mut state = self.state.write().await;

        let index = state
            .products
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| {
                warn!("Update of missing product: {}", id);
                StorageError::not_found("Product", id)
            })?;

        let mut updated = state.products[index].clone();
        payload.apply_to(&mut updated);
        check_product(&state, &updated, payload.category_id.is_some())?;

        info!("Updating product: {}", id);
        state.products[index] = updated.clone();
        Ok(updated)
    }

    async fn delete_product(&self, id: u64) -> StorageResult<()> {
        self.begin().await?;
        let mut state = self.state.write().await;

        let index = state
            .products
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| StorageError::not_found("Product", id))?;

        state.products.remove(index);
        info!("Deleted product: {}", id);
        Ok(())
    }

    async fn bulk_action(&self, ids: &[u64], action: BulkAction) -> StorageResult<usize> {
        self.begin().await?;
        let mut state = self.state.write().await;

        let affected = match action {
            BulkAction::Delete => {
                let before = state.products.len();
                state.products.retain(|p| !ids.contains(&p.id));
                before - state.products.len()
            }
            _ => {
                let mut count = 0;
                for product in state.products.iter_mut().filter(|p| ids.contains(&p.id)) {
                    apply_bulk_update(product, action);
                    count += 1;
                }
                count
            }
        };

        info!(
            "Bulk {} applied to {} of {} selected products",
            action,
            affected,
            ids.len()
        );
        Ok(affected)
    }
}

#[async_trait]
impl CategoryRepository for InMemoryStore {
    async fn list_categories(&self) -> StorageResult<Vec<Category>> {
        self.begin().await?;
        let state = self.state.read().await;
        debug!("Listing {} categories", state.categories.len());
        Ok(state.categories.clone())
    }

    async fn get_category(&self, id: u64) -> StorageResult<Category> {
        self.begin().await?;
        let state = self.state.read().await;
        state
            .categories
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or_else(|| StorageError::not_found("Category", id))
    }

    async fn create_category(&self, payload: CategoryPayload) -> StorageResult<Category> {
        self.begin().await?;
        let mut state = self.state.write().await;

        let id = next_id(state.categories.iter().map(|c| c.id));
        let category = payload.into_category(id, Utc::now())?;
        check_category(&state, &category, true)?;

        info!("Creating category: {} (name: {})", id, category.name);
        state.categories.push(category.clone());
        Ok(category)
    }

    async fn update_category(&self, id: u64, payload: CategoryPayload) -> StorageResult<Category> {
        self.begin().await?;
        let mut state = self.state.write().await;

        let index = state
            .categories
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| StorageError::not_found("Category", id))?;

        let mut updated = state.categories[index].clone();
        payload.apply_to(&mut updated);
        check_category(&state, &updated, payload.parent_id.is_some())?;

        info!("Updating category: {}", id);
        state.categories[index] = updated.clone();
        Ok(updated)
    }

    async fn delete_category(&self, id: u64) -> StorageResult<()> {
        self.begin().await?;
        let mut state = self.state.write().await;

        let index = state
            .categories
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| StorageError::not_found("Category", id))?;

        // Children and products keep their references; no cascade
        state.categories.remove(index);
        info!("Deleted category: {}", id);
        Ok(())
    }
}

#[async_trait]
impl MessageRepository for InMemoryStore {
    async fn list_messages(&self, params: &PaginationParams) -> StorageResult<Page<Message>> {
        self.begin().await?;
        let state = self.state.read().await;
        Ok(paginate(state.messages.clone(), params))
    }

    async fn get_message(&self, id: u64) -> StorageResult<Message> {
        self.begin().await?;
        let state = self.state.read().await;
        state
            .messages
            .iter()
            .find(|m| m.id == id)
            .cloned()
            .ok_or_else(|| StorageError::not_found("Message", id))
    }

    async fn create_message(&self, input: MessageInput) -> StorageResult<Message> {
        self.begin().await?;
        check_message(&input)?;
        let mut state = self.state.write().await;

        let id = next_id(state.messages.iter().map(|m| m.id));
        let message = input.into_message(id, Utc::now());

        info!("Received message {} from {}", id, message.email);
        state.messages.insert(0, message.clone());
        Ok(message)
    }

    async fn reply_to_message(&self, id: u64, reply: ReplyInput) -> StorageResult<Message> {
        self.begin().await?;
        if reply.reply_content.trim().is_empty() {
            let mut errors = ValidationErrors::new();
            errors.add("replyContent", "Reply cannot be empty");
            return Err(errors.into());
        }

        let mut state = self.state.write().await;
        let message = state
            .messages
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or_else(|| StorageError::not_found("Message", id))?;

        message.replied = true;
        message.reply = Some(reply.reply_content);
        message.replied_at = Some(Utc::now());

        info!("Replied to message: {}", id);
        Ok(message.clone())
    }

    async fn delete_message(&self, id: u64) -> StorageResult<()> {
        self.begin().await?;
        let mut state = self.state.write().await;

        let index = state
            .messages
            .iter()
            .position(|m| m.id == id)
            .ok_or_else(|| StorageError::not_found("Message", id))?;

        state.messages.remove(index);
        info!("Deleted message: {}", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fail_next_is_consumed_once() {
        let store = InMemoryStore::seeded();
        store.fail_next("connection reset");

        let err = store.get_product(1).await.unwrap_err();
        assert_eq!(err, StorageError::Simulated("connection reset".to_string()));
        assert!(store.get_product(1).await.is_ok());
    }
}
