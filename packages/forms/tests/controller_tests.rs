// ABOUTME: Integration tests for the form controller against the in-memory store
// ABOUTME: Covers create and edit flows, rejected drafts, failed and cancelled submissions

use pretty_assertions::assert_eq;
use shopx_core::ProductStatus;
use shopx_forms::{CategoryForm, FormError, FormPhase, ProductForm};
use shopx_storage::{CategoryRepository, InMemoryStore, ProductRepository, StorageError};
use std::time::Duration;
use tokio_util::sync::CancellationToken;

fn fill_new_product(form: &mut ProductForm, name: &str) {
    form.set_name(name).unwrap();
    form.edit("shortDescription", |d| {
        d.short_description = "Limited edition scent".to_string()
    })
    .unwrap();
    form.edit("price", |d| d.price = "50".to_string()).unwrap();
    form.edit("stock", |d| d.stock = "8".to_string()).unwrap();
    form.edit("categoryId", |d| d.category_id = "1".to_string())
        .unwrap();
}

#[tokio::test]
async fn test_create_product_through_form() {
    let store = InMemoryStore::seeded();
    let mut form = ProductForm::new();

    form.open_new(());
    fill_new_product(&mut form, "Amber Night");
    form.draft_mut().unwrap().add_tag("amber");
    form.draft_mut()
        .unwrap()
        .add_image("https://cdn.test/amber.jpg");

    let product = form.submit(&store).await.unwrap();

    assert_eq!(product.id, 13);
    assert_eq!(product.slug, "amber-night");
    assert_eq!(product.discount_price, None);
    assert_eq!(product.status, ProductStatus::Draft);
    assert_eq!(product.tags, vec!["amber".to_string()]);
    assert_eq!(product.main_image.as_deref(), Some("https://cdn.test/amber.jpg"));
    assert_eq!(form.phase(), FormPhase::Closed);
    assert!(form.draft().is_none());
}

#[tokio::test]
async fn test_rejected_draft_is_not_submitted() {
    let store = InMemoryStore::seeded();
    let before = store.snapshot().await;
    let mut form = ProductForm::new();

    form.open_new(());
    let err = form.submit(&store).await.unwrap_err();

    assert!(matches!(err, FormError::Validation(_)));
    assert_eq!(form.phase(), FormPhase::Editing);
    assert!(form.errors().has("name"));
    assert_eq!(store.snapshot().await, before);

    // Typing into a field clears its error
    form.set_name("Amber").unwrap();
    assert!(!form.errors().has("name"));
    assert!(form.errors().has("price"));
}

#[tokio::test]
async fn test_discount_equal_to_price_is_rejected() {
    let store = InMemoryStore::seeded();
    let mut form = ProductForm::new();

    form.open_new(());
    fill_new_product(&mut form, "Amber Night");
    form.edit("discountPrice", |d| d.discount_price = "50".to_string())
        .unwrap();

    let err = form.submit(&store).await.unwrap_err();
    match err {
        FormError::Validation(errors) => assert_eq!(errors.fields(), vec!["discountPrice"]),
        other => panic!("unexpected error: {other}"),
    }

    form.edit("discountPrice", |d| d.discount_price = "49.99".to_string())
        .unwrap();
    let product = form.submit(&store).await.unwrap();
    assert_eq!(product.discount_price, Some(49.99));
}

#[tokio::test]
async fn test_editing_keeps_existing_slug() {
    let store = InMemoryStore::seeded();
    let existing = store.get_product(2).await.unwrap();
    let mut form = ProductForm::new();

    form.open_existing(&existing, ());
    assert_eq!(form.editing_id(), Some(2));

    form.set_name("Midnight Oud Intense").unwrap();
    form.edit("stock", |d| d.stock = "3".to_string()).unwrap();
    let updated = form.submit(&store).await.unwrap();

    assert_eq!(updated.name, "Midnight Oud Intense");
    assert_eq!(updated.slug, "midnight-oud");
    assert_eq!(updated.stock, 3);
    assert_eq!(updated.created_at, existing.created_at);
}

#[tokio::test]
async fn test_persistence_failure_keeps_draft() {
    let store = InMemoryStore::seeded();
    let mut form = ProductForm::new();

    form.open_new(());
    fill_new_product(&mut form, "Amber Night");

    store.fail_next("network down");
    let err = form.submit(&store).await.unwrap_err();

    assert_eq!(
        err,
        FormError::Persistence(StorageError::Simulated("network down".to_string()))
    );
    assert_eq!(form.phase(), FormPhase::Editing);
    assert_eq!(form.draft().unwrap().name, "Amber Night");
    assert_eq!(form.last_error(), Some(&err));

    // Retrying succeeds with the same draft
    let product = form.submit(&store).await.unwrap();
    assert_eq!(product.name, "Amber Night");
    assert_eq!(form.last_error(), None);
}

#[tokio::test]
async fn test_duplicate_slug_surfaces_as_persistence_error() {
    let store = InMemoryStore::seeded();
    let mut form = ProductForm::new();

    form.open_new(());
    fill_new_product(&mut form, "Citrus Breeze");

    let err = form.submit(&store).await.unwrap_err();
    assert!(matches!(
        err,
        FormError::Persistence(StorageError::DuplicateSlug { .. })
    ));
    assert!(form.is_open());
}

#[tokio::test(start_paused = true)]
async fn test_cancelled_submission_is_discarded() {
    let store = InMemoryStore::seeded().with_latency(Duration::from_millis(500));
    let before = store.snapshot().await;
    let mut form = ProductForm::new();

    form.open_new(());
    fill_new_product(&mut form, "Amber Night");

    let token = CancellationToken::new();
    let canceller = token.clone();
    let (result, _) = tokio::join!(form.submit_with_cancel(&store, &token), async move {
        tokio::time::sleep(Duration::from_millis(100)).await;
        canceller.cancel();
    });

    assert_eq!(result.unwrap_err(), FormError::Cancelled);
    assert_eq!(form.phase(), FormPhase::Closed);
    assert_eq!(form.last_error(), Some(&FormError::Cancelled));

    // Let the abandoned latency window pass; nothing may have been written
    tokio::time::sleep(Duration::from_secs(1)).await;
    assert_eq!(store.snapshot().await, before);
}

#[tokio::test]
async fn test_uncancelled_submission_completes() {
    let store = InMemoryStore::seeded();
    let mut form = ProductForm::new();

    form.open_new(());
    fill_new_product(&mut form, "Amber Night");

    let token = CancellationToken::new();
    let product = form.submit_with_cancel(&store, &token).await.unwrap();
    assert_eq!(product.id, 13);
}

#[tokio::test]
async fn test_submit_on_closed_form() {
    let store = InMemoryStore::seeded();
    let mut form = ProductForm::new();

    assert_eq!(form.submit(&store).await.unwrap_err(), FormError::NotEditing);
    assert_eq!(form.set_name("x").unwrap_err(), FormError::NotEditing);
}

#[tokio::test]
async fn test_category_form_create_and_reparent() {
    let store = InMemoryStore::seeded();
    let categories = store.list_categories().await.unwrap();
    let mut form = CategoryForm::new();

    form.open_new(categories.clone());
    form.set_name("Floral Scents").unwrap();
    form.edit("parentId", |d| d.parent_id = "1".to_string())
        .unwrap();
    let floral = form.submit(&store).await.unwrap();

    assert_eq!(floral.slug, "floral-scents");
    assert_eq!(floral.parent_id, Some(1));

    // Perfume may not move under its own child
    let categories = store.list_categories().await.unwrap();
    let perfume = store.get_category(1).await.unwrap();
    form.open_existing(&perfume, categories);
    form.edit("parentId", |d| d.parent_id = floral.id.to_string())
        .unwrap();

    let err = form.submit(&store).await.unwrap_err();
    assert!(matches!(err, FormError::Validation(_)));
    assert!(form.errors().has("parentId"));
    assert_eq!(store.get_category(1).await.unwrap().parent_id, None);
}
