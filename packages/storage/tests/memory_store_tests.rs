// ABOUTME: Integration tests for the in-memory repositories
// ABOUTME: Tests CRUD, merge updates, invariants, bulk actions and failure isolation

use pretty_assertions::assert_eq;
use shopx_catalog::{CategoryFilter, PaginationParams, ProductQuery, SortKey};
use shopx_core::{CategoryPayload, MessageInput, ProductPayload, ProductStatus, ReplyInput};
use shopx_storage::{
    BulkAction, CategoryRepository, InMemoryStore, MessageRepository, ProductRepository,
    StorageError,
};
use std::time::Duration;

fn new_product(name: &str, price: f64) -> ProductPayload {
    ProductPayload {
        name: Some(name.to_string()),
        short_description: Some("Test product".to_string()),
        price: Some(price),
        stock: Some(10),
        category_id: Some(1),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_create_product_assigns_next_id() {
    let store = InMemoryStore::seeded();

    let product = store
        .create_product(new_product("Amber Night", 48.0))
        .await
        .unwrap();

    assert_eq!(product.id, 13);
    assert_eq!(product.slug, "amber-night");
    assert_eq!(store.get_product(13).await.unwrap(), product);
}

#[tokio::test]
async fn test_create_in_empty_store_starts_at_one() {
    let store = InMemoryStore::new();
    store
        .create_category(CategoryPayload {
            name: Some("Perfume".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();

    let product = store.create_product(new_product("First", 10.0)).await.unwrap();
    assert_eq!(product.id, 1);
}

#[tokio::test]
async fn test_update_merges_only_supplied_fields() {
    let store = InMemoryStore::seeded();
    let before = store.get_product(3).await.unwrap();

    let updated = store
        .update_product(
            3,
            ProductPayload {
                stock: Some(4),
                featured: Some(true),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.stock, 4);
    assert!(updated.featured);
    assert_eq!(updated.name, before.name);
    assert_eq!(updated.price, before.price);
    assert_eq!(updated.discount_price, before.discount_price);
    assert_eq!(updated.tags, before.tags);
}

#[tokio::test]
async fn test_failed_update_leaves_state_untouched() {
    let store = InMemoryStore::seeded();
    let before = store.snapshot().await;

    // Discount above the stored price breaks the invariant
    let err = store
        .update_product(
            1,
            ProductPayload {
                name: Some("Renamed".to_string()),
                discount_price: Some(100.0),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();

    assert!(matches!(err, StorageError::Validation(_)));
    assert_eq!(store.snapshot().await, before);
}

#[tokio::test]
async fn test_missing_ids_are_not_found() {
    let store = InMemoryStore::seeded();

    assert!(store.get_product(999).await.unwrap_err().is_not_found());
    assert!(store
        .update_product(999, ProductPayload::default())
        .await
        .unwrap_err()
        .is_not_found());
    assert!(store.delete_product(999).await.unwrap_err().is_not_found());
    assert!(store.delete_category(999).await.unwrap_err().is_not_found());
    assert!(store
        .reply_to_message(
            999,
            ReplyInput {
                reply_content: "Hi".to_string()
            }
        )
        .await
        .unwrap_err()
        .is_not_found());
}

#[tokio::test]
async fn test_delete_product() {
    let store = InMemoryStore::seeded();
    tokio_test::assert_ok!(store.delete_product(5).await);

    tokio_test::assert_err!(store.get_product(5).await);
    let page = store
        .list_products(&ProductQuery::new().page(1, 100))
        .await
        .unwrap();
    assert_eq!(page.pagination.total_items, 11);
}

#[tokio::test]
async fn test_duplicate_slug_rejected() {
    let store = InMemoryStore::seeded();

    let err = store
        .create_product(new_product("Midnight Oud", 70.0))
        .await
        .unwrap_err();

    assert_eq!(
        err,
        StorageError::DuplicateSlug {
            entity: "product",
            slug: "midnight-oud".to_string()
        }
    );
}

#[tokio::test]
async fn test_product_requires_existing_category() {
    let store = InMemoryStore::seeded();
    let mut payload = new_product("Orphan", 10.0);
    payload.category_id = Some(42);

    let err = store.create_product(payload).await.unwrap_err();
    assert!(matches!(err, StorageError::InvalidReference(_)));
}

#[tokio::test]
async fn test_unslugifiable_names_get_distinct_slugs() {
    let store = InMemoryStore::seeded();

    let first = store
        .create_product(new_product("عطر الورد", 35.0))
        .await
        .unwrap();
    let second = store
        .create_product(new_product("مسك أبيض", 40.0))
        .await
        .unwrap();
    assert_eq!(first.slug, "product-13");
    assert_eq!(second.slug, "product-14");

    let category = store
        .create_category(CategoryPayload {
            name: Some("عطور".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(category.slug, format!("category-{}", category.id));
}

#[tokio::test]
async fn test_orphaned_entities_stay_editable() {
    let store = InMemoryStore::seeded();
    let seasonal = store
        .create_category(CategoryPayload {
            name: Some("Seasonal".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    let winter = store
        .create_category(CategoryPayload {
            name: Some("Winter".to_string()),
            parent_id: Some(seasonal.id),
            ..Default::default()
        })
        .await
        .unwrap();
    let mut payload = new_product("Winter Musk", 30.0);
    payload.category_id = Some(seasonal.id);
    let product = store.create_product(payload).await.unwrap();

    store.delete_category(seasonal.id).await.unwrap();

    let restocked = store
        .update_product(
            product.id,
            ProductPayload {
                stock: Some(99),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(restocked.stock, 99);
    assert_eq!(restocked.category_id, seasonal.id);

    let renamed = store
        .update_category(
            winter.id,
            CategoryPayload {
                name: Some("Deep Winter".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(renamed.name, "Deep Winter");

    // Pointing at a missing reference is still rejected
    let err = store
        .update_product(
            product.id,
            ProductPayload {
                category_id: Some(seasonal.id),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::InvalidReference(_)));

    let err = store
        .update_category(
            winter.id,
            CategoryPayload {
                parent_id: Some(seasonal.id),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::InvalidReference(_)));
}

#[tokio::test]
async fn test_list_products_by_category_name() {
    let store = InMemoryStore::seeded();

    let page = store
        .list_products(
            &ProductQuery::new()
                .with_category(CategoryFilter::Name("perfume".to_string()))
                .sorted_by(SortKey::PriceAsc),
        )
        .await
        .unwrap();

    assert_eq!(page.pagination.total_items, 5);
    let prices: Vec<f64> = page.items.iter().map(|p| p.effective_price()).collect();
    assert_eq!(prices, vec![30.0, 34.0, 36.0, 40.0, 55.0]);
}

#[tokio::test]
async fn test_bulk_actions() {
    let store = InMemoryStore::seeded();

    let affected = store
        .bulk_action(&[1, 2, 999], BulkAction::Deactivate)
        .await
        .unwrap();
    assert_eq!(affected, 2);
    assert_eq!(store.get_product(1).await.unwrap().status, ProductStatus::Inactive);

    let featured = store.bulk_action(&[3], BulkAction::Feature).await.unwrap();
    assert_eq!(featured, 1);
    assert!(store.get_product(3).await.unwrap().featured);

    let deleted = store.bulk_action(&[1, 2], BulkAction::Delete).await.unwrap();
    assert_eq!(deleted, 2);
    assert!(store.get_product(1).await.is_err());
}

#[test]
fn test_bulk_action_parsing() {
    assert_eq!("Unfeature".parse::<BulkAction>(), Ok(BulkAction::Unfeature));
    assert!("archive".parse::<BulkAction>().is_err());
    assert!(BulkAction::Delete.requires_confirmation());
    assert!(!BulkAction::Activate.requires_confirmation());
}

#[tokio::test]
async fn test_category_cycles_rejected_at_any_depth() {
    let store = InMemoryStore::seeded();

    // Perfume(1) <- Floral(3) <- Rose(4)
    let floral = store
        .create_category(CategoryPayload {
            name: Some("Floral".to_string()),
            parent_id: Some(1),
            ..Default::default()
        })
        .await
        .unwrap();
    let rose = store
        .create_category(CategoryPayload {
            name: Some("Rose".to_string()),
            parent_id: Some(floral.id),
            ..Default::default()
        })
        .await
        .unwrap();

    let self_parent = store
        .update_category(
            1,
            CategoryPayload {
                parent_id: Some(1),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(self_parent, StorageError::InvalidReference(_)));

    // Grandchild as parent
    let deep_cycle = store
        .update_category(
            1,
            CategoryPayload {
                parent_id: Some(rose.id),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(deep_cycle, StorageError::InvalidReference(_)));

    // Unrelated re-parenting is fine
    let moved = store
        .update_category(
            rose.id,
            CategoryPayload {
                parent_id: Some(2),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(moved.parent_id, Some(2));
}

#[tokio::test]
async fn test_messages_newest_first_and_reply() {
    let store = InMemoryStore::seeded();

    let created = store
        .create_message(MessageInput {
            name: "Lena".to_string(),
            email: "lena@example.com".to_string(),
            phone: Some("+1 555 0100".to_string()),
            subject: Some("Wholesale".to_string()),
            message: "Do you offer wholesale pricing?".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(created.id, 3);
    assert!(!created.replied);

    let page = store
        .list_messages(&PaginationParams::default())
        .await
        .unwrap();
    assert_eq!(page.items[0].id, 3);
    assert_eq!(page.pagination.total_items, 3);

    let replied = store
        .reply_to_message(
            3,
            ReplyInput {
                reply_content: "Yes, for orders over 50 units.".to_string(),
            },
        )
        .await
        .unwrap();
    assert!(replied.replied);
    assert_eq!(replied.reply.as_deref(), Some("Yes, for orders over 50 units."));
    assert!(replied.replied_at.is_some());

    store.delete_message(3).await.unwrap();
    assert!(store.get_message(3).await.is_err());
}

#[tokio::test]
async fn test_invalid_contact_message_rejected() {
    let store = InMemoryStore::seeded();

    let err = store
        .create_message(MessageInput {
            name: " ".to_string(),
            email: "not-an-email".to_string(),
            message: String::new(),
            ..Default::default()
        })
        .await
        .unwrap_err();

    match err {
        StorageError::Validation(errors) => {
            assert_eq!(errors.fields(), vec!["name", "email", "message"]);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_simulated_failure_does_not_mutate() {
    let store = InMemoryStore::seeded();
    let before = store.snapshot().await;

    store.fail_next("network down");
    let err = store
        .create_product(new_product("Never Stored", 10.0))
        .await
        .unwrap_err();

    assert_eq!(err, StorageError::Simulated("network down".to_string()));
    assert_eq!(store.snapshot().await, before);
}

#[tokio::test(start_paused = true)]
async fn test_latency_is_applied() {
    let store = InMemoryStore::seeded().with_latency(Duration::from_millis(300));

    let started = tokio::time::Instant::now();
    store.get_product(1).await.unwrap();
    assert!(started.elapsed() >= Duration::from_millis(300));
}

#[tokio::test]
async fn test_dashboard_summary() {
    let store = InMemoryStore::seeded().with_low_stock_threshold(90);
    let summary = store.dashboard().await.unwrap();

    assert_eq!(summary.total_products, 12);
    assert_eq!(summary.unread_messages, 1);
    // Only Midnight Oud (80) and Vanilla Dream (90) sit at or below 90
    assert_eq!(summary.inventory.low_stock, 2);
    assert_eq!(summary.recent_products[0].id, 12);
}
