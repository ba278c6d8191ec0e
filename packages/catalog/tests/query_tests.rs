// ABOUTME: Integration tests for the catalog query engine
// ABOUTME: Covers filter composition, sort stability, pagination math and stats

use chrono::Utc;
use pretty_assertions::assert_eq;
use rstest::rstest;
use shopx_catalog::{
    query, CategoryFilter, DashboardSummary, InventoryStats, PaginationParams, ProductQuery,
    QueryEngine, SortKey,
};
use shopx_core::{Category, CategoryStatus, Message, Product, ProductStatus};

fn product(id: u64, name: &str, price: f64) -> Product {
    Product {
        id,
        name: name.to_string(),
        slug: shopx_core::slugify(name),
        short_description: String::new(),
        description: format!("{} description", name),
        price,
        discount_price: None,
        stock: 50,
        sku: None,
        brand: None,
        tags: vec![],
        category_id: 1,
        main_image: None,
        images: vec![],
        status: ProductStatus::Active,
        featured: false,
        seo_title: None,
        seo_description: None,
        low_stock_alert: None,
        created_at: Utc::now(),
    }
}

fn category(id: u64, name: &str) -> Category {
    Category {
        id,
        name: name.to_string(),
        slug: shopx_core::slugify(name),
        description: None,
        image: None,
        parent_id: None,
        status: CategoryStatus::Active,
        seo_title: None,
        seo_description: None,
        created_at: Utc::now(),
    }
}

/// 25 products; every fifth is inactive, every fourth carries a discount
fn twenty_five_products() -> Vec<Product> {
    (1..=25u64)
        .map(|i| {
            let mut p = product(i, &format!("Product {:02}", i), ((i * 7) % 25 + 1) as f64 * 2.0);
            if i % 5 == 0 {
                p.status = ProductStatus::Inactive;
            }
            if i % 4 == 0 {
                p.discount_price = Some(p.price - 1.5);
            }
            p.stock = (i % 9) as u32;
            p.category_id = if i % 2 == 0 { 1 } else { 2 };
            p
        })
        .collect()
}

fn ids(products: &[Product]) -> Vec<u64> {
    products.iter().map(|p| p.id).collect()
}

#[test]
fn test_active_by_price_second_page() {
    let collection = twenty_five_products();
    let params = ProductQuery::new()
        .with_status(ProductStatus::Active)
        .sorted_by(SortKey::PriceAsc)
        .page(2, 10);

    let page = query(&collection, &params);

    // Expected ranking computed independently: effective price, then input order
    let mut expected: Vec<(f64, usize, u64)> = collection
        .iter()
        .enumerate()
        .filter(|(_, p)| p.status == ProductStatus::Active)
        .map(|(idx, p)| (p.effective_price(), idx, p.id))
        .collect();
    expected.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
    let expected_ids: Vec<u64> = expected[10..20].iter().map(|e| e.2).collect();

    assert_eq!(ids(&page.items), expected_ids);
    assert_eq!(page.pagination.current_page, 2);
    assert_eq!(page.pagination.total_items, 20);
    assert_eq!(page.pagination.total_pages, 2);
    assert!(page.pagination.has_prev);
    assert!(!page.pagination.has_next);
}

#[rstest]
#[case(1, 10)]
#[case(2, 10)]
#[case(3, 10)]
#[case(1, 12)]
#[case(2, 7)]
#[case(9, 3)]
fn test_pagination_metadata_agrees_with_count(#[case] page: i64, #[case] limit: i64) {
    let collection = twenty_five_products();
    let result = query(&collection, &ProductQuery::new().page(page, limit));

    let total = collection.len() as i64;
    let total_pages = (total + limit - 1) / limit;
    assert_eq!(result.pagination.total_pages, total_pages);
    assert_eq!(result.pagination.has_next, page < total_pages);
    assert_eq!(result.pagination.has_prev, page > 1);

    let expected_len = (total - (page - 1) * limit).clamp(0, limit) as usize;
    assert_eq!(result.items.len(), expected_len);
}

#[test]
fn test_empty_result_page_one() {
    let collection = twenty_five_products();
    let page = query(&collection, &ProductQuery::new().with_search("no such product"));

    assert!(page.items.is_empty());
    assert_eq!(page.pagination.total_items, 0);
    assert_eq!(page.pagination.total_pages, 0);
    assert!(!page.pagination.has_next);
    assert!(!page.pagination.has_prev);
}

#[test]
fn test_out_of_range_page_is_empty_not_error() {
    let collection = twenty_five_products();
    let page = query(&collection, &ProductQuery::new().page(40, 10));

    assert!(page.items.is_empty());
    assert_eq!(page.pagination.total_items, 25);
    assert_eq!(page.pagination.current_page, 40);
    assert!(page.pagination.has_prev);
}

#[test]
fn test_page_clamped_to_one() {
    let collection = twenty_five_products();
    let page = query(&collection, &ProductQuery::new().page(-3, 10));
    assert_eq!(page.pagination.current_page, 1);
    assert_eq!(page.items.len(), 10);
}

#[test]
fn test_filtering_is_idempotent() {
    let collection = twenty_five_products();
    let engine = QueryEngine::default();
    let params = ProductQuery::new()
        .with_status(ProductStatus::Active)
        .with_price_range(Some(10.0), Some(40.0));

    let once = engine.filter_products(&collection, &[], &params);
    let twice = engine.filter_products(&once, &[], &params);

    assert!(!once.is_empty());
    assert_eq!(once, twice);
}

#[test]
fn test_equal_keys_keep_input_order() {
    let collection = vec![
        product(1, "Alpha", 20.0),
        product(2, "Bravo", 10.0),
        product(3, "Charlie", 20.0),
        product(4, "Delta", 10.0),
        product(5, "Echo", 20.0),
    ];

    let asc = query(&collection, &ProductQuery::new().sorted_by(SortKey::PriceAsc));
    assert_eq!(ids(&asc.items), vec![2, 4, 1, 3, 5]);

    let desc = query(&collection, &ProductQuery::new().sorted_by(SortKey::PriceDesc));
    assert_eq!(ids(&desc.items), vec![1, 3, 5, 2, 4]);

    let stock = query(&collection, &ProductQuery::new().sorted_by(SortKey::StockAsc));
    assert_eq!(ids(&stock.items), vec![1, 2, 3, 4, 5]);
}

#[test]
fn test_newest_is_default_and_reverses_insertion_order() {
    let collection = vec![product(1, "A", 1.0), product(2, "B", 1.0), product(3, "C", 1.0)];

    let newest = query(&collection, &ProductQuery::new());
    assert_eq!(ids(&newest.items), vec![3, 2, 1]);

    let oldest = query(&collection, &ProductQuery::new().sorted_by(SortKey::Oldest));
    assert_eq!(ids(&oldest.items), vec![1, 2, 3]);

    let unknown = query(
        &collection,
        &ProductQuery::new().sorted_by(SortKey::parse_lossy("trending")),
    );
    assert_eq!(ids(&unknown.items), vec![3, 2, 1]);
}

#[test]
fn test_name_sorting() {
    let collection = vec![
        product(1, "midnight Oud", 1.0),
        product(2, "Citrus Breeze", 1.0),
        product(3, "Vanilla Dream", 1.0),
    ];

    let asc = query(&collection, &ProductQuery::new().sorted_by(SortKey::NameAsc));
    assert_eq!(ids(&asc.items), vec![2, 1, 3]);

    let desc = query(&collection, &ProductQuery::new().sorted_by(SortKey::NameDesc));
    assert_eq!(ids(&desc.items), vec![3, 1, 2]);
}

#[test]
fn test_search_is_case_insensitive_over_name_and_description() {
    let mut serum = product(1, "Nourish Hair Serum", 18.0);
    serum.description = "Strengthens hair and adds shine".to_string();
    let mut cream = product(2, "Hydra Glow Face Cream", 22.0);
    cream.description = "Lightweight moisturizer".to_string();
    let collection = vec![serum, cream];

    let by_name = query(&collection, &ProductQuery::new().with_search("SERUM"));
    assert_eq!(ids(&by_name.items), vec![1]);

    let by_description = query(&collection, &ProductQuery::new().with_search("moisturizer"));
    assert_eq!(ids(&by_description.items), vec![2]);

    let blank = query(&collection, &ProductQuery::new().with_search("   "));
    assert_eq!(blank.items.len(), 2);
}

#[test]
fn test_search_covers_short_description_but_not_brand() {
    let mut musk = product(1, "White Musk", 30.0);
    musk.short_description = "Clean powdery finish".to_string();
    musk.brand = Some("Atelier Noor".to_string());
    musk.tags = vec!["fresh".to_string()];
    let collection = vec![musk];

    let by_short = query(&collection, &ProductQuery::new().with_search("powdery"));
    assert_eq!(ids(&by_short.items), vec![1]);

    let by_brand = query(&collection, &ProductQuery::new().with_search("atelier"));
    assert!(by_brand.items.is_empty());

    let by_tag = query(&collection, &ProductQuery::new().with_search("fresh"));
    assert!(by_tag.items.is_empty());
}

#[test]
fn test_price_bounds_use_effective_price_inclusively() {
    let mut discounted = product(1, "Discounted", 50.0);
    discounted.discount_price = Some(30.0);
    let collection = vec![discounted, product(2, "Full", 30.0), product(3, "Pricey", 50.0)];

    let page = query(
        &collection,
        &ProductQuery::new()
            .with_price_range(Some(30.0), Some(30.0))
            .sorted_by(SortKey::Oldest),
    );
    assert_eq!(ids(&page.items), vec![1, 2]);
}

#[test]
fn test_category_filter_by_id_and_name() {
    let collection = twenty_five_products();
    let categories = vec![category(1, "Perfume"), category(2, "Cosmetics")];
    let engine = QueryEngine::default();

    let by_id = engine.query(
        &collection,
        &ProductQuery::new().with_category(CategoryFilter::Id(1)).page(1, 100),
    );
    assert!(by_id.items.iter().all(|p| p.category_id == 1));
    assert_eq!(by_id.items.len(), 12);

    let by_name = engine.query_with_categories(
        &collection,
        &categories,
        &ProductQuery::new()
            .with_category(CategoryFilter::Name("Cosmetics".to_string()))
            .page(1, 100),
    );
    assert!(by_name.items.iter().all(|p| p.category_id == 2));
    assert_eq!(by_name.items.len(), 13);

    // Name matching is case-sensitive
    let wrong_case = engine.query_with_categories(
        &collection,
        &categories,
        &ProductQuery::new().with_category(CategoryFilter::Name("COSMETICS".to_string())),
    );
    assert!(wrong_case.items.is_empty());
}

#[test]
fn test_featured_and_low_stock_filters() {
    let mut featured = product(1, "Featured", 10.0);
    featured.featured = true;
    let mut low = product(2, "Low", 10.0);
    low.stock = 5;
    let mut custom_threshold = product(3, "Custom", 10.0);
    custom_threshold.stock = 8;
    custom_threshold.low_stock_alert = Some(10);
    let collection = vec![featured, low, custom_threshold, product(4, "Plenty", 10.0)];

    let featured_only = query(&collection, &ProductQuery::new().featured_only());
    assert_eq!(ids(&featured_only.items), vec![1]);

    let mut not_featured = ProductQuery::new();
    not_featured.featured = Some(false);
    assert_eq!(query(&collection, &not_featured).items.len(), 4);

    let low_stock = query(
        &collection,
        &ProductQuery::new().low_stock_only().sorted_by(SortKey::Oldest),
    );
    assert_eq!(ids(&low_stock.items), vec![2, 3]);

    let stricter = QueryEngine::new(2).query(
        &collection,
        &ProductQuery::new().low_stock_only().sorted_by(SortKey::Oldest),
    );
    assert_eq!(ids(&stricter.items), vec![3]);
}

#[test]
fn test_identical_inputs_give_identical_output() {
    let collection = twenty_five_products();
    let params = ProductQuery::new().sorted_by(SortKey::StockDesc).page(2, 7);

    assert_eq!(query(&collection, &params), query(&collection, &params));
}

#[test]
fn test_inventory_stats() {
    let collection = twenty_five_products();
    let stats = InventoryStats::from_products(&collection, 5);

    assert_eq!(stats.total, 25);
    assert_eq!(stats.active, 20);
    // stock = i % 9: zero for 9 and 18
    assert_eq!(stats.out_of_stock, 2);
    // stock 1..=5 for i % 9 in 1..=5
    let expected_low = (1..=25u64).filter(|i| (1..=5).contains(&(i % 9))).count();
    assert_eq!(stats.low_stock, expected_low);
}

#[test]
fn test_dashboard_summary() {
    let collection = twenty_five_products();
    let categories = vec![category(1, "Perfume"), category(2, "Cosmetics")];
    let messages = vec![
        Message {
            id: 1,
            name: "Sarah".to_string(),
            email: "sarah@example.com".to_string(),
            phone: None,
            subject: None,
            message: "Hello".to_string(),
            created_at: Utc::now(),
            replied: false,
            reply: None,
            replied_at: None,
        },
        Message {
            id: 2,
            name: "Mike".to_string(),
            email: "mike@example.com".to_string(),
            phone: None,
            subject: None,
            message: "Shipping?".to_string(),
            created_at: Utc::now(),
            replied: true,
            reply: Some("3-5 days".to_string()),
            replied_at: Some(Utc::now()),
        },
    ];

    let summary = DashboardSummary::build(&collection, &categories, &messages, 5);

    assert_eq!(summary.total_products, 25);
    assert_eq!(summary.total_categories, 2);
    assert_eq!(summary.unread_messages, 1);
    assert_eq!(ids(&summary.recent_products), vec![25, 24, 23, 22, 21]);
}

#[test]
fn test_paginate_generic_helper() {
    let page = shopx_catalog::paginate(vec!["a", "b", "c"], &PaginationParams::with_page_and_limit(2, 2));
    assert_eq!(page.items, vec!["c"]);
    assert!(!page.pagination.has_next);
}
