// ABOUTME: Demo catalog loaded into a fresh in-memory store
// ABOUTME: Twelve beauty products across two categories plus two contact messages

use chrono::{Duration, Utc};
use shopx_core::{slugify, Category, CategoryStatus, Message, Product, ProductStatus};

use crate::memory::CatalogState;

const PERFUME: u64 = 1;
const COSMETICS: u64 = 2;

struct SeedProduct {
    name: &'static str,
    price: f64,
    sale_price: f64,
    images: [&'static str; 2],
    category_id: u64,
    description: &'static str,
    stock: u32,
    featured: bool,
    sku: &'static str,
    brand: &'static str,
    tags: [&'static str; 3],
}

const IMG: &str = "https://images.unsplash.com";

fn seed_products() -> Vec<SeedProduct> {
    vec![
        SeedProduct {
            name: "Rose Elegance Perfume",
            price: 45.0,
            sale_price: 40.0,
            images: ["photo-1541643600914-78b084683601", "photo-1594736797933-d0401ba2fe65"],
            category_id: PERFUME,
            description: "Rose Elegance Perfume delivers a timeless floral aroma blended with fresh rose, jasmine, and soft musk. Ideal for daily and evening wear.",
            stock: 120,
            featured: true,
            sku: "PERF-RE-001",
            brand: "Elegance",
            tags: ["floral", "luxury", "women"],
        },
        SeedProduct {
            name: "Midnight Oud",
            price: 60.0,
            sale_price: 55.0,
            images: ["photo-1615634260167-c8cdede054de", "photo-1592945403244-b3fbafd7f539"],
            category_id: PERFUME,
            description: "Midnight Oud blends premium oud, amber, and smoky woods for a bold and long-lasting scent.",
            stock: 80,
            featured: true,
            sku: "PERF-MO-002",
            brand: "Noir",
            tags: ["oud", "men", "oriental"],
        },
        SeedProduct {
            name: "Citrus Breeze",
            price: 35.0,
            sale_price: 30.0,
            images: ["photo-1588405748880-12d1d2a59d75", "photo-1563170351-be82bc888aa4"],
            category_id: PERFUME,
            description: "A refreshing blend of lemon, bergamot, and mint designed for a clean and energetic feel.",
            stock: 150,
            featured: false,
            sku: "PERF-CB-003",
            brand: "FreshCo",
            tags: ["citrus", "unisex", "fresh"],
        },
        SeedProduct {
            name: "Vanilla Dream",
            price: 40.0,
            sale_price: 36.0,
            images: ["photo-1594736797933-d0401ba2fe65", "photo-1541643600914-78b084683601"],
            category_id: PERFUME,
            description: "Vanilla Dream is a warm and comforting scent combining vanilla, orchid, and creamy musk.",
            stock: 90,
            featured: false,
            sku: "PERF-VD-004",
            brand: "DreamScents",
            tags: ["vanilla", "sweet", "women"],
        },
        SeedProduct {
            name: "Ocean Spirit",
            price: 38.0,
            sale_price: 34.0,
            images: ["photo-1563170351-be82bc888aa4", "photo-1588405748880-12d1d2a59d75"],
            category_id: PERFUME,
            description: "Ocean Spirit delivers marine notes mixed with fresh air accords and light woods.",
            stock: 110,
            featured: true,
            sku: "PERF-OS-005",
            brand: "BlueWave",
            tags: ["aquatic", "men", "fresh"],
        },
        SeedProduct {
            name: "Hydra Glow Face Cream",
            price: 25.0,
            sale_price: 22.0,
            images: ["photo-1596462502278-27bfdc403348", "photo-1556228578-8c89e6adf883"],
            category_id: COSMETICS,
            description: "A lightweight moisturizer enriched with vitamins to keep skin soft, smooth, and radiant.",
            stock: 200,
            featured: true,
            sku: "COS-HG-006",
            brand: "SkinCare+",
            tags: ["skincare", "hydration", "face"],
        },
        SeedProduct {
            name: "Matte Finish Foundation",
            price: 30.0,
            sale_price: 27.0,
            images: ["photo-1522335789203-aabd1fc54bc9", "photo-1586495777744-4413f21062fa"],
            category_id: COSMETICS,
            description: "Provides smooth coverage with oil control for a flawless matte finish.",
            stock: 140,
            featured: false,
            sku: "COS-MF-007",
            brand: "BeautyPro",
            tags: ["makeup", "foundation", "matte"],
        },
        SeedProduct {
            name: "Velvet Touch Lipstick",
            price: 15.0,
            sale_price: 13.0,
            images: ["photo-1631214540242-6b5b3e4e7d4b", "photo-1586495777744-4413f21062fa"],
            category_id: COSMETICS,
            description: "Highly pigmented lipstick offering smooth application and long wear.",
            stock: 300,
            featured: false,
            sku: "COS-VT-008",
            brand: "LipLux",
            tags: ["lipstick", "makeup", "beauty"],
        },
        SeedProduct {
            name: "Nourish Hair Serum",
            price: 20.0,
            sale_price: 18.0,
            images: ["photo-1570194065650-d99fb4bedf0a", "photo-1512496015851-a90fb38ba796"],
            category_id: COSMETICS,
            description: "Strengthens hair, reduces frizz, and adds natural shine.",
            stock: 160,
            featured: false,
            sku: "COS-NH-009",
            brand: "HairCare",
            tags: ["hair", "serum", "repair"],
        },
        SeedProduct {
            name: "Smokey Eye Palette",
            price: 28.0,
            sale_price: 25.0,
            images: ["photo-1512496015851-a90fb38ba796", "photo-1522335789203-aabd1fc54bc9"],
            category_id: COSMETICS,
            description: "12-color palette with matte and shimmer shades for versatile makeup styles.",
            stock: 100,
            featured: true,
            sku: "COS-SE-010",
            brand: "GlamStudio",
            tags: ["eyeshadow", "palette", "makeup"],
        },
        SeedProduct {
            name: "Pure Clean Face Wash",
            price: 12.0,
            sale_price: 10.0,
            images: ["photo-1556228578-8c89e6adf883", "photo-1596462502278-27bfdc403348"],
            category_id: COSMETICS,
            description: "Removes dirt and oil while keeping skin soft and refreshed.",
            stock: 220,
            featured: false,
            sku: "COS-PC-011",
            brand: "SkinCare+",
            tags: ["cleanser", "face", "skincare"],
        },
        SeedProduct {
            name: "Sun Shield SPF 50",
            price: 22.0,
            sale_price: 20.0,
            images: ["photo-1556228720-195a672e8a03", "photo-1596462502278-27bfdc403348"],
            category_id: COSMETICS,
            description: "Broad-spectrum SPF 50 sunscreen protecting skin from harmful UV rays.",
            stock: 180,
            featured: true,
            sku: "COS-SS-012",
            brand: "SunCare",
            tags: ["sunscreen", "spf50", "skincare"],
        },
    ]
}

fn image_url(photo: &str) -> String {
    format!("{}/{}?w=400&h=400&fit=crop", IMG, photo)
}

/// First sentence of a description, used as the short description
fn first_sentence(description: &str) -> String {
    match description.find(". ") {
        Some(end) => description[..=end].to_string(),
        None => description.to_string(),
    }
}

/// The demo catalog. Products are created a day apart, oldest first.
pub fn demo_catalog() -> CatalogState {
    let now = Utc::now();
    let seeds = seed_products();
    let count = seeds.len() as i64;

    let products = seeds
        .into_iter()
        .enumerate()
        .map(|(idx, seed)| {
            let images: Vec<String> = seed.images.iter().map(|p| image_url(p)).collect();
            Product {
                id: idx as u64 + 1,
                name: seed.name.to_string(),
                slug: slugify(seed.name),
                short_description: first_sentence(seed.description),
                description: seed.description.to_string(),
                price: seed.price,
                discount_price: Some(seed.sale_price),
                stock: seed.stock,
                sku: Some(seed.sku.to_string()),
                brand: Some(seed.brand.to_string()),
                tags: seed.tags.iter().map(|t| t.to_string()).collect(),
                category_id: seed.category_id,
                main_image: images.first().cloned(),
                images,
                status: ProductStatus::Active,
                featured: seed.featured,
                seo_title: None,
                seo_description: None,
                low_stock_alert: None,
                created_at: now - Duration::days(count - idx as i64),
            }
        })
        .collect();

    let categories = vec![
        Category {
            id: PERFUME,
            name: "Perfume".to_string(),
            slug: "perfume".to_string(),
            description: Some("Luxury fragrances for men and women".to_string()),
            image: None,
            parent_id: None,
            status: CategoryStatus::Active,
            seo_title: None,
            seo_description: None,
            created_at: now - Duration::days(30),
        },
        Category {
            id: COSMETICS,
            name: "Cosmetics".to_string(),
            slug: "cosmetics".to_string(),
            description: Some("Premium makeup and beauty products".to_string()),
            image: None,
            parent_id: None,
            status: CategoryStatus::Active,
            seo_title: None,
            seo_description: None,
            created_at: now - Duration::days(30),
        },
    ];

    let messages = vec![
        Message {
            id: 1,
            name: "Sarah Johnson".to_string(),
            email: "sarah@example.com".to_string(),
            phone: None,
            subject: Some("Product Inquiry".to_string()),
            message: "I'm interested in the Hydra Glow Face Cream. Can you tell me more about it?"
                .to_string(),
            created_at: now,
            replied: false,
            reply: None,
            replied_at: None,
        },
        Message {
            id: 2,
            name: "Mike Chen".to_string(),
            email: "mike@example.com".to_string(),
            phone: None,
            subject: Some("Shipping Question".to_string()),
            message: "How long does shipping usually take?".to_string(),
            created_at: now - Duration::days(1),
            replied: true,
            reply: None,
            replied_at: None,
        },
    ];

    CatalogState {
        products,
        categories,
        messages,
    }
}
