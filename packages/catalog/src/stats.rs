// ABOUTME: Inventory and dashboard summaries derived from catalog snapshots
// ABOUTME: Pure counts feeding the admin stat cards and recent-products panel

use serde::Serialize;
use shopx_core::{Category, Message, Product, ProductStatus};

use crate::query::{sort_products, SortKey};

/// Number of products shown in the dashboard's recent panel
pub const RECENT_PRODUCTS_LIMIT: usize = 5;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryStats {
    pub total: usize,
    pub active: usize,
    pub featured: usize,
    /// In stock but at or below the low stock threshold
    pub low_stock: usize,
    pub out_of_stock: usize,
}

impl InventoryStats {
    pub fn from_products(products: &[Product], low_stock_threshold: u32) -> Self {
        products.iter().fold(Self::default(), |mut stats, p| {
            stats.total += 1;
            if p.status == ProductStatus::Active {
                stats.active += 1;
            }
            if p.featured {
                stats.featured += 1;
            }
            if p.is_out_of_stock() {
                stats.out_of_stock += 1;
            } else if p.is_low_stock(low_stock_threshold) {
                stats.low_stock += 1;
            }
            stats
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_products: usize,
    pub total_categories: usize,
    pub total_messages: usize,
    pub unread_messages: usize,
    pub inventory: InventoryStats,
    pub recent_products: Vec<Product>,
}

impl DashboardSummary {
    pub fn build(
        products: &[Product],
        categories: &[Category],
        messages: &[Message],
        low_stock_threshold: u32,
    ) -> Self {
        let mut recent = products.to_vec();
        sort_products(&mut recent, SortKey::Newest);
        recent.truncate(RECENT_PRODUCTS_LIMIT);

        Self {
            total_products: products.len(),
            total_categories: categories.len(),
            total_messages: messages.len(),
            unread_messages: messages.iter().filter(|m| !m.replied).count(),
            inventory: InventoryStats::from_products(products, low_stock_threshold),
            recent_products: recent,
        }
    }
}
