use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::constants::DEFAULT_LOW_STOCK_THRESHOLD;

/// Lifecycle status of a product
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum ProductStatus {
    Draft,
    Active,
    Inactive,
}

impl Default for ProductStatus {
    fn default() -> Self {
        ProductStatus::Draft
    }
}

impl fmt::Display for ProductStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProductStatus::Draft => write!(f, "DRAFT"),
            ProductStatus::Active => write!(f, "ACTIVE"),
            ProductStatus::Inactive => write!(f, "INACTIVE"),
        }
    }
}

impl FromStr for ProductStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "DRAFT" => Ok(ProductStatus::Draft),
            "ACTIVE" => Ok(ProductStatus::Active),
            "INACTIVE" => Ok(ProductStatus::Inactive),
            _ => Err(format!("Unknown product status: {}", s)),
        }
    }
}

/// Visibility status of a category
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum CategoryStatus {
    Active,
    Inactive,
}

impl Default for CategoryStatus {
    fn default() -> Self {
        CategoryStatus::Active
    }
}

impl fmt::Display for CategoryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryStatus::Active => write!(f, "ACTIVE"),
            CategoryStatus::Inactive => write!(f, "INACTIVE"),
        }
    }
}

impl FromStr for CategoryStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "ACTIVE" => Ok(CategoryStatus::Active),
            "INACTIVE" => Ok(CategoryStatus::Inactive),
            _ => Err(format!("Unknown category status: {}", s)),
        }
    }
}

/// A catalog product
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: u64,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub short_description: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount_price: Option<f64>,
    pub stock: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub category_id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main_image: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub status: ProductStatus,
    #[serde(default)]
    pub featured: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seo_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seo_description: Option<String>,
    /// Per-product low stock threshold; falls back to the catalog default
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub low_stock_alert: Option<u32>,
    pub created_at: DateTime<Utc>,
}

impl Product {
    /// Discount price when present and below the regular price, else the price.
    pub fn effective_price(&self) -> f64 {
        match self.discount_price {
            Some(discount) if discount < self.price => discount,
            _ => self.price,
        }
    }

    /// Low stock threshold for this product, given the catalog-wide default
    pub fn low_stock_threshold(&self, default_threshold: u32) -> u32 {
        self.low_stock_alert.unwrap_or(default_threshold)
    }

    pub fn is_low_stock(&self, default_threshold: u32) -> bool {
        self.stock <= self.low_stock_threshold(default_threshold)
    }

    pub fn is_out_of_stock(&self) -> bool {
        self.stock == 0
    }

    pub fn is_low_stock_default(&self) -> bool {
        self.is_low_stock(DEFAULT_LOW_STOCK_THRESHOLD)
    }
}

/// A product category, optionally nested under a parent
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: u64,
    pub name: String,
    pub slug: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<u64>,
    #[serde(default)]
    pub status: CategoryStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seo_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seo_description: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A contact-form inquiry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: u64,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    pub message: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub replied: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reply: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replied_at: Option<DateTime<Utc>>,
}

/// Walks the parent chain starting at `start` and reports whether `target`
/// is reached. Stops on the first repeated id so corrupted data cannot loop.
pub fn is_ancestor_or_self(categories: &[Category], start: u64, target: u64) -> bool {
    let mut seen = Vec::new();
    let mut current = Some(start);

    while let Some(id) = current {
        if id == target {
            return true;
        }
        if seen.contains(&id) {
            return false;
        }
        seen.push(id);
        current = categories
            .iter()
            .find(|c| c.id == id)
            .and_then(|c| c.parent_id);
    }

    false
}
