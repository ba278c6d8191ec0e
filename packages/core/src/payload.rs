// ABOUTME: Normalized submission payloads for products, categories and messages
// ABOUTME: Every field is optional; an absent field is never written on update

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{Category, CategoryStatus, Message, Product, ProductStatus};
use crate::utils::slugify;
use crate::validation::ValidationErrors;

/// Product fields handed to the persistence layer.
///
/// Serialized with absent fields omitted, so `{"discountPrice": ...}` only
/// appears when a discount was actually entered.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ProductStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub featured: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seo_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seo_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub low_stock_alert: Option<u32>,
}

/// Explicit slug, else one derived from the name, else `<entity>-<id>` for
/// names with nothing slugifiable (non-Latin scripts, punctuation only).
fn slug_or_fallback(slug: Option<String>, name: &str, entity: &str, id: u64) -> String {
    slug.filter(|s| !s.is_empty())
        .or_else(|| Some(slugify(name)).filter(|s| !s.is_empty()))
        .unwrap_or_else(|| format!("{}-{}", entity, id))
}

impl ProductPayload {
    /// Builds a new product. Name, price and category are mandatory; the
    /// slug falls back to one derived from the name and the main image to
    /// the first gallery image.
    pub fn into_product(self, id: u64, created_at: DateTime<Utc>) -> Result<Product, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if self.name.is_none() {
            errors.add("name", "Product name is required");
        }
        if self.price.is_none() {
            errors.add("price", "Price is required");
        }
        if self.category_id.is_none() {
            errors.add("categoryId", "Category is required");
        }

        let (Some(name), Some(price), Some(category_id)) = (self.name, self.price, self.category_id)
        else {
            return Err(errors);
        };

        let images = self.images.unwrap_or_default();
        let main_image = self.main_image.or_else(|| images.first().cloned());

        Ok(Product {
            id,
            slug: slug_or_fallback(self.slug, &name, "product", id),
            name,
            short_description: self.short_description.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            price,
            discount_price: self.discount_price,
            stock: self.stock.unwrap_or(0),
            sku: self.sku,
            brand: self.brand,
            tags: self.tags.unwrap_or_default(),
            category_id,
            main_image,
            images,
            status: self.status.unwrap_or_default(),
            featured: self.featured.unwrap_or(false),
            seo_title: self.seo_title,
            seo_description: self.seo_description,
            low_stock_alert: self.low_stock_alert,
            created_at,
        })
    }

    /// Merges the supplied fields into `product`, leaving the rest untouched
    pub fn apply_to(&self, product: &mut Product) {
        if let Some(name) = &self.name {
            product.name = name.clone();
        }
        if let Some(slug) = self.slug.as_ref().filter(|s| !s.is_empty()) {
            product.slug = slug.clone();
        }
        if let Some(short_description) = &self.short_description {
            product.short_description = short_description.clone();
        }
        if let Some(description) = &self.description {
            product.description = description.clone();
        }
        if let Some(price) = self.price {
            product.price = price;
        }
        if let Some(discount_price) = self.discount_price {
            product.discount_price = Some(discount_price);
        }
        if let Some(stock) = self.stock {
            product.stock = stock;
        }
        if let Some(sku) = &self.sku {
            product.sku = Some(sku.clone());
        }
        if let Some(brand) = &self.brand {
            product.brand = Some(brand.clone());
        }
        if let Some(tags) = &self.tags {
            product.tags = tags.clone();
        }
        if let Some(category_id) = self.category_id {
            product.category_id = category_id;
        }
        if let Some(images) = &self.images {
            product.images = images.clone();
            if self.main_image.is_none() {
                product.main_image = images.first().cloned();
            }
        }
        if let Some(main_image) = &self.main_image {
            product.main_image = Some(main_image.clone());
        }
        if let Some(status) = self.status {
            product.status = status;
        }
        if let Some(featured) = self.featured {
            product.featured = featured;
        }
        if let Some(seo_title) = &self.seo_title {
            product.seo_title = Some(seo_title.clone());
        }
        if let Some(seo_description) = &self.seo_description {
            product.seo_description = Some(seo_description.clone());
        }
        if let Some(low_stock_alert) = self.low_stock_alert {
            product.low_stock_alert = Some(low_stock_alert);
        }
    }
}

/// Category fields handed to the persistence layer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<CategoryStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seo_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seo_description: Option<String>,
}

impl CategoryPayload {
    pub fn into_category(self, id: u64, created_at: DateTime<Utc>) -> Result<Category, ValidationErrors> {
        let Some(name) = self.name else {
            return Err(crate::validation::FieldError::new("name", "Category name is required").into());
        };

        Ok(Category {
            id,
            slug: slug_or_fallback(self.slug, &name, "category", id),
            name,
            description: self.description,
            image: self.image,
            parent_id: self.parent_id,
            status: self.status.unwrap_or_default(),
            seo_title: self.seo_title,
            seo_description: self.seo_description,
            created_at,
        })
    }

    pub fn apply_to(&self, category: &mut Category) {
        if let Some(name) = &self.name {
            category.name = name.clone();
        }
        if let Some(slug) = self.slug.as_ref().filter(|s| !s.is_empty()) {
            category.slug = slug.clone();
        }
        if let Some(description) = &self.description {
            category.description = Some(description.clone());
        }
        if let Some(image) = &self.image {
            category.image = Some(image.clone());
        }
        if let Some(parent_id) = self.parent_id {
            category.parent_id = Some(parent_id);
        }
        if let Some(status) = self.status {
            category.status = status;
        }
        if let Some(seo_title) = &self.seo_title {
            category.seo_title = Some(seo_title.clone());
        }
        if let Some(seo_description) = &self.seo_description {
            category.seo_description = Some(seo_description.clone());
        }
    }
}

/// Public contact form submission
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageInput {
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    pub message: String,
}

impl MessageInput {
    pub fn into_message(self, id: u64, created_at: DateTime<Utc>) -> Message {
        Message {
            id,
            name: self.name,
            email: self.email,
            phone: self.phone,
            subject: self.subject,
            message: self.message,
            created_at,
            replied: false,
            reply: None,
            replied_at: None,
        }
    }
}

/// Admin reply to a contact message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplyInput {
    pub reply_content: String,
}
