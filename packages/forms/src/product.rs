// ABOUTME: Product form draft with its validation rules and payload normalization
// ABOUTME: Holds field text as typed; numbers are parsed only when normalizing

use async_trait::async_trait;
use shopx_core::constants::{
    PRODUCT_NAME_MAX, PRODUCT_SHORT_DESCRIPTION_MAX, SEO_DESCRIPTION_MAX, SEO_TITLE_MAX,
};
use shopx_core::validation::{char_len, check_max_len};
use shopx_core::{
    is_valid_url, non_blank, Product, ProductPayload, ProductStatus, ValidationErrors,
    DEFAULT_MAX_IMAGES,
};
use shopx_storage::{ProductRepository, StorageResult};

use crate::controller::FormModel;
use crate::images::ImageList;
use crate::slug::SlugField;
use crate::tags::TagList;

#[derive(Debug, Clone, PartialEq)]
pub struct ProductDraft {
    pub name: String,
    pub slug: SlugField,
    pub short_description: String,
    pub description: String,
    pub price: String,
    pub discount_price: String,
    pub stock: String,
    pub sku: String,
    pub brand: String,
    pub tags: TagList,
    pub category_id: String,
    pub main_image: String,
    pub images: ImageList,
    pub status: ProductStatus,
    pub featured: bool,
    pub seo_title: String,
    pub seo_description: String,
    pub low_stock_alert: String,
}

impl Default for ProductDraft {
    fn default() -> Self {
        Self::with_max_images(DEFAULT_MAX_IMAGES)
    }
}

fn text(value: Option<&str>) -> String {
    value.unwrap_or_default().to_string()
}

impl ProductDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Blank draft whose gallery holds at most `max_images` entries
    pub fn with_max_images(max_images: usize) -> Self {
        Self {
            name: String::new(),
            slug: SlugField::auto(),
            short_description: String::new(),
            description: String::new(),
            price: String::new(),
            discount_price: String::new(),
            stock: String::new(),
            sku: String::new(),
            brand: String::new(),
            tags: TagList::new(),
            category_id: String::new(),
            main_image: String::new(),
            images: ImageList::with_cap(max_images),
            status: ProductStatus::Draft,
            featured: false,
            seo_title: String::new(),
            seo_description: String::new(),
            low_stock_alert: String::new(),
        }
    }

    pub fn from_product(product: &Product) -> Self {
        Self::from_product_with_cap(product, DEFAULT_MAX_IMAGES)
    }

    /// Draft of a stored product whose gallery holds at most `max_images`
    pub fn from_product_with_cap(product: &Product, max_images: usize) -> Self {
        Self {
            name: product.name.clone(),
            slug: SlugField::manual(product.slug.clone()),
            short_description: product.short_description.clone(),
            description: product.description.clone(),
            price: product.price.to_string(),
            discount_price: product
                .discount_price
                .map(|p| p.to_string())
                .unwrap_or_default(),
            stock: product.stock.to_string(),
            sku: text(product.sku.as_deref()),
            brand: text(product.brand.as_deref()),
            tags: TagList::from(product.tags.clone()),
            category_id: product.category_id.to_string(),
            main_image: text(product.main_image.as_deref()),
            images: ImageList::from_urls(product.images.clone(), max_images),
            status: product.status,
            featured: product.featured,
            seo_title: text(product.seo_title.as_deref()),
            seo_description: text(product.seo_description.as_deref()),
            low_stock_alert: product
                .low_stock_alert
                .map(|n| n.to_string())
                .unwrap_or_default(),
        }
    }

    pub fn set_name(&mut self, name: &str) {
        self.name = name.to_string();
        self.slug.on_name_change(name);
    }

    pub fn set_slug(&mut self, slug: &str) {
        self.slug.edit(slug);
    }

    pub fn add_tag(&mut self, tag: &str) -> bool {
        self.tags.add(tag)
    }

    pub fn remove_tag(&mut self, tag: &str) -> bool {
        self.tags.remove(tag)
    }

    pub fn add_image(&mut self, url: &str) -> bool {
        let added = self.images.push(url);
        self.sync_main_image();
        added
    }

    /// Adds uploaded images, keeping only what fits under the cap
    pub fn add_images(&mut self, urls: Vec<String>) -> usize {
        let added = self.images.extend(urls);
        self.sync_main_image();
        added
    }

    pub fn remove_image(&mut self, index: usize) -> Option<String> {
        let removed = self.images.remove(index);
        self.sync_main_image();
        removed
    }

    pub fn move_image(&mut self, from: usize, to: usize) -> bool {
        let moved = self.images.move_item(from, to);
        self.sync_main_image();
        moved
    }

    fn sync_main_image(&mut self) {
        self.main_image = self.images.main().unwrap_or_default().to_string();
    }

    /// Checks every rule, keeping the first failure per field
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if self.name.trim().is_empty() {
            errors.add("name", "Product name is required");
        } else if char_len(&self.name) > PRODUCT_NAME_MAX {
            errors.add("name", "Product name must be less than 200 characters");
        }

        if self.short_description.trim().is_empty() {
            errors.add("shortDescription", "Short description is required");
        } else if char_len(&self.short_description) > PRODUCT_SHORT_DESCRIPTION_MAX {
            errors.add(
                "shortDescription",
                "Short description must be less than 200 characters",
            );
        }

        let price = Amount::parse(&self.price);
        match price {
            Amount::Blank => errors.add("price", "Price is required"),
            Amount::Invalid => errors.add("price", "Price must be a valid number"),
            Amount::Value(p) if p <= 0.0 => errors.add("price", "Price must be greater than 0"),
            Amount::Value(_) => {}
        }

        let stock = self.stock.trim();
        if stock.is_empty() {
            errors.add("stock", "Stock quantity is required");
        } else {
            match stock.parse::<i64>() {
                Err(_) => errors.add("stock", "Stock must be a whole number"),
                Ok(n) if n < 0 => errors.add("stock", "Stock cannot be negative"),
                Ok(n) if u32::try_from(n).is_err() => {
                    errors.add("stock", "Stock quantity is too large")
                }
                Ok(_) => {}
            }
        }

        let category = self.category_id.trim();
        if category.is_empty() {
            errors.add("categoryId", "Category is required");
        } else if category.parse::<u64>().is_err() {
            errors.add("categoryId", "Please select a valid category");
        }

        match Amount::parse(&self.discount_price) {
            Amount::Blank => {}
            Amount::Invalid => errors.add("discountPrice", "Discount price must be a valid number"),
            Amount::Value(discount) => {
                if let Amount::Value(price) = price {
                    if discount >= price {
                        errors.add(
                            "discountPrice",
                            "Discount price must be less than regular price",
                        );
                    }
                }
            }
        }

        let main_image = self.main_image.trim();
        if !main_image.is_empty() && !is_valid_url(main_image) {
            errors.add("mainImage", "Please enter a valid image URL");
        }

        let low_stock_alert = self.low_stock_alert.trim();
        if !low_stock_alert.is_empty() && low_stock_alert.parse::<u32>().is_err() {
            errors.add("lowStockAlert", "Low stock alert must be a whole number");
        }

        check_max_len(
            &mut errors,
            "seoTitle",
            &self.seo_title,
            SEO_TITLE_MAX,
            "SEO title must be less than 60 characters",
        );
        check_max_len(
            &mut errors,
            "seoDescription",
            &self.seo_description,
            SEO_DESCRIPTION_MAX,
            "SEO description must be less than 160 characters",
        );

        errors.into_result()
    }

    /// Payload for submission. Blank text becomes an absent field so an
    /// update leaves the stored value alone; numbers are parsed here.
    pub fn normalize(&self) -> ProductPayload {
        ProductPayload {
            name: non_blank(&self.name),
            slug: non_blank(self.slug.value()),
            short_description: non_blank(&self.short_description),
            description: non_blank(&self.description),
            price: Amount::parse(&self.price).value(),
            discount_price: Amount::parse(&self.discount_price).value(),
            stock: self.stock.trim().parse().ok(),
            sku: non_blank(&self.sku),
            brand: non_blank(&self.brand),
            tags: Some(self.tags.to_vec()),
            category_id: self.category_id.trim().parse().ok(),
            main_image: non_blank(&self.main_image),
            images: Some(self.images.to_vec()),
            status: Some(self.status),
            featured: Some(self.featured),
            seo_title: non_blank(&self.seo_title),
            seo_description: non_blank(&self.seo_description),
            low_stock_alert: self.low_stock_alert.trim().parse().ok(),
        }
    }
}

/// A money field as typed
#[derive(Debug, Clone, Copy, PartialEq)]
enum Amount {
    Blank,
    Invalid,
    Value(f64),
}

impl Amount {
    fn parse(value: &str) -> Self {
        let value = value.trim();
        if value.is_empty() {
            return Amount::Blank;
        }
        match value.parse::<f64>() {
            Ok(parsed) if parsed.is_finite() => Amount::Value(parsed),
            _ => Amount::Invalid,
        }
    }

    fn value(self) -> Option<f64> {
        match self {
            Amount::Value(v) => Some(v),
            _ => None,
        }
    }
}

#[async_trait]
impl FormModel for ProductDraft {
    type Entity = Product;
    type Payload = ProductPayload;
    type Context = ();
    type Store = dyn ProductRepository;

    const KIND: &'static str = "product";

    fn defaults() -> Self {
        Self::new()
    }

    fn from_entity(entity: &Product) -> Self {
        Self::from_product(entity)
    }

    fn entity_id(entity: &Product) -> u64 {
        entity.id
    }

    fn set_name(&mut self, name: &str) {
        ProductDraft::set_name(self, name)
    }

    fn set_slug(&mut self, slug: &str) {
        ProductDraft::set_slug(self, slug)
    }

    fn validate(&self, _editing_id: Option<u64>, _context: &()) -> Result<(), ValidationErrors> {
        ProductDraft::validate(self)
    }

    fn normalize(&self) -> ProductPayload {
        ProductDraft::normalize(self)
    }

    async fn persist(
        store: &Self::Store,
        id: Option<u64>,
        payload: ProductPayload,
    ) -> StorageResult<Product> {
        match id {
            Some(id) => store.update_product(id, payload).await,
            None => store.create_product(payload).await,
        }
    }
}
