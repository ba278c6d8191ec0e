// ABOUTME: Catalog-wide limits and defaults
// ABOUTME: Single source of truth for field lengths, thresholds and caps

/// Stock level at or below which a product counts as low stock,
/// unless the product carries its own `lowStockAlert`.
pub const DEFAULT_LOW_STOCK_THRESHOLD: u32 = 5;

/// Maximum number of gallery images per product
pub const DEFAULT_MAX_IMAGES: usize = 10;

// Product field limits
pub const PRODUCT_NAME_MAX: usize = 200;
pub const PRODUCT_SHORT_DESCRIPTION_MAX: usize = 200;

// Category field limits
pub const CATEGORY_NAME_MIN: usize = 3;
pub const CATEGORY_NAME_MAX: usize = 100;
pub const CATEGORY_DESCRIPTION_MAX: usize = 300;

// SEO limits shared by products and categories
pub const SEO_TITLE_MAX: usize = 60;
pub const SEO_DESCRIPTION_MAX: usize = 160;
