// ABOUTME: Environment variable name constants
// ABOUTME: Centralized definitions of all environment variable names read by ShopX

// Catalog
pub const SHOPX_PAGE_SIZE: &str = "SHOPX_PAGE_SIZE";
pub const SHOPX_LOW_STOCK_THRESHOLD: &str = "SHOPX_LOW_STOCK_THRESHOLD";
pub const SHOPX_MAX_IMAGES: &str = "SHOPX_MAX_IMAGES";

// Simulated backend
pub const SHOPX_LATENCY_MS: &str = "SHOPX_LATENCY_MS";
pub const SHOPX_SEED_DEMO_DATA: &str = "SHOPX_SEED_DEMO_DATA";

// Admin account
pub const SHOPX_ADMIN_USERNAME: &str = "SHOPX_ADMIN_USERNAME";
pub const SHOPX_ADMIN_PASSWORD: &str = "SHOPX_ADMIN_PASSWORD";

// Logging
pub const RUST_LOG: &str = "RUST_LOG";
