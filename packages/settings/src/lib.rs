// ABOUTME: ShopX site settings
// ABOUTME: Typed settings record, per-key validation and an in-memory store

pub mod store;
pub mod types;
pub mod validation;

// Re-export main types
pub use store::{SettingsError, SettingsResult, SettingsStore};
pub use types::{
    BulkSettingUpdate, ContactInfo, SettingCategory, SettingEntry, SettingUpdateItem,
    SiteSettings, SocialLinks,
};
pub use validation::{validate_setting_value, ValidationError, SUPPORTED_CURRENCIES};
