// ABOUTME: Type definitions for site settings
// ABOUTME: The settings record plus flat key/value views used for updates and display

use serde::{Deserialize, Serialize};
use shopx_core::DEFAULT_LOW_STOCK_THRESHOLD;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactInfo {
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub address: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialLinks {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub facebook: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instagram: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteSettings {
    pub site_name: String,
    pub site_description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub favicon: Option<String>,
    pub contact_info: ContactInfo,
    #[serde(default)]
    pub social_links: SocialLinks,
    pub currency: String,
    /// Store-wide low stock default; products may override it
    pub low_stock_threshold: u32,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            site_name: "ShopX Beauty".to_string(),
            site_description: "Premium beauty products for everyone".to_string(),
            logo: None,
            favicon: None,
            contact_info: ContactInfo {
                email: "contact@shopx.com".to_string(),
                phone: "+1 (555) 123-4567".to_string(),
                address: String::new(),
            },
            social_links: SocialLinks::default(),
            currency: "USD".to_string(),
            low_stock_threshold: DEFAULT_LOW_STOCK_THRESHOLD,
        }
    }
}

fn optional(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

impl SiteSettings {
    /// Writes an already-validated value. Returns false for an unknown key.
    pub(crate) fn set(&mut self, key: &str, value: &str) -> bool {
        match key {
            "site_name" => self.site_name = value.to_string(),
            "site_description" => self.site_description = value.to_string(),
            "logo" => self.logo = optional(value),
            "favicon" => self.favicon = optional(value),
            "contact_email" => self.contact_info.email = value.to_string(),
            "contact_phone" => self.contact_info.phone = value.to_string(),
            "contact_address" => self.contact_info.address = value.to_string(),
            "facebook" => self.social_links.facebook = optional(value),
            "twitter" => self.social_links.twitter = optional(value),
            "instagram" => self.social_links.instagram = optional(value),
            "linkedin" => self.social_links.linkedin = optional(value),
            "currency" => self.currency = value.to_string(),
            "low_stock_threshold" => match value.parse() {
                Ok(threshold) => self.low_stock_threshold = threshold,
                Err(_) => return false,
            },
            _ => return false,
        }
        true
    }

    /// Flat key/value listing, in display order
    pub fn entries(&self) -> Vec<SettingEntry> {
        use SettingCategory::{Contact, General, Social, Store};

        let text = |value: &Option<String>| value.clone().unwrap_or_default();
        let contact = &self.contact_info;
        let social = &self.social_links;

        [
            ("site_name", self.site_name.clone(), General),
            ("site_description", self.site_description.clone(), General),
            ("logo", text(&self.logo), General),
            ("favicon", text(&self.favicon), General),
            ("contact_email", contact.email.clone(), Contact),
            ("contact_phone", contact.phone.clone(), Contact),
            ("contact_address", contact.address.clone(), Contact),
            ("facebook", text(&social.facebook), Social),
            ("twitter", text(&social.twitter), Social),
            ("instagram", text(&social.instagram), Social),
            ("linkedin", text(&social.linkedin), Social),
            ("currency", self.currency.clone(), Store),
            ("low_stock_threshold", self.low_stock_threshold.to_string(), Store),
        ]
        .into_iter()
        .map(|(key, value, category)| SettingEntry {
            key: key.to_string(),
            value,
            category,
        })
        .collect()
    }
}

/// One setting as shown in listings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingEntry {
    pub key: String,
    pub value: String,
    pub category: SettingCategory,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettingUpdateItem {
    pub key: String,
    pub value: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkSettingUpdate {
    pub settings: Vec<SettingUpdateItem>,
}

/// Category enum for settings organization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SettingCategory {
    General,
    Contact,
    Social,
    Store,
}

impl SettingCategory {
    pub fn as_str(&self) -> &str {
        match self {
            SettingCategory::General => "general",
            SettingCategory::Contact => "contact",
            SettingCategory::Social => "social",
            SettingCategory::Store => "store",
        }
    }
}
