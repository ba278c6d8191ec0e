// ABOUTME: In-memory holder for the site settings
// ABOUTME: Every update is validated first; bulk updates apply all or nothing

use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::types::{BulkSettingUpdate, SiteSettings};
use crate::validation::{validate_setting_value, ValidationError};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SettingsError {
    #[error("Invalid value for {key}: {source}")]
    Invalid {
        key: String,
        #[source]
        source: ValidationError,
    },
}

pub type SettingsResult<T> = Result<T, SettingsError>;

#[derive(Default)]
pub struct SettingsStore {
    settings: RwLock<SiteSettings>,
}

impl SettingsStore {
    pub fn new(settings: SiteSettings) -> Self {
        Self {
            settings: RwLock::new(settings),
        }
    }

    pub async fn get(&self) -> SiteSettings {
        debug!("Reading site settings");
        self.settings.read().await.clone()
    }

    /// Validates and writes one setting, returning the updated settings
    pub async fn update(&self, key: &str, value: &str) -> SettingsResult<SiteSettings> {
        check(key, value)?;

        let mut settings = self.settings.write().await;
        settings.set(key, value);
        info!("Updated setting: {}", key);
        Ok(settings.clone())
    }

    /// Validates every item before writing any of them
    pub async fn update_bulk(&self, update: BulkSettingUpdate) -> SettingsResult<SiteSettings> {
        for item in &update.settings {
            check(&item.key, &item.value)?;
        }

        let mut settings = self.settings.write().await;
        for item in &update.settings {
            settings.set(&item.key, &item.value);
        }
        info!("Updated {} settings", update.settings.len());
        Ok(settings.clone())
    }
}

fn check(key: &str, value: &str) -> SettingsResult<()> {
    validate_setting_value(key, value).map_err(|source| {
        warn!("Rejected setting {}: {}", key, source);
        SettingsError::Invalid {
            key: key.to_string(),
            source,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SettingUpdateItem;
    use pretty_assertions::assert_eq;

    fn item(key: &str, value: &str) -> SettingUpdateItem {
        SettingUpdateItem {
            key: key.to_string(),
            value: value.to_string(),
        }
    }

    #[tokio::test]
    async fn test_defaults() {
        let settings = SettingsStore::default().get().await;
        assert_eq!(settings.site_name, "ShopX Beauty");
        assert_eq!(settings.contact_info.email, "contact@shopx.com");
        assert_eq!(settings.low_stock_threshold, 5);
    }

    #[tokio::test]
    async fn test_update_single_setting() {
        let store = SettingsStore::default();

        let settings = store.update("twitter", "https://twitter.com/shopx").await.unwrap();
        assert_eq!(
            settings.social_links.twitter.as_deref(),
            Some("https://twitter.com/shopx")
        );

        let settings = store.update("twitter", "").await.unwrap();
        assert_eq!(settings.social_links.twitter, None);

        let settings = store.update("low_stock_threshold", "12").await.unwrap();
        assert_eq!(settings.low_stock_threshold, 12);
    }

    #[tokio::test]
    async fn test_invalid_update_is_rejected() {
        let store = SettingsStore::default();

        let err = store.update("contact_email", "nope").await.unwrap_err();
        assert_eq!(
            err,
            SettingsError::Invalid {
                key: "contact_email".to_string(),
                source: ValidationError::InvalidEmail("nope".to_string()),
            }
        );
        assert_eq!(store.get().await, SiteSettings::default());
    }

    #[tokio::test]
    async fn test_bulk_update_is_all_or_nothing() {
        let store = SettingsStore::default();

        let result = store
            .update_bulk(BulkSettingUpdate {
                settings: vec![item("site_name", "Glow Shop"), item("currency", "XYZ")],
            })
            .await;
        assert!(result.is_err());
        assert_eq!(store.get().await.site_name, "ShopX Beauty");

        let settings = store
            .update_bulk(BulkSettingUpdate {
                settings: vec![item("site_name", "Glow Shop"), item("currency", "EUR")],
            })
            .await
            .unwrap();
        assert_eq!(settings.site_name, "Glow Shop");
        assert_eq!(settings.currency, "EUR");
    }

    #[test]
    fn test_default_entries_are_valid() {
        let entries = SiteSettings::default().entries();
        assert_eq!(entries.len(), 13);
        for entry in entries {
            assert_eq!(
                validate_setting_value(&entry.key, &entry.value),
                Ok(()),
                "default for {} should validate",
                entry.key
            );
        }
    }
}
