// ABOUTME: Application context shared by every shopx subcommand
// ABOUTME: Builds the store, auth service and settings from the loaded configuration

use std::sync::Arc;

use shopx_auth::{Admin, AdminCredentials, AuthService};
use shopx_config::Config;
use shopx_core::Product;
use shopx_forms::{CategoryForm, ProductDraft, ProductForm};
use shopx_settings::{BulkSettingUpdate, SettingsStore, SiteSettings};
use shopx_storage::{CatalogState, InMemoryStore};
use tracing::{debug, info};

use crate::error::{CliError, CliResult};

pub struct AppContext {
    pub config: Config,
    pub store: Arc<InMemoryStore>,
    pub auth: AuthService,
    pub settings: SettingsStore,
}

impl AppContext {
    pub fn new(config: Config) -> Self {
        let state = if config.seed_demo_data {
            shopx_storage::demo_catalog()
        } else {
            CatalogState::default()
        };
        debug!(
            products = state.products.len(),
            categories = state.categories.len(),
            "Loaded catalog"
        );

        let store = InMemoryStore::with_state(state)
            .with_latency(config.latency)
            .with_low_stock_threshold(config.low_stock_threshold);

        let auth = AuthService::new(AdminCredentials::new(
            config.admin_username.clone(),
            config.admin_password.clone(),
        ))
        .with_latency(config.latency);

        let settings = SettingsStore::new(SiteSettings {
            low_stock_threshold: config.low_stock_threshold,
            ..SiteSettings::default()
        });

        Self {
            store: Arc::new(store),
            auth,
            settings,
            config,
        }
    }

    pub fn from_env() -> CliResult<Self> {
        Ok(Self::new(Config::from_env()?))
    }

    /// Logs in for a mutating command. Explicit flags win over the configured
    /// admin credentials.
    pub async fn sign_in(&self, username: Option<&str>, password: Option<&str>) -> CliResult<Admin> {
        let username = username.unwrap_or(&self.config.admin_username);
        let password = password.unwrap_or(&self.config.admin_password);

        let session = self.auth.login(username, password).await?;
        info!("Signed in as {}", session.admin.username);
        Ok(session.admin)
    }

    /// Applies settings changes and pushes the low stock default into the
    /// catalog store, so listings and the dashboard use the saved value.
    pub async fn update_settings(&self, update: BulkSettingUpdate) -> CliResult<SiteSettings> {
        let settings = self.settings.update_bulk(update).await?;
        self.store.set_low_stock_threshold(settings.low_stock_threshold);
        Ok(settings)
    }

    /// Fresh product form whose gallery cap follows the configuration
    pub fn product_form(&self) -> ProductForm {
        let mut form = ProductForm::new();
        form.open_new(());
        if let Some(draft) = form.draft_mut() {
            *draft = ProductDraft::with_max_images(self.config.max_images);
        }
        form
    }

    /// Product form opened on `product`, with the configured gallery cap
    pub fn edit_product_form(&self, product: &Product) -> ProductForm {
        let mut form = ProductForm::new();
        form.open_existing(product, ());
        if let Some(draft) = form.draft_mut() {
            *draft = ProductDraft::from_product_with_cap(product, self.config.max_images);
        }
        form
    }

    pub fn category_form(&self) -> CategoryForm {
        CategoryForm::new()
    }
}

/// Parses a comma separated id list such as `1, 4,7`
pub fn parse_ids(raw: &str) -> CliResult<Vec<u64>> {
    let mut ids = Vec::new();
    for part in raw.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let id = part
            .parse::<u64>()
            .map_err(|_| CliError::InvalidInput(format!("'{}' is not a product id", part)))?;
        if !ids.contains(&id) {
            ids.push(id);
        }
    }

    if ids.is_empty() {
        return Err(CliError::InvalidInput("No product ids given".to_string()));
    }
    Ok(ids)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use shopx_auth::AuthError;
    use shopx_catalog::ProductQuery;
    use shopx_settings::SettingUpdateItem;
    use shopx_storage::ProductRepository;

    fn config() -> Config {
        Config::default()
    }

    #[rstest]
    #[case("1,2,3", vec![1, 2, 3])]
    #[case(" 4 , 7,", vec![4, 7])]
    #[case("5,5,6", vec![5, 6])]
    fn test_parse_ids(#[case] raw: &str, #[case] expected: Vec<u64>) {
        assert_eq!(parse_ids(raw).unwrap(), expected);
    }

    #[test]
    fn test_parse_ids_rejects_garbage() {
        assert!(matches!(parse_ids("1,x"), Err(CliError::InvalidInput(_))));
        assert!(matches!(parse_ids(" , "), Err(CliError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_context_is_seeded_by_default() {
        let ctx = AppContext::new(config());
        let product = ctx.store.get_product(1).await.unwrap();
        assert_eq!(product.id, 1);
        assert_eq!(ctx.store.low_stock_threshold(), 5);
        assert_eq!(ctx.settings.get().await.low_stock_threshold, 5);
    }

    #[tokio::test]
    async fn test_empty_catalog_when_seeding_disabled() {
        let ctx = AppContext::new(Config {
            seed_demo_data: false,
            ..config()
        });
        assert!(ctx.store.snapshot().await.products.is_empty());
    }

    #[tokio::test]
    async fn test_sign_in_uses_configured_credentials() {
        let ctx = AppContext::new(Config {
            admin_username: "owner".to_string(),
            admin_password: "hunter22".to_string(),
            ..config()
        });

        assert!(matches!(
            ctx.sign_in(None, Some("admin123")).await,
            Err(CliError::Auth(AuthError::InvalidCredentials))
        ));
        let admin = ctx.sign_in(None, None).await.unwrap();
        assert_eq!(admin.username, "owner");
    }

    fn threshold_update(value: &str) -> BulkSettingUpdate {
        BulkSettingUpdate {
            settings: vec![SettingUpdateItem {
                key: "low_stock_threshold".to_string(),
                value: value.to_string(),
            }],
        }
    }

    #[tokio::test]
    async fn test_threshold_setting_drives_low_stock_filter() {
        let ctx = AppContext::new(config());
        let low_stock = ProductQuery::new().low_stock_only();

        let page = ctx.store.list_products(&low_stock).await.unwrap();
        assert_eq!(page.pagination.total_items, 0);

        let settings = ctx.update_settings(threshold_update("100")).await.unwrap();
        assert_eq!(settings.low_stock_threshold, 100);
        assert_eq!(ctx.store.low_stock_threshold(), 100);

        // Seeded stock levels 80, 90 and 100
        let page = ctx.store.list_products(&low_stock).await.unwrap();
        assert_eq!(page.pagination.total_items, 3);
        assert_eq!(ctx.store.dashboard().await.unwrap().inventory.low_stock, 3);
    }

    #[tokio::test]
    async fn test_rejected_threshold_leaves_store_alone() {
        let ctx = AppContext::new(config());

        assert!(matches!(
            ctx.update_settings(threshold_update("-3")).await,
            Err(CliError::Settings(_))
        ));
        assert_eq!(ctx.store.low_stock_threshold(), 5);
    }

    #[test]
    fn test_product_form_honors_image_cap() {
        let ctx = AppContext::new(Config {
            max_images: 2,
            ..config()
        });
        let form = ctx.product_form();
        assert!(form.is_open());
        assert_eq!(form.draft().map(|d| d.images.cap()), Some(2));
    }

    #[tokio::test]
    async fn test_edit_form_honors_image_cap() {
        let ctx = AppContext::new(Config {
            max_images: 3,
            ..config()
        });
        let product = ctx.store.get_product(1).await.unwrap();
        let form = ctx.edit_product_form(&product);
        assert_eq!(form.editing_id(), Some(1));
        assert_eq!(form.draft().map(|d| d.images.cap()), Some(3));
    }
}
