// ABOUTME: Product query engine over an in-memory catalog snapshot
// ABOUTME: Conjunctive filters, stable sorting and pagination with metadata

use serde::{Deserialize, Serialize};
use shopx_core::{Category, Product, ProductStatus, DEFAULT_LOW_STOCK_THRESHOLD};
use std::cmp::Ordering;
use std::fmt;
use tracing::debug;

use crate::pagination::{paginate, Page, PaginationParams, DEFAULT_PAGE_SIZE, MIN_PAGE};

/// Sort orders understood by the product listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SortKey {
    #[default]
    Newest,
    Oldest,
    NameAsc,
    NameDesc,
    PriceAsc,
    PriceDesc,
    StockAsc,
    StockDesc,
}

impl SortKey {
    /// Parses a sort key; anything unrecognized means `Newest`.
    ///
    /// The storefront's older `price-low` / `price-high` / `name` keys are
    /// accepted as aliases.
    pub fn parse_lossy(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "newest" => SortKey::Newest,
            "oldest" => SortKey::Oldest,
            "name_asc" | "name" => SortKey::NameAsc,
            "name_desc" => SortKey::NameDesc,
            "price_asc" | "price-low" => SortKey::PriceAsc,
            "price_desc" | "price-high" => SortKey::PriceDesc,
            "stock_asc" => SortKey::StockAsc,
            "stock_desc" => SortKey::StockDesc,
            _ => SortKey::Newest,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Newest => "newest",
            SortKey::Oldest => "oldest",
            SortKey::NameAsc => "name_asc",
            SortKey::NameDesc => "name_desc",
            SortKey::PriceAsc => "price_asc",
            SortKey::PriceDesc => "price_desc",
            SortKey::StockAsc => "stock_asc",
            SortKey::StockDesc => "stock_desc",
        }
    }
}

impl From<String> for SortKey {
    fn from(value: String) -> Self {
        SortKey::parse_lossy(&value)
    }
}

impl From<&str> for SortKey {
    fn from(value: &str) -> Self {
        SortKey::parse_lossy(value)
    }
}

impl From<SortKey> for String {
    fn from(key: SortKey) -> Self {
        key.as_str().to_string()
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How a listing restricts products to a category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CategoryFilter {
    /// Matches `product.category_id`
    Id(u64),
    /// Matches, case-sensitively, the name or slug of the product's category
    Name(String),
}

impl CategoryFilter {
    /// Interprets a raw filter value: numbers are ids, `all` and blanks
    /// mean no filter, anything else is a name.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        if value.is_empty() || value == "all" {
            return None;
        }
        match value.parse::<u64>() {
            Ok(id) => Some(CategoryFilter::Id(id)),
            Err(_) => Some(CategoryFilter::Name(value.to_string())),
        }
    }

    fn matches(&self, product: &Product, categories: &[Category]) -> bool {
        match self {
            CategoryFilter::Id(id) => product.category_id == *id,
            CategoryFilter::Name(name) => categories
                .iter()
                .find(|c| c.id == product.category_id)
                .is_some_and(|c| &c.name == name || &c.slug == name),
        }
    }
}

/// Filter, sort and page request for a product listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductQuery {
    #[serde(default)]
    pub category: Option<CategoryFilter>,
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub status: Option<ProductStatus>,
    #[serde(default)]
    pub min_price: Option<f64>,
    #[serde(default)]
    pub max_price: Option<f64>,
    /// `Some(true)` keeps only featured products; anything else is "any"
    #[serde(default)]
    pub featured: Option<bool>,
    #[serde(default)]
    pub low_stock: Option<bool>,
    #[serde(default)]
    pub sort: SortKey,
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_page() -> i64 {
    MIN_PAGE
}

fn default_limit() -> i64 {
    DEFAULT_PAGE_SIZE
}

impl Default for ProductQuery {
    fn default() -> Self {
        Self {
            category: None,
            search: None,
            status: None,
            min_price: None,
            max_price: None,
            featured: None,
            low_stock: None,
            sort: SortKey::default(),
            page: MIN_PAGE,
            limit: DEFAULT_PAGE_SIZE,
        }
    }
}

impl ProductQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_category(mut self, category: CategoryFilter) -> Self {
        self.category = Some(category);
        self
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn with_status(mut self, status: ProductStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_price_range(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.min_price = min;
        self.max_price = max;
        self
    }

    pub fn featured_only(mut self) -> Self {
        self.featured = Some(true);
        self
    }

    pub fn low_stock_only(mut self) -> Self {
        self.low_stock = Some(true);
        self
    }

    pub fn sorted_by(mut self, sort: SortKey) -> Self {
        self.sort = sort;
        self
    }

    pub fn page(mut self, page: i64, limit: i64) -> Self {
        self.page = page;
        self.limit = limit;
        self
    }

    pub fn pagination(&self) -> PaginationParams {
        PaginationParams::with_page_and_limit(self.page, self.limit)
    }

    fn search_term(&self) -> Option<String> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase)
    }
}

/// Stateless query engine; carries only catalog-wide configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryEngine {
    low_stock_threshold: u32,
}

impl Default for QueryEngine {
    fn default() -> Self {
        Self::new(DEFAULT_LOW_STOCK_THRESHOLD)
    }
}

impl QueryEngine {
    pub fn new(low_stock_threshold: u32) -> Self {
        Self {
            low_stock_threshold,
        }
    }

    pub fn low_stock_threshold(&self) -> u32 {
        self.low_stock_threshold
    }

    /// Runs a query that filters by category id only.
    /// A name filter matches nothing here; use `query_with_categories`.
    pub fn query(&self, collection: &[Product], params: &ProductQuery) -> Page<Product> {
        self.query_with_categories(collection, &[], params)
    }

    /// Filters, sorts and pages `collection`. `categories` resolves name filters.
    pub fn query_with_categories(
        &self,
        collection: &[Product],
        categories: &[Category],
        params: &ProductQuery,
    ) -> Page<Product> {
        let mut items = self.filter_products(collection, categories, params);
        sort_products(&mut items, params.sort);

        let page = paginate(items, &params.pagination());
        debug!(
            "Product query matched {} of {} (sort: {}, page: {}/{})",
            page.pagination.total_items,
            collection.len(),
            params.sort,
            page.pagination.current_page,
            page.pagination.total_pages
        );
        page
    }

    /// Products passing every supplied criterion, in collection order
    pub fn filter_products(
        &self,
        collection: &[Product],
        categories: &[Category],
        params: &ProductQuery,
    ) -> Vec<Product> {
        let search = params.search_term();
        collection
            .iter()
            .filter(|p| self.matches(p, categories, params, search.as_deref()))
            .cloned()
            .collect()
    }

    fn matches(
        &self,
        product: &Product,
        categories: &[Category],
        params: &ProductQuery,
        search: Option<&str>,
    ) -> bool {
        if let Some(category) = &params.category {
            if !category.matches(product, categories) {
                return false;
            }
        }

        if let Some(term) = search {
            let hit = product.name.to_lowercase().contains(term)
                || product.description.to_lowercase().contains(term)
                || product.short_description.to_lowercase().contains(term);
            if !hit {
                return false;
            }
        }

        if let Some(status) = params.status {
            if product.status != status {
                return false;
            }
        }

        let price = product.effective_price();
        if params.min_price.is_some_and(|min| price < min) {
            return false;
        }
        if params.max_price.is_some_and(|max| price > max) {
            return false;
        }

        if params.featured == Some(true) && !product.featured {
            return false;
        }

        if params.low_stock == Some(true) && !product.is_low_stock(self.low_stock_threshold) {
            return false;
        }

        true
    }
}

/// Convenience wrapper using the default engine configuration
pub fn query(collection: &[Product], params: &ProductQuery) -> Page<Product> {
    QueryEngine::default().query(collection, params)
}

/// Stable sort; items that compare equal keep their input order.
/// `items` is expected in insertion order.
pub fn sort_products(items: &mut [Product], key: SortKey) {
    match key {
        SortKey::Newest => items.reverse(),
        SortKey::Oldest => {}
        SortKey::NameAsc => items.sort_by(compare_names),
        SortKey::NameDesc => items.sort_by(|a, b| compare_names(b, a)),
        SortKey::PriceAsc => items.sort_by(compare_prices),
        SortKey::PriceDesc => items.sort_by(|a, b| compare_prices(b, a)),
        SortKey::StockAsc => items.sort_by_key(|p| p.stock),
        SortKey::StockDesc => items.sort_by(|a, b| b.stock.cmp(&a.stock)),
    }
}

fn compare_names(a: &Product, b: &Product) -> Ordering {
    a.name.to_lowercase().cmp(&b.name.to_lowercase())
}

fn compare_prices(a: &Product, b: &Product) -> Ordering {
    a.effective_price().total_cmp(&b.effective_price())
}
