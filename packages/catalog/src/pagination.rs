// ABOUTME: Page windows over filtered catalog listings
// ABOUTME: Clamps requested page and size, slices the list and reports page counts

use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_SIZE: i64 = 10;
pub const MAX_PAGE_SIZE: i64 = 100;
/// Pages are numbered from 1
pub const MIN_PAGE: i64 = 1;

/// Requested page and page size, as received. Out-of-range values are
/// clamped when read, never rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationParams {
    #[serde(default = "first_page")]
    pub page: i64,
    #[serde(default = "default_size")]
    pub limit: i64,
}

fn first_page() -> i64 {
    MIN_PAGE
}

fn default_size() -> i64 {
    DEFAULT_PAGE_SIZE
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self::with_page_and_limit(MIN_PAGE, DEFAULT_PAGE_SIZE)
    }
}

impl PaginationParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page_and_limit(page: i64, limit: i64) -> Self {
        Self { page, limit }
    }

    /// Page number, at least 1
    pub fn page(&self) -> i64 {
        self.page.max(MIN_PAGE)
    }

    /// Page size within 1..=MAX_PAGE_SIZE
    pub fn limit(&self) -> i64 {
        self.limit.clamp(1, MAX_PAGE_SIZE)
    }

    /// Items skipped before this page starts
    pub fn offset(&self) -> i64 {
        (self.page() - 1).saturating_mul(self.limit())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    pub current_page: i64,
    pub page_size: i64,
    pub total_items: i64,
    /// Zero when there are no items
    pub total_pages: i64,
    pub has_next: bool,
    pub has_prev: bool,
}

impl PaginationMeta {
    pub fn new(params: &PaginationParams, total_items: i64) -> Self {
        let current_page = params.page();
        let page_size = params.limit();
        let total_pages = if total_items > 0 {
            (total_items + page_size - 1) / page_size
        } else {
            0
        };

        Self {
            current_page,
            page_size,
            total_items,
            total_pages,
            has_next: current_page < total_pages,
            has_prev: current_page > MIN_PAGE,
        }
    }
}

/// One page of a listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub pagination: PaginationMeta,
}

/// Slices an already filtered and ordered list into the requested page.
/// Pages past the end yield no items but keep accurate metadata.
pub fn paginate<T>(items: Vec<T>, params: &PaginationParams) -> Page<T> {
    let pagination = PaginationMeta::new(params, items.len() as i64);

    let items = items
        .into_iter()
        .skip(params.offset() as usize)
        .take(params.limit() as usize)
        .collect();

    Page { items, pagination }
}
