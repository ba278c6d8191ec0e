// ABOUTME: Ordered, capped list of product image URLs
// ABOUTME: The first entry is the main image; callers re-sync after every mutation

use serde::Serialize;
use shopx_core::DEFAULT_MAX_IMAGES;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageList {
    urls: Vec<String>,
    #[serde(skip)]
    cap: usize,
}

impl Default for ImageList {
    fn default() -> Self {
        Self::with_cap(DEFAULT_MAX_IMAGES)
    }
}

impl ImageList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cap(cap: usize) -> Self {
        Self {
            urls: Vec::new(),
            cap,
        }
    }

    /// Existing gallery, truncated to the cap
    pub fn from_urls(urls: Vec<String>, cap: usize) -> Self {
        let mut list = Self::with_cap(cap);
        list.extend(urls);
        list
    }

    /// Appends a single URL. Blank input or a full list is a no-op.
    pub fn push(&mut self, url: &str) -> bool {
        let url = url.trim();
        if url.is_empty() || self.is_full() {
            return false;
        }
        self.urls.push(url.to_string());
        true
    }

    /// Appends a batch, dropping whatever does not fit. Returns how many
    /// were kept.
    pub fn extend(&mut self, urls: impl IntoIterator<Item = String>) -> usize {
        let mut added = 0;
        for url in urls {
            if self.push(&url) {
                added += 1;
            }
        }
        added
    }

    pub fn remove(&mut self, index: usize) -> Option<String> {
        if index < self.urls.len() {
            Some(self.urls.remove(index))
        } else {
            None
        }
    }

    /// Moves the image at `from` so it ends up at `to`
    pub fn move_item(&mut self, from: usize, to: usize) -> bool {
        if from >= self.urls.len() || to >= self.urls.len() {
            return false;
        }
        if from != to {
            let url = self.urls.remove(from);
            self.urls.insert(to, url);
        }
        true
    }

    /// First image, the one shown as the main image
    pub fn main(&self) -> Option<&str> {
        self.urls.first().map(String::as_str)
    }

    pub fn is_full(&self) -> bool {
        self.urls.len() >= self.cap
    }

    pub fn cap(&self) -> usize {
        self.cap
    }

    pub fn as_slice(&self) -> &[String] {
        &self.urls
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.urls.clone()
    }
}
