//! Page-number pagination with graceful clamping.

use serde::Serialize;

/// Number of items on every listing page.
pub const PER_PAGE: u64 = 10;

/// A requested page, as parsed from the `page` query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    requested: i64,
    per_page: u64,
}

impl PageRequest {
    pub fn new(requested: i64) -> Self {
        Self {
            requested,
            per_page: PER_PAGE,
        }
    }

    pub fn first() -> Self {
        Self::new(1)
    }

    /// Parse a raw query value. Missing or non-integer input means page 1.
    pub fn parse(raw: Option<&str>) -> Self {
        let requested = raw.and_then(|s| s.trim().parse::<i64>().ok()).unwrap_or(1);
        Self::new(requested)
    }

    pub fn with_per_page(mut self, per_page: u64) -> Self {
        self.per_page = per_page.max(1);
        self
    }

    pub fn per_page(&self) -> u64 {
        self.per_page
    }

    /// Number of pages needed for `total_items`. An empty set still has one page.
    pub fn total_pages(&self, total_items: u64) -> u64 {
        total_items.div_ceil(self.per_page).max(1)
    }

    /// Resolve the 1-based page number to serve. Anything outside
    /// `1..=total_pages` falls back to the last page.
    pub fn resolve(&self, total_items: u64) -> u64 {
        let total_pages = self.total_pages(total_items);
        match u64::try_from(self.requested) {
            Ok(n) if (1..=total_pages).contains(&n) => n,
            _ => total_pages,
        }
    }

    /// Zero-based offset of the first item on the resolved page.
    pub fn offset(&self, total_items: u64) -> u64 {
        (self.resolve(total_items) - 1) * self.per_page
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::first()
    }
}

/// One page of results.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub number: u64,
    pub per_page: u64,
    pub total_items: u64,
    pub total_pages: u64,
}

impl<T> Page<T> {
    /// Wrap an already-fetched slice of a larger result set.
    pub fn new(items: Vec<T>, request: PageRequest, total_items: u64) -> Self {
        Self {
            items,
            number: request.resolve(total_items),
            per_page: request.per_page(),
            total_items,
            total_pages: request.total_pages(total_items),
        }
    }

    /// Cut the requested page out of a fully materialized, ordered list.
    pub fn from_vec(all: Vec<T>, request: PageRequest) -> Self {
        let total_items = all.len() as u64;
        let offset = request.offset(total_items) as usize;
        let items = all
            .into_iter()
            .skip(offset)
            .take(request.per_page() as usize)
            .collect();
        Self::new(items, request, total_items)
    }

    pub fn has_next(&self) -> bool {
        self.number < self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.number > 1
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            number: self.number,
            per_page: self.per_page,
            total_items: self.total_items,
            total_pages: self.total_pages,
        }
    }
}
