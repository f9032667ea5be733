//! Pagination planning.

use serde::Serialize;

/// Fixed page size for recipe listings.
pub const PAGE_SIZE: u64 = 60;

/// Offset/limit plan derived from a 1-based page number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PagePlan {
    page: u64,
}

impl PagePlan {
    /// Creates a plan for a 1-based page number, coercing 0 to 1.
    pub fn new(page: u64) -> Self {
        Self { page: page.max(1) }
    }

    /// Parses the raw `page` query parameter. Anything absent, non-numeric,
    /// or below 1 falls back to the first page instead of erroring.
    pub fn from_param(raw: Option<&str>) -> Self {
        let page = raw
            .and_then(|p| p.trim().parse::<u64>().ok())
            .filter(|p| *p >= 1)
            .unwrap_or(1);
        Self { page }
    }

    /// The 1-based page number.
    pub fn page(&self) -> u64 {
        self.page
    }

    /// Number of records to skip.
    pub fn offset(&self) -> u64 {
        (self.page - 1) * PAGE_SIZE
    }

    /// Number of records to fetch.
    pub fn limit(&self) -> u64 {
        PAGE_SIZE
    }
}

impl Default for PagePlan {
    fn default() -> Self {
        Self::new(1)
    }
}

/// Pagination metadata returned alongside a result page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    /// The page this envelope describes.
    pub current_page: u64,
    /// Total pages for the full match count.
    pub total_pages: u64,
    /// Whether an earlier page exists.
    pub has_previous_page: bool,
    /// Total recipes matching the filter, across all pages.
    pub total_recipes: u64,
    /// Whether a later page exists.
    pub has_next_page: bool,
}

impl PageInfo {
    /// Derives the envelope from the plan, the total match count, and the
    /// number of items actually returned for this page.
    ///
    /// Stays coherent for pages past the end: an empty out-of-range page
    /// reports `has_next_page = false` and `has_previous_page = page > 1`.
    pub fn new(plan: PagePlan, total: u64, returned: usize) -> Self {
        Self {
            current_page: plan.page(),
            total_pages: total.div_ceil(PAGE_SIZE),
            has_previous_page: plan.page() > 1,
            total_recipes: total,
            has_next_page: plan.offset() + (returned as u64) < total,
        }
    }
}
