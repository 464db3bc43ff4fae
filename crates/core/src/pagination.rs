//! Page-number pagination helpers for history listings.

use serde::Serialize;

/// Default number of records per page.
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Maximum number of records per page.
pub const MAX_PAGE_SIZE: i64 = 100;

/// Clamp a user-provided limit to valid bounds.
pub fn clamp_limit(limit: Option<i64>, default: i64, max: i64) -> i64 {
    limit.unwrap_or(default).max(1).min(max)
}

/// Clamp a user-provided 1-based page number.
pub fn clamp_page(page: Option<i64>) -> i64 {
    page.unwrap_or(1).max(1)
}

/// A resolved `(page, limit)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub limit: i64,
}

impl PageRequest {
    pub fn new(page: Option<i64>, limit: Option<i64>) -> Self {
        Self {
            page: clamp_page(page),
            limit: clamp_limit(limit, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE),
        }
    }

    /// Row offset of the first record on this page.
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }
}

/// Pagination block returned alongside a page of records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub total: i64,
    pub page: i64,
    pub limit: i64,
    pub total_pages: i64,
}

impl Pagination {
    pub fn new(request: PageRequest, total: i64) -> Self {
        Self {
            total,
            page: request.page,
            limit: request.limit,
            total_pages: total_pages(total, request.limit),
        }
    }
}

/// `ceil(total / limit)`; zero records means zero pages.
pub fn total_pages(total: i64, limit: i64) -> i64 {
    if total <= 0 || limit <= 0 {
        return 0;
    }
    (total + limit - 1) / limit
}
