//! Query parameter types shared by handlers.

use serde::Deserialize;
use tryon_core::pagination::PageRequest;

/// `?page=&limit=`. Out-of-range values are clamped, never rejected.
#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl PageParams {
    pub fn resolve(&self) -> PageRequest {
        PageRequest::new(self.page, self.limit)
    }
}

/// `?category=` filter for the scene listing.
#[derive(Debug, Default, Deserialize)]
pub struct SceneParams {
    pub category: Option<String>,
}
