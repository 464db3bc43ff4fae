//! Read-only garment projection used to resolve try-on requests.
//!
//! Garments are owned by the wardrobe service; this crate never writes them.

use serde::Serialize;
use sqlx::FromRow;
use tryon_core::garment::GarmentDescription;
use tryon_core::types::DbId;

/// A garment owned by the requesting user, with its preferred image.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GarmentSnapshot {
    pub id: DbId,
    pub name: String,
    pub color: Option<String>,
    pub style: Option<String>,
    pub brand: Option<String>,
    /// Primary image if flagged, otherwise the first by sort order.
    /// `None` when the garment has no images at all.
    pub image_url: Option<String>,
}

impl GarmentSnapshot {
    /// Attributes relevant to prompt construction.
    pub fn description(&self) -> GarmentDescription {
        GarmentDescription {
            name: Some(self.name.clone()),
            color: self.color.clone(),
            style: self.style.clone(),
            brand: self.brand.clone(),
        }
    }
}
