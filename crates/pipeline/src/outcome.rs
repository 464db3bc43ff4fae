//! Response payload of a successful generation.

use serde::Serialize;
use tryon_core::catalog::{SceneCategory, SceneDescriptor};
use tryon_core::garment::GarmentCategory;
use tryon_core::tryon::SubjectSourceKind;
use tryon_core::types::DbId;
use tryon_db::models::garment::GarmentSnapshot;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GarmentSummary {
    pub id: DbId,
    pub name: String,
    pub image_url: String,
    pub category: GarmentCategory,
}

impl GarmentSummary {
    pub fn new(garment: &GarmentSnapshot, image_url: &str, category: &GarmentCategory) -> Self {
        Self {
            id: garment.id,
            name: garment.name.clone(),
            image_url: image_url.to_string(),
            category: category.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneSummary {
    pub id: String,
    pub name: String,
    pub category: SceneCategory,
}

impl From<&SceneDescriptor> for SceneSummary {
    fn from(scene: &SceneDescriptor) -> Self {
        Self {
            id: scene.id.clone(),
            name: scene.name.clone(),
            category: scene.category,
        }
    }
}

/// Everything the client needs after a completed generation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TryOnOutcome {
    pub history_id: DbId,
    /// Durable URL when promoted, provider-hosted URL otherwise.
    pub result_image_url: String,
    pub is_mock: bool,
    pub promoted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub garment: GarmentSummary,
    pub subject_image_url: String,
    pub subject_source: SubjectSourceKind,
    pub scene: Option<SceneSummary>,
}
