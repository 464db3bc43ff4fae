//! Try-on history model and DTOs.
//!
//! One row is written per attempted generation, successful or not. Rows are
//! never edited in place; the only mutation is a user-initiated hard delete.

use serde::Serialize;
use sqlx::FromRow;
use tryon_core::tryon::SubjectSourceKind;
use tryon_core::types::{DbId, Timestamp};

use super::status::TryOnStatus;

/// A row from `tryon_history`, with `status` resolved to its lookup name.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TryOnHistory {
    pub id: DbId,
    pub user_id: DbId,
    /// `None` once the garment has been deleted.
    pub garment_id: Option<DbId>,
    pub subject_image_url: String,
    pub subject_source: String,
    pub preset_subject_id: Option<String>,
    pub garment_image_url: String,
    pub result_image_url: Option<String>,
    pub category: String,
    pub scene_id: Option<String>,
    pub is_mock: bool,
    pub status: String,
    pub error_message: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for recording a finished generation attempt.
#[derive(Debug, Clone)]
pub struct CreateTryOnHistory {
    pub user_id: DbId,
    pub garment_id: Option<DbId>,
    pub subject_image_url: String,
    pub subject_source: SubjectSourceKind,
    pub preset_subject_id: Option<String>,
    pub garment_image_url: String,
    pub result_image_url: Option<String>,
    pub category: String,
    pub scene_id: Option<String>,
    pub is_mock: bool,
    pub status: TryOnStatus,
    pub error_message: Option<String>,
}
