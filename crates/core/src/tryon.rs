//! Try-on generation requests and their validation.
//!
//! [`validate_request`] covers everything that can be checked without I/O:
//! required fields, the subject-source invariant and catalog references.
//! Garment ownership is resolved later against the garment store.

use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, SceneDescriptor};
use crate::error::CoreError;
use crate::garment::GarmentCategory;
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Client-facing messages
// ---------------------------------------------------------------------------

pub const MSG_GARMENT_REQUIRED: &str = "garment id required";
pub const MSG_SUBJECT_REQUIRED: &str = "subject required";
pub const MSG_SUBJECT_AMBIGUOUS: &str =
    "provide either presetSubjectId or modelImageUrl, not both";
pub const MSG_INVALID_PRESET: &str = "invalid preset subject";
pub const MSG_INVALID_SCENE: &str = "invalid scene";
pub const MSG_GARMENT_NOT_FOUND: &str = "garment not found or not owned";
pub const MSG_GARMENT_NO_IMAGE: &str = "garment has no image, cannot generate";

// ---------------------------------------------------------------------------
// Request
// ---------------------------------------------------------------------------

/// Body of `POST /generate`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    /// Accepts a JSON number or a numeric string.
    #[serde(default, deserialize_with = "deserialize_optional_id")]
    pub garment_id: Option<DbId>,
    /// URL of a subject photo uploaded by the user.
    pub model_image_url: Option<String>,
    #[serde(alias = "presetModelId")]
    pub preset_subject_id: Option<String>,
    pub category: Option<String>,
    pub scene_id: Option<String>,
}

/// `10`, `"10"`, `null` and `""` are all accepted; a blank string is absent.
fn deserialize_optional_id<'de, D>(deserializer: D) -> Result<Option<DbId>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Number(DbId),
        Text(String),
    }

    match Option::<RawId>::deserialize(deserializer)? {
        None => Ok(None),
        Some(RawId::Number(id)) => Ok(Some(id)),
        Some(RawId::Text(text)) => {
            let text = text.trim();
            if text.is_empty() {
                return Ok(None);
            }
            text.parse().map(Some).map_err(|_| {
                serde::de::Error::custom(format!("garmentId must be a numeric id, got {text:?}"))
            })
        }
    }
}

// ---------------------------------------------------------------------------
// Subject source
// ---------------------------------------------------------------------------

/// Where the subject image comes from. Exactly one source per request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubjectSource {
    Preset { id: String },
    Uploaded { image_url: String },
}

/// Persisted discriminator for [`SubjectSource`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubjectSourceKind {
    Preset,
    Upload,
}

impl SubjectSourceKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Preset => "preset",
            Self::Upload => "upload",
        }
    }
}

impl SubjectSource {
    pub fn kind(&self) -> SubjectSourceKind {
        match self {
            Self::Preset { .. } => SubjectSourceKind::Preset,
            Self::Uploaded { .. } => SubjectSourceKind::Upload,
        }
    }

    pub fn preset_id(&self) -> Option<&str> {
        match self {
            Self::Preset { id } => Some(id),
            Self::Uploaded { .. } => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// A request that passed every I/O-free check, with catalog references
/// resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedRequest {
    pub garment_id: DbId,
    pub subject: SubjectSource,
    /// Image of the subject actually used: the preset's full-body image or
    /// the uploaded URL.
    pub subject_image_url: String,
    pub category: GarmentCategory,
    pub scene: Option<SceneDescriptor>,
}

/// Validate a raw request against the catalog.
///
/// Checks run in order: garment id, subject source, preset subject, scene.
/// Blank strings count as absent.
pub fn validate_request(
    request: &GenerateRequest,
    catalog: &Catalog,
) -> Result<ValidatedRequest, CoreError> {
    let garment_id = request
        .garment_id
        .ok_or_else(|| CoreError::Validation(MSG_GARMENT_REQUIRED.into()))?;

    let preset = non_blank(&request.preset_subject_id);
    let uploaded = non_blank(&request.model_image_url);

    let (subject, subject_image_url) = match (preset, uploaded) {
        (None, None) => return Err(CoreError::Validation(MSG_SUBJECT_REQUIRED.into())),
        (Some(_), Some(_)) => return Err(CoreError::Validation(MSG_SUBJECT_AMBIGUOUS.into())),
        (Some(id), None) => {
            let descriptor = catalog
                .get_subject(id)
                .ok_or_else(|| CoreError::Validation(MSG_INVALID_PRESET.into()))?;
            (
                SubjectSource::Preset { id: id.to_string() },
                descriptor.image_url.clone(),
            )
        }
        (None, Some(url)) => (
            SubjectSource::Uploaded {
                image_url: url.to_string(),
            },
            url.to_string(),
        ),
    };

    let scene = match non_blank(&request.scene_id) {
        Some(id) => Some(
            catalog
                .get_scene(id)
                .cloned()
                .ok_or_else(|| CoreError::Validation(MSG_INVALID_SCENE.into()))?,
        ),
        None => None,
    };

    let category = request
        .category
        .as_deref()
        .map(GarmentCategory::parse)
        .unwrap_or_default();

    Ok(ValidatedRequest {
        garment_id,
        subject,
        subject_image_url,
        category,
        scene,
    })
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
