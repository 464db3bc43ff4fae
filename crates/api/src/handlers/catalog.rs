//! Handlers for the read-only scene and subject catalogs.

use std::collections::BTreeMap;

use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Serialize;
use tryon_core::catalog::{Catalog, SceneCategory, SceneDescriptor, SubjectDescriptor};
use tryon_core::error::CoreError;

use crate::error::{AppError, AppResult};
use crate::query::SceneParams;
use crate::response::Success;
use crate::state::AppState;

pub const MSG_SCENE_NOT_FOUND: &str = "scene not found";

#[derive(Debug, Serialize)]
pub struct SubjectsBody {
    pub models: Vec<SubjectDescriptor>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenesBody {
    pub total: usize,
    pub scenes: Vec<SceneDescriptor>,
    /// Always built from the full catalog, independent of the filter.
    pub grouped_scenes: BTreeMap<SceneCategory, Vec<SceneDescriptor>>,
    pub category_names: BTreeMap<SceneCategory, &'static str>,
}

#[derive(Debug, Serialize)]
pub struct SceneBody {
    pub scene: SceneDescriptor,
}

/// GET /api/v1/tryon/subjects
pub async fn list_subjects(State(state): State<AppState>) -> Json<Success<SubjectsBody>> {
    Json(Success::new(SubjectsBody {
        models: state.catalog.list_subjects().to_vec(),
    }))
}

/// GET /api/v1/tryon/scenes?category=
///
/// An unknown category yields an empty `scenes` list, not an error.
pub async fn list_scenes(
    State(state): State<AppState>,
    params: Result<Query<SceneParams>, QueryRejection>,
) -> AppResult<Json<Success<ScenesBody>>> {
    let Query(params) = params.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let category = params
        .category
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty());

    let scenes: Vec<SceneDescriptor> = state
        .catalog
        .list_scenes(category)
        .into_iter()
        .cloned()
        .collect();

    let grouped_scenes = state
        .catalog
        .grouped_scenes()
        .into_iter()
        .map(|(category, scenes)| (category, scenes.into_iter().cloned().collect()))
        .collect();

    Ok(Json(Success::new(ScenesBody {
        total: scenes.len(),
        scenes,
        grouped_scenes,
        category_names: Catalog::category_names(),
    })))
}

/// GET /api/v1/tryon/scenes/{id}
pub async fn get_scene(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Success<SceneBody>>> {
    let scene = state
        .catalog
        .get_scene(&id)
        .cloned()
        .ok_or_else(|| CoreError::NotFound(MSG_SCENE_NOT_FOUND.into()))?;
    Ok(Json(Success::new(SceneBody { scene })))
}
