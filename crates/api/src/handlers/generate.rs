use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use tryon_core::error::CoreError;
use tryon_core::tryon::GenerateRequest;
use tryon_pipeline::TryOnOutcome;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::Success;
use crate::state::AppState;

/// POST /api/v1/tryon/generate
///
/// Synchronous: the response carries the final image URL or an error, and
/// the history record is already written when it returns.
///
/// The pipeline runs on its own task. If the request is dropped (timeout
/// layer, client disconnect) the attempt still runs to completion and is
/// recorded.
pub async fn generate(
    auth: AuthUser,
    State(state): State<AppState>,
    payload: Result<Json<GenerateRequest>, JsonRejection>,
) -> AppResult<Json<Success<TryOnOutcome>>> {
    let Json(request) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;

    tracing::info!(
        user_id = auth.user_id,
        garment_id = ?request.garment_id,
        preset_subject_id = ?request.preset_subject_id,
        scene_id = ?request.scene_id,
        "Try-on generation requested",
    );

    let pipeline = Arc::clone(&state.pipeline);
    let user_id = auth.user_id;
    let outcome = tokio::spawn(async move { pipeline.run(user_id, &request).await })
        .await
        .map_err(|e| {
            tracing::error!(user_id, error = %e, "Generation task did not complete");
            CoreError::Internal(format!("generation task failed: {e}"))
        })??;
    Ok(Json(Success::new(outcome)))
}
