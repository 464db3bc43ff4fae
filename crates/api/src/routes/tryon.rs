use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{catalog, generate, history, status};
use crate::state::AppState;

/// Routes mounted at `/tryon`.
///
/// ```text
/// GET    /status                                   -> get_status
/// GET    /subjects                                 -> list_subjects
/// GET    /scenes                                   -> list_scenes
/// GET    /scenes/{id}                              -> get_scene
/// POST   /generate                                 -> generate
/// GET    /history                                  -> list
/// GET    /history/{id}                             -> get_by_id
/// DELETE /history/{id}                             -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/status", get(status::get_status))
        .route("/subjects", get(catalog::list_subjects))
        .route("/scenes", get(catalog::list_scenes))
        .route("/scenes/{id}", get(catalog::get_scene))
        .route("/generate", post(generate::generate))
        .route("/history", get(history::list))
        .route(
            "/history/{id}",
            get(history::get_by_id).delete(history::delete),
        )
}
