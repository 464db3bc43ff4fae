pub mod health;
pub mod tryon;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /tryon/status                                    provider + storage status (public)
/// /tryon/subjects                                  preset subjects (public)
/// /tryon/scenes                                    scenes, ?category= (public)
/// /tryon/scenes/{id}                               one scene (public)
/// /tryon/generate                                  run a generation (POST, auth)
/// /tryon/history                                   completed history, ?page=&limit= (auth)
/// /tryon/history/{id}                              get, delete (auth)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/tryon", tryon::router())
}
