use axum::extract::State;
use axum::Json;
use serde::Serialize;
use tryon_cloud::StorageStatus;
use tryon_provider::ProviderStatus;

use crate::response::Success;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct StatusBody {
    #[serde(flatten)]
    pub provider: ProviderStatus,
    pub storage: StorageStatus,
}

/// GET /api/v1/tryon/status
///
/// Provider mode and identifiers plus result storage configuration. Never
/// touches the provider itself.
pub async fn get_status(State(state): State<AppState>) -> Json<Success<StatusBody>> {
    Json(Success::new(StatusBody {
        provider: state.generator.status(),
        storage: state.storage.clone(),
    }))
}
