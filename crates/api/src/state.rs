use std::sync::Arc;

use tryon_cloud::StorageStatus;
use tryon_core::catalog::Catalog;
use tryon_db::store::HistoryStore;
use tryon_pipeline::TryOnPipeline;
use tryon_provider::ImageGenerator;

use crate::config::ServerConfig;

/// Shared application state available to all handlers via `State<AppState>`.
///
/// Cheap to clone; everything is behind an `Arc`. The catalog and the
/// generator's mock/live mode are fixed at startup and read-only after.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    pub catalog: Arc<Catalog>,
    pub generator: Arc<dyn ImageGenerator>,
    pub history: Arc<dyn HistoryStore>,
    pub pipeline: Arc<TryOnPipeline>,
    pub storage: StorageStatus,
}
