use tryon_core::error::CoreError;
use tryon_core::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// Validation or not-found; raised before the provider is called and
    /// leaves no history behind.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The provider call failed. A failed history row was recorded.
    #[error("Image generation failed: {detail}")]
    Provider { history_id: DbId, detail: String },

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}
