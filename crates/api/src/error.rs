use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use tryon_core::error::CoreError;
use tryon_pipeline::PipelineError;

/// Client-facing message for provider failures; the upstream detail goes
/// into the `error` field.
pub const MSG_GENERATION_FAILED: &str = "image generation failed";

const MSG_INTERNAL: &str = "An internal error occurred";

/// Application-level error type for HTTP handlers.
///
/// Every variant renders as `{ "success": false, "message", "code" }`.
/// Provider failures add `error` (upstream detail) and `historyId`.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Image generation failed: {detail}")]
    Provider { history_id: i64, detail: String },

    /// Malformed request body or query string.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

pub type AppResult<T> = Result<T, AppError>;

impl From<PipelineError> for AppError {
    fn from(err: PipelineError) -> Self {
        match err {
            PipelineError::Core(core) => AppError::Core(core),
            PipelineError::Database(db) => AppError::Database(db),
            PipelineError::Provider { history_id, detail } => {
                AppError::Provider { history_id, detail }
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Core(core) => match core {
                CoreError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::Unauthorized(msg) => {
                    (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone())
                }
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "INTERNAL_ERROR",
                        MSG_INTERNAL.to_string(),
                    )
                }
            },

            AppError::Database(err) => classify_sqlx_error(err),

            AppError::Provider { history_id, detail } => {
                let body = json!({
                    "success": false,
                    "message": MSG_GENERATION_FAILED,
                    "code": "PROVIDER_ERROR",
                    "error": detail,
                    "historyId": history_id,
                });
                return (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(body)).into_response();
            }

            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
        };

        let body = json!({
            "success": false,
            "message": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Map a sqlx error to a status, code and sanitised message.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, &'static str, String) {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        ),
        other => {
            tracing::error!(error = %other, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                MSG_INTERNAL.to_string(),
            )
        }
    }
}
