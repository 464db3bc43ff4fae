//! Tests for `AppError` -> HTTP response mapping.
//!
//! These call `IntoResponse` directly; no router is needed.

use assert_matches::assert_matches;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use http_body_util::BodyExt;
use tryon_api::error::AppError;
use tryon_core::error::CoreError;
use tryon_pipeline::PipelineError;

async fn error_to_response(err: AppError) -> (StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn not_found_returns_404() {
    let (status, json) =
        error_to_response(AppError::Core(CoreError::NotFound("scene not found".into()))).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["success"], false);
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["message"], "scene not found");
}

#[tokio::test]
async fn validation_returns_400_with_bare_message() {
    let (status, json) =
        error_to_response(AppError::Core(CoreError::Validation("invalid scene".into()))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["message"], "invalid scene");
}

#[tokio::test]
async fn unauthorized_returns_401() {
    let (status, json) =
        error_to_response(AppError::Core(CoreError::Unauthorized("no auth token".into()))).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["message"], "no auth token");
}

#[tokio::test]
async fn internal_error_is_sanitized() {
    let (status, json) = error_to_response(AppError::Core(CoreError::Internal(
        "connection string leaked".into(),
    )))
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "INTERNAL_ERROR");
    assert!(!json["message"].as_str().unwrap().contains("leaked"));
}

#[tokio::test]
async fn database_error_is_sanitized() {
    let (status, json) = error_to_response(AppError::Database(sqlx::Error::PoolTimedOut)).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "INTERNAL_ERROR");
}

#[tokio::test]
async fn provider_failure_carries_detail() {
    let err: AppError = PipelineError::Provider {
        history_id: 7,
        detail: "Provider API error (503): overloaded".into(),
    }
    .into();

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["success"], false);
    assert_eq!(json["message"], "image generation failed");
    assert_eq!(json["error"], "Provider API error (503): overloaded");
    assert_eq!(json["historyId"], 7);
}

#[tokio::test]
async fn pipeline_core_error_keeps_status() {
    let err: AppError =
        PipelineError::Core(CoreError::NotFound("garment not found or not owned".into())).into();
    assert_matches!(err, AppError::Core(CoreError::NotFound(_)));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["message"], "garment not found or not owned");
}
