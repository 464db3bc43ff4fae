//! Integration tests for health, status and general HTTP behaviour.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use common::{body_json, get};
use tryon_cloud::{StorageBackend, StorageConfig};
use tryon_provider::{ProviderAdapter, ProviderConfig};

// ---------------------------------------------------------------------------
// Test: GET /health
// ---------------------------------------------------------------------------

#[tokio::test]
async fn health_check_returns_ok() {
    let t = common::build_test_app().await;

    let response = get(t.app(), "/health").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert!(json["version"].is_string());
    assert_eq!(json["db_healthy"], true);
}

#[tokio::test]
async fn unknown_route_returns_404() {
    let t = common::build_test_app().await;
    let response = get(t.app(), "/this-route-does-not-exist").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn response_contains_x_request_id_header() {
    let t = common::build_test_app().await;
    let response = get(t.app(), "/health").await;
    assert!(response.headers().contains_key("x-request-id"));
}

// ---------------------------------------------------------------------------
// Test: GET /api/v1/tryon/status
// ---------------------------------------------------------------------------

#[tokio::test]
async fn status_reports_mock_mode_and_storage() {
    let t = common::build_test_app().await;

    let response = get(t.app(), "/api/v1/tryon/status").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["available"], true);
    assert_eq!(json["mockMode"], true);
    assert!(json["provider"].is_string());
    assert!(json["model"].is_string());
    assert!(json["message"].is_string());
    assert_eq!(json["storage"]["configured"], false);
    assert_eq!(json["storage"]["backend"], "none");
}

#[tokio::test]
async fn status_reports_live_mode_when_keyed() {
    let mut config = common::test_config();
    config.provider = ProviderConfig {
        api_key: Some("sk-test".into()),
        ..config.provider
    };
    let generator = Arc::new(ProviderAdapter::new(&config.provider).unwrap());
    let t = common::build_test_app_with(config, generator).await;

    let json = body_json(get(t.app(), "/api/v1/tryon/status").await).await;

    assert_eq!(json["mockMode"], false);
}

// ---------------------------------------------------------------------------
// Test: local storage backend serves promoted files
// ---------------------------------------------------------------------------

#[tokio::test]
async fn local_storage_files_are_served() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(dir.path().join("tryon-results/tryon")).unwrap();
    std::fs::write(dir.path().join("tryon-results/tryon/a.png"), b"png-bytes").unwrap();

    let mut config = common::test_config();
    config.storage = StorageConfig {
        backend: StorageBackend::Local,
        local_dir: dir.path().to_path_buf(),
        ..StorageConfig::default()
    };
    let generator = Arc::new(ProviderAdapter::new(&config.provider).unwrap());
    let t = common::build_test_app_with(config, generator).await;

    let response = get(t.app(), "/files/tryon-results/tryon/a.png").await;
    assert_eq!(response.status(), StatusCode::OK);

    let status = body_json(get(t.app(), "/api/v1/tryon/status").await).await;
    assert_eq!(status["storage"]["configured"], true);
    assert_eq!(status["storage"]["backend"], "local");
    assert_eq!(status["storage"]["bucket"], "tryon-results");
}
