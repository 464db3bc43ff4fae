#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;
use tryon_api::auth::jwt::{generate_access_token, JwtConfig};
use tryon_api::config::ServerConfig;
use tryon_api::router::build_app_router;
use tryon_api::state::AppState;
use tryon_cloud::{ResultPromoter, StorageConfig};
use tryon_core::catalog::Catalog;
use tryon_core::types::DbId;
use tryon_db::models::garment::GarmentSnapshot;
use tryon_db::store::MemoryStore;
use tryon_pipeline::TryOnPipeline;
use tryon_provider::{ImageGenerator, ProviderAdapter, ProviderConfig};

pub const USER_ID: DbId = 1;
pub const OTHER_USER_ID: DbId = 2;
pub const GARMENT_ID: DbId = 10;
pub const BARE_GARMENT_ID: DbId = 11;

/// Test `ServerConfig`: mock provider with no delay, storage off, no database.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        database_url: None,
        catalog_path: None,
        jwt: JwtConfig {
            secret: "tryon-integration-test-secret".to_string(),
            access_token_expiry_mins: 15,
        },
        provider: ProviderConfig {
            mock_delay_ms: 0,
            ..ProviderConfig::default()
        },
        storage: StorageConfig::default(),
    }
}

/// A router plus handles on its in-memory store.
pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryStore>,
    pub config: ServerConfig,
}

impl TestApp {
    pub fn token(&self, user_id: DbId) -> String {
        generate_access_token(user_id, &self.config.jwt).unwrap()
    }

    pub fn app(&self) -> Router {
        self.router.clone()
    }
}

/// App with the real adapter in mock mode and two garments owned by
/// [`USER_ID`]: one with an image and one without.
pub async fn build_test_app() -> TestApp {
    let config = test_config();
    let generator = Arc::new(ProviderAdapter::new(&config.provider).unwrap());
    build_test_app_with(config, generator).await
}

pub async fn build_test_app_with(
    config: ServerConfig,
    generator: Arc<dyn ImageGenerator>,
) -> TestApp {
    build_test_app_with_promoter(config, generator, None).await
}

/// As [`build_test_app_with`], promoting non-mock results through
/// `promoter` when one is given.
pub async fn build_test_app_with_promoter(
    config: ServerConfig,
    generator: Arc<dyn ImageGenerator>,
    promoter: Option<Arc<dyn ResultPromoter>>,
) -> TestApp {
    let store = Arc::new(MemoryStore::new());
    store
        .insert_garment(
            USER_ID,
            GarmentSnapshot {
                id: GARMENT_ID,
                name: "Linen Shirt".into(),
                color: Some("white".into()),
                style: Some("casual".into()),
                brand: None,
                image_url: Some("https://cdn.example/garments/shirt.jpg".into()),
            },
        )
        .await;
    store
        .insert_garment(
            USER_ID,
            GarmentSnapshot {
                id: BARE_GARMENT_ID,
                name: "Wool Coat".into(),
                color: None,
                style: None,
                brand: None,
                image_url: None,
            },
        )
        .await;

    let catalog = Arc::new(Catalog::builtin().unwrap());
    let mut pipeline = TryOnPipeline::new(
        Arc::clone(&catalog),
        Arc::clone(&generator),
        store.clone(),
        store.clone(),
    );
    if let Some(promoter) = promoter {
        pipeline = pipeline.with_promoter(promoter, "tryon-results".to_string());
    }

    let state = AppState {
        config: Arc::new(config.clone()),
        catalog,
        generator,
        history: store.clone(),
        pipeline: Arc::new(pipeline),
        storage: config.storage.status(),
    };

    TestApp {
        router: build_app_router(state, &config),
        store,
        config,
    }
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    let body = match body {
        Some(json) => {
            builder = builder.header(CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };
    app.oneshot(builder.body(body).unwrap()).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn post_json(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, Some(token), None).await
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
