use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use tryon_cloud::StoragePromoter;
use tryon_core::catalog::Catalog;
use tryon_db::store::{GarmentStore, HistoryStore, MemoryStore, PgStore};
use tryon_pipeline::TryOnPipeline;
use tryon_provider::{ImageGenerator, ProviderAdapter};

use tryon_api::config::ServerConfig;
use tryon_api::router::build_app_router;
use tryon_api::state::AppState;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "tryon_api=debug,tryon_pipeline=debug,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Catalog ---
    let catalog = match &config.catalog_path {
        Some(path) => {
            let raw = tokio::fs::read_to_string(path)
                .await
                .unwrap_or_else(|e| panic!("Failed to read CATALOG_PATH {}: {e}", path.display()));
            Catalog::from_json(&raw).expect("CATALOG_PATH is not a valid catalog")
        }
        None => Catalog::builtin().expect("Built-in catalog is invalid"),
    };
    tracing::info!(
        scenes = catalog.list_scenes(None).len(),
        subjects = catalog.list_subjects().len(),
        "Catalog loaded",
    );
    let catalog = Arc::new(catalog);

    // --- Stores ---
    let (garments, history): (Arc<dyn GarmentStore>, Arc<dyn HistoryStore>) =
        match &config.database_url {
            Some(database_url) => {
                let pool = tryon_db::create_pool(database_url)
                    .await
                    .expect("Failed to connect to database");
                tracing::info!("Database connection pool created");

                tryon_db::health_check(&pool)
                    .await
                    .expect("Database health check failed");

                tryon_db::run_migrations(&pool)
                    .await
                    .expect("Failed to run database migrations");
                tracing::info!("Database migrations applied");

                let store = Arc::new(PgStore::new(pool));
                (store.clone() as Arc<dyn GarmentStore>, store as Arc<dyn HistoryStore>)
            }
            None => {
                tracing::warn!("DATABASE_URL not set, using in-memory store (data is lost on restart)");
                let store = Arc::new(MemoryStore::new());
                (store.clone() as Arc<dyn GarmentStore>, store as Arc<dyn HistoryStore>)
            }
        };

    // --- Provider ---
    let generator: Arc<dyn ImageGenerator> = Arc::new(
        ProviderAdapter::new(&config.provider).expect("Failed to build provider client"),
    );

    // --- Result storage ---
    let mut pipeline = TryOnPipeline::new(
        Arc::clone(&catalog),
        Arc::clone(&generator),
        garments,
        Arc::clone(&history),
    );
    match config.storage.build_store().await {
        Some(store) => {
            let promoter =
                StoragePromoter::new(store).expect("Failed to build storage download client");
            pipeline = pipeline.with_promoter(Arc::new(promoter), config.storage.bucket.clone());
        }
        None => tracing::info!("Result storage disabled, provider URLs are returned as-is"),
    }

    // --- App state ---
    let state = AppState {
        config: Arc::new(config.clone()),
        catalog,
        generator,
        history,
        pipeline: Arc::new(pipeline),
        storage: config.storage.status(),
    };

    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    tracing::info!("Graceful shutdown complete");
}

/// Wait for SIGINT or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
