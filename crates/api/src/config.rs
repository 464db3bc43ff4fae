use std::path::PathBuf;

use tryon_cloud::promoter::DOWNLOAD_TIMEOUT_SECS;
use tryon_cloud::StorageConfig;
use tryon_provider::ProviderConfig;

use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development except
/// `JWT_SECRET`.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `180`). Should exceed the
    /// provider timeout plus, with storage enabled, the result download
    /// timeout; a request cut off earlier still records its attempt but the
    /// client only sees a 408.
    pub request_timeout_secs: u64,
    /// PostgreSQL URL. `None` selects the in-memory store.
    pub database_url: Option<String>,
    /// Optional JSON document replacing the built-in scene/subject catalog.
    pub catalog_path: Option<PathBuf>,
    pub jwt: JwtConfig,
    pub provider: ProviderConfig,
    pub storage: StorageConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                 |
    /// |------------------------|-------------------------|
    /// | `HOST`                 | `0.0.0.0`               |
    /// | `PORT`                 | `3000`                  |
    /// | `CORS_ORIGINS`         | `http://localhost:5173` |
    /// | `REQUEST_TIMEOUT_SECS` | `180`                   |
    /// | `DATABASE_URL`         | unset (in-memory store) |
    /// | `CATALOG_PATH`         | unset (built-in catalog)|
    ///
    /// Provider, storage and JWT settings are documented on their own
    /// `from_env` constructors.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "180".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let database_url = std::env::var("DATABASE_URL")
            .ok()
            .filter(|v| !v.trim().is_empty());

        let catalog_path = std::env::var("CATALOG_PATH")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);

        let provider = ProviderConfig::from_env();
        let storage = StorageConfig::from_env();
        let generation_budget_secs = generation_budget_secs(&provider, &storage);
        if request_timeout_secs <= generation_budget_secs {
            tracing::warn!(
                request_timeout_secs,
                generation_budget_secs,
                "REQUEST_TIMEOUT_SECS does not exceed the provider and download timeouts; \
                 slow generations will be recorded but answered with 408",
            );
        }

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            database_url,
            catalog_path,
            jwt: JwtConfig::from_env(),
            provider,
            storage,
        }
    }
}

/// Worst-case seconds a generation spends in outbound calls: the provider
/// timeout, plus the result download timeout when promotion is enabled.
pub fn generation_budget_secs(provider: &ProviderConfig, storage: &StorageConfig) -> u64 {
    let download = if storage.is_configured() {
        DOWNLOAD_TIMEOUT_SECS
    } else {
        0
    };
    provider.timeout_secs + download
}

#[cfg(test)]
mod tests {
    use super::*;
    use tryon_cloud::StorageBackend;

    #[test]
    fn budget_is_provider_timeout_without_storage() {
        let provider = ProviderConfig {
            timeout_secs: 90,
            ..ProviderConfig::default()
        };
        assert_eq!(generation_budget_secs(&provider, &StorageConfig::default()), 90);
    }

    #[test]
    fn budget_adds_download_timeout_with_storage() {
        let provider = ProviderConfig {
            timeout_secs: 90,
            ..ProviderConfig::default()
        };
        let storage = StorageConfig {
            backend: StorageBackend::Local,
            ..StorageConfig::default()
        };
        assert_eq!(
            generation_budget_secs(&provider, &storage),
            90 + DOWNLOAD_TIMEOUT_SECS
        );
    }
}
