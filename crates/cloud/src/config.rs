//! Storage configuration loaded from environment variables.

use std::path::PathBuf;
use std::sync::Arc;

use serde::Serialize;

use crate::store::{LocalDirStore, ObjectStore, S3Store};

/// Default bucket results are promoted into.
pub const DEFAULT_BUCKET: &str = "tryon-results";
pub const DEFAULT_S3_REGION: &str = "us-east-1";
pub const DEFAULT_LOCAL_DIR: &str = "./storage";
pub const DEFAULT_LOCAL_PUBLIC_BASE_URL: &str = "http://localhost:3000/files";

/// Which object store backs result promotion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    /// Promotion disabled; provider URLs are returned as-is.
    None,
    S3,
    Local,
}

impl StorageBackend {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "" | "none" | "off" => Some(Self::None),
            "s3" => Some(Self::S3),
            "local" => Some(Self::Local),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::S3 => "s3",
            Self::Local => "local",
        }
    }
}

/// Connection details for an S3 or S3-compatible endpoint.
#[derive(Debug, Clone, Default)]
pub struct S3Settings {
    /// Custom endpoint (MinIO, R2, ...). AWS is used when unset.
    pub endpoint: Option<String>,
    pub region: String,
    /// Static credentials. When unset the default AWS provider chain is used.
    pub access_key_id: Option<String>,
    pub secret_access_key: Option<String>,
    /// Prefix for public object URLs, e.g. a CDN domain.
    pub public_base_url: Option<String>,
}

/// Result storage settings.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    pub bucket: String,
    pub s3: S3Settings,
    pub local_dir: PathBuf,
    pub local_public_base_url: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::None,
            bucket: DEFAULT_BUCKET.to_string(),
            s3: S3Settings {
                region: DEFAULT_S3_REGION.to_string(),
                ..S3Settings::default()
            },
            local_dir: PathBuf::from(DEFAULT_LOCAL_DIR),
            local_public_base_url: DEFAULT_LOCAL_PUBLIC_BASE_URL.to_string(),
        }
    }
}

/// Storage block reported by `GET /status`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageStatus {
    pub configured: bool,
    pub backend: &'static str,
    pub bucket: Option<String>,
}

impl StorageConfig {
    /// Load storage configuration from environment variables.
    ///
    /// | Env Var                 | Default                       |
    /// |-------------------------|-------------------------------|
    /// | `STORAGE_BACKEND`       | `none` (`s3`, `local`)        |
    /// | `STORAGE_BUCKET`        | `tryon-results`               |
    /// | `S3_ENDPOINT`           | unset (AWS)                   |
    /// | `S3_REGION`             | `us-east-1`                   |
    /// | `S3_ACCESS_KEY_ID`      | unset (default chain)         |
    /// | `S3_SECRET_ACCESS_KEY`  | unset (default chain)         |
    /// | `S3_PUBLIC_BASE_URL`    | unset                         |
    /// | `LOCAL_STORAGE_DIR`     | `./storage`                   |
    /// | `LOCAL_PUBLIC_BASE_URL` | `http://localhost:3000/files` |
    ///
    /// # Panics
    ///
    /// Panics if `STORAGE_BACKEND` names an unknown backend.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let backend = std::env::var("STORAGE_BACKEND")
            .map(|v| {
                StorageBackend::parse(&v)
                    .expect("STORAGE_BACKEND must be one of: none, s3, local")
            })
            .unwrap_or(StorageBackend::None);

        Self {
            backend,
            bucket: env_or("STORAGE_BUCKET", defaults.bucket),
            s3: S3Settings {
                endpoint: non_empty_var("S3_ENDPOINT"),
                region: env_or("S3_REGION", defaults.s3.region),
                access_key_id: non_empty_var("S3_ACCESS_KEY_ID"),
                secret_access_key: non_empty_var("S3_SECRET_ACCESS_KEY"),
                public_base_url: non_empty_var("S3_PUBLIC_BASE_URL"),
            },
            local_dir: non_empty_var("LOCAL_STORAGE_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.local_dir),
            local_public_base_url: env_or("LOCAL_PUBLIC_BASE_URL", defaults.local_public_base_url),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.backend != StorageBackend::None
    }

    pub fn status(&self) -> StorageStatus {
        StorageStatus {
            configured: self.is_configured(),
            backend: self.backend.as_str(),
            bucket: self.is_configured().then(|| self.bucket.clone()),
        }
    }

    /// Build the configured object store, or `None` when promotion is off.
    pub async fn build_store(&self) -> Option<Arc<dyn ObjectStore>> {
        match self.backend {
            StorageBackend::None => None,
            StorageBackend::S3 => Some(Arc::new(S3Store::connect(&self.s3).await)),
            StorageBackend::Local => Some(Arc::new(LocalDirStore::new(
                self.local_dir.clone(),
                self.local_public_base_url.clone(),
            ))),
        }
    }
}

fn env_or(name: &str, default: String) -> String {
    non_empty_var(name).unwrap_or(default)
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
