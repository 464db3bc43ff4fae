//! Object stores that results are written into.

use std::path::PathBuf;

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_credential_types::Credentials;
use aws_sdk_s3::config::Region;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;

use crate::config::S3Settings;
use crate::error::StorageError;

/// A bucket/key blob store with public read URLs.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Write `bytes` under `bucket/key` and return its public URL.
    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, StorageError>;

    fn backend_name(&self) -> &'static str;
}

// ---------------------------------------------------------------------------
// S3
// ---------------------------------------------------------------------------

/// S3 or S3-compatible store.
pub struct S3Store {
    client: aws_sdk_s3::Client,
    endpoint: Option<String>,
    region: String,
    public_base_url: Option<String>,
}

impl S3Store {
    /// Build a client from settings. Static credentials win over the default
    /// AWS provider chain; a custom endpoint switches to path-style URLs.
    pub async fn connect(settings: &S3Settings) -> Self {
        let region = Region::new(settings.region.clone());
        let mut loader = aws_config::defaults(BehaviorVersion::latest()).region(region);

        if let (Some(key), Some(secret)) = (&settings.access_key_id, &settings.secret_access_key) {
            loader = loader.credentials_provider(Credentials::new(
                key.clone(),
                secret.clone(),
                None,
                None,
                "tryon-static",
            ));
        }
        if let Some(endpoint) = &settings.endpoint {
            loader = loader.endpoint_url(endpoint.clone());
        }

        let shared = loader.load().await;
        let s3_config = aws_sdk_s3::config::Builder::from(&shared)
            .force_path_style(settings.endpoint.is_some())
            .build();

        tracing::info!(
            endpoint = settings.endpoint.as_deref().unwrap_or("aws"),
            region = %settings.region,
            "S3 result storage configured",
        );

        Self {
            client: aws_sdk_s3::Client::from_conf(s3_config),
            endpoint: settings.endpoint.clone(),
            region: settings.region.clone(),
            public_base_url: settings.public_base_url.clone(),
        }
    }

    fn public_url(&self, bucket: &str, key: &str) -> String {
        s3_public_url(
            self.public_base_url.as_deref(),
            self.endpoint.as_deref(),
            &self.region,
            bucket,
            key,
        )
    }
}

/// Public URL of an S3 object.
///
/// Precedence: explicit public base URL, then custom endpoint (path style),
/// then the AWS virtual-hosted form.
pub fn s3_public_url(
    public_base_url: Option<&str>,
    endpoint: Option<&str>,
    region: &str,
    bucket: &str,
    key: &str,
) -> String {
    match (public_base_url, endpoint) {
        (Some(base), _) => format!("{}/{key}", base.trim_end_matches('/')),
        (None, Some(endpoint)) => format!("{}/{bucket}/{key}", endpoint.trim_end_matches('/')),
        (None, None) => format!("https://{bucket}.s3.{region}.amazonaws.com/{key}"),
    }
}

#[async_trait]
impl ObjectStore for S3Store {
    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, StorageError> {
        self.client
            .put_object()
            .bucket(bucket)
            .key(key)
            .content_type(content_type)
            .body(ByteStream::from(bytes))
            .send()
            .await
            .map_err(|e| StorageError::Backend(DisplayErrorContext(&e).to_string()))?;

        Ok(self.public_url(bucket, key))
    }

    fn backend_name(&self) -> &'static str {
        "s3"
    }
}

// ---------------------------------------------------------------------------
// Local directory
// ---------------------------------------------------------------------------

/// Writes objects to `<root>/<bucket>/<key>` on the local filesystem.
pub struct LocalDirStore {
    root: PathBuf,
    public_base_url: String,
}

impl LocalDirStore {
    pub fn new(root: PathBuf, public_base_url: String) -> Self {
        Self {
            root,
            public_base_url: public_base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl ObjectStore for LocalDirStore {
    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        bytes: Vec<u8>,
        _content_type: &str,
    ) -> Result<String, StorageError> {
        if key.split('/').any(|seg| seg == ".." || seg.is_empty()) || bucket.contains('/') {
            return Err(StorageError::Backend(format!("invalid object path {bucket}/{key}")));
        }

        let path = self.root.join(bucket).join(key);
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&path, bytes).await?;

        Ok(format!("{}/{bucket}/{key}", self.public_base_url))
    }

    fn backend_name(&self) -> &'static str {
        "local"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn s3_url_prefers_public_base() {
        assert_eq!(
            s3_public_url(Some("https://cdn.example/"), Some("http://minio:9000"), "us-east-1", "b", "k.png"),
            "https://cdn.example/k.png"
        );
    }

    #[test]
    fn s3_url_path_style_for_custom_endpoint() {
        assert_eq!(
            s3_public_url(None, Some("http://minio:9000"), "us-east-1", "b", "tryon/k.png"),
            "http://minio:9000/b/tryon/k.png"
        );
    }

    #[test]
    fn s3_url_virtual_hosted_on_aws() {
        assert_eq!(
            s3_public_url(None, None, "eu-west-1", "b", "k.png"),
            "https://b.s3.eu-west-1.amazonaws.com/k.png"
        );
    }

    #[tokio::test]
    async fn local_store_writes_nested_key() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalDirStore::new(dir.path().to_path_buf(), "http://localhost:3000/files/".into());

        let url = store
            .put_object("results", "tryon/2026/10/a.png", vec![1, 2, 3], "image/png")
            .await
            .unwrap();

        assert_eq!(url, "http://localhost:3000/files/results/tryon/2026/10/a.png");
        let written = std::fs::read(dir.path().join("results/tryon/2026/10/a.png")).unwrap();
        assert_eq!(written, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn local_store_rejects_traversal() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalDirStore::new(dir.path().to_path_buf(), "http://x".into());
        let result = store.put_object("b", "../escape.png", vec![0], "image/png").await;
        assert!(matches!(result, Err(StorageError::Backend(_))));
    }
}
