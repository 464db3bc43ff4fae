//! Copy provider-hosted results into durable storage.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{Datelike, Utc};

use crate::error::StorageError;
use crate::store::ObjectStore;

/// Upper bound on downloading a result from the provider.
pub const DOWNLOAD_TIMEOUT_SECS: u64 = 60;

/// Prefix of every promoted object key.
pub const KEY_PREFIX: &str = "tryon";

/// Outcome of a promotion attempt. Never an error: on any failure
/// `promoted` is false and `final_url` is the original URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Promotion {
    pub promoted: bool,
    pub final_url: String,
}

impl Promotion {
    fn degraded(remote_url: &str) -> Self {
        Self {
            promoted: false,
            final_url: remote_url.to_string(),
        }
    }
}

#[async_trait]
pub trait ResultPromoter: Send + Sync {
    async fn promote(&self, remote_url: &str, bucket: &str) -> Promotion;
}

/// Downloads the remote image and writes it to an [`ObjectStore`].
pub struct StoragePromoter {
    client: reqwest::Client,
    store: Arc<dyn ObjectStore>,
}

impl StoragePromoter {
    pub fn new(store: Arc<dyn ObjectStore>) -> Result<Self, StorageError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(DOWNLOAD_TIMEOUT_SECS))
            .build()
            .map_err(|e| StorageError::Download(e.to_string()))?;
        Ok(Self { client, store })
    }

    async fn try_promote(&self, remote_url: &str, bucket: &str) -> Result<String, StorageError> {
        let response = self
            .client
            .get(remote_url)
            .send()
            .await
            .map_err(|e| StorageError::Download(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(StorageError::Download(format!("HTTP {status}")));
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.split(';').next().unwrap_or(v).trim().to_ascii_lowercase())
            .unwrap_or_else(|| "image/png".to_string());

        if !is_image_content_type(&content_type) {
            return Err(StorageError::UnexpectedContentType(content_type));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| StorageError::Download(e.to_string()))?;
        if bytes.is_empty() {
            return Err(StorageError::Download("empty body".into()));
        }

        let key = object_key(extension_for_content_type(&content_type));
        self.store
            .put_object(bucket, &key, bytes.to_vec(), &content_type)
            .await
    }
}

#[async_trait]
impl ResultPromoter for StoragePromoter {
    async fn promote(&self, remote_url: &str, bucket: &str) -> Promotion {
        match self.try_promote(remote_url, bucket).await {
            Ok(final_url) => {
                tracing::info!(
                    backend = self.store.backend_name(),
                    %final_url,
                    "Result promoted to durable storage",
                );
                Promotion {
                    promoted: true,
                    final_url,
                }
            }
            Err(e) => {
                tracing::warn!(
                    backend = self.store.backend_name(),
                    %remote_url,
                    error = %e,
                    "Result promotion failed, keeping provider URL",
                );
                Promotion::degraded(remote_url)
            }
        }
    }
}

/// File extension for a declared content type. Unknown image types map to
/// `png`.
pub fn extension_for_content_type(content_type: &str) -> &'static str {
    if content_type.contains("jpeg") || content_type.contains("jpg") {
        "jpg"
    } else if content_type.contains("webp") {
        "webp"
    } else if content_type.contains("gif") {
        "gif"
    } else {
        "png"
    }
}

fn is_image_content_type(content_type: &str) -> bool {
    content_type.starts_with("image/") || content_type == "application/octet-stream"
}

/// A fresh key of the form `tryon/YYYY/MM/<uuid>.<ext>`.
pub fn object_key(extension: &str) -> String {
    let now = Utc::now();
    format!(
        "{KEY_PREFIX}/{:04}/{:02}/{}.{extension}",
        now.year(),
        now.month(),
        uuid::Uuid::new_v4()
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::LocalDirStore;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Answer a single GET with the given content type and body.
    async fn serve_image(content_type: &'static str, body: &'static [u8]) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = Vec::new();
            let mut chunk = [0u8; 1024];
            while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut chunk).await.unwrap();
                if n == 0 {
                    break;
                }
                buf.extend_from_slice(&chunk[..n]);
            }
            let head = format!(
                "HTTP/1.1 200 OK\r\nContent-Type: {content_type}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                body.len()
            );
            socket.write_all(head.as_bytes()).await.unwrap();
            socket.write_all(body).await.unwrap();
            socket.shutdown().await.ok();
        });
        format!("http://{addr}/result.bin")
    }

    struct FailingStore;

    #[async_trait]
    impl ObjectStore for FailingStore {
        async fn put_object(
            &self,
            _bucket: &str,
            _key: &str,
            _bytes: Vec<u8>,
            _content_type: &str,
        ) -> Result<String, StorageError> {
            Err(StorageError::Backend("bucket does not exist".into()))
        }

        fn backend_name(&self) -> &'static str {
            "failing"
        }
    }

    fn local_promoter(dir: &tempfile::TempDir) -> StoragePromoter {
        let store = LocalDirStore::new(dir.path().to_path_buf(), "http://files.test".into());
        StoragePromoter::new(Arc::new(store)).unwrap()
    }

    #[test]
    fn extension_mapping() {
        assert_eq!(extension_for_content_type("image/jpeg"), "jpg");
        assert_eq!(extension_for_content_type("image/webp"), "webp");
        assert_eq!(extension_for_content_type("image/gif"), "gif");
        assert_eq!(extension_for_content_type("image/png"), "png");
        assert_eq!(extension_for_content_type("image/avif"), "png");
        assert_eq!(extension_for_content_type("application/octet-stream"), "png");
    }

    #[test]
    fn keys_are_unique_and_dated() {
        let a = object_key("png");
        let b = object_key("png");
        assert_ne!(a, b);
        assert!(a.starts_with("tryon/"));
        assert!(a.ends_with(".png"));
        assert_eq!(a.split('/').count(), 4);
    }

    #[tokio::test]
    async fn promotes_into_local_store() {
        let dir = tempfile::tempdir().unwrap();
        let url = serve_image("image/jpeg", b"\xff\xd8\xff fake jpeg").await;

        let promotion = local_promoter(&dir).promote(&url, "results").await;

        assert!(promotion.promoted);
        assert!(promotion.final_url.starts_with("http://files.test/results/tryon/"));
        assert!(promotion.final_url.ends_with(".jpg"));
    }

    #[tokio::test]
    async fn unreachable_source_degrades() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let remote = format!("http://{addr}/gone.png");

        let dir = tempfile::tempdir().unwrap();
        let promotion = local_promoter(&dir).promote(&remote, "results").await;

        assert_eq!(
            promotion,
            Promotion {
                promoted: false,
                final_url: remote
            }
        );
    }

    #[tokio::test]
    async fn non_image_content_degrades() {
        let dir = tempfile::tempdir().unwrap();
        let url = serve_image("text/html", b"<html>expired</html>").await;

        let promotion = local_promoter(&dir).promote(&url, "results").await;

        assert!(!promotion.promoted);
        assert_eq!(promotion.final_url, url);
    }

    #[tokio::test]
    async fn backend_failure_degrades() {
        let url = serve_image("image/png", b"\x89PNG fake").await;
        let promoter = StoragePromoter::new(Arc::new(FailingStore)).unwrap();

        let promotion = promoter.promote(&url, "results").await;

        assert!(!promotion.promoted);
        assert_eq!(promotion.final_url, url);
    }
}
