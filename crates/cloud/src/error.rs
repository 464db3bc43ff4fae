/// Errors raised while promoting a result into durable storage.
///
/// These never reach HTTP clients; the promoter logs them and falls back to
/// the provider-hosted URL.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Fetching the provider-hosted image failed.
    #[error("Download failed: {0}")]
    Download(String),

    /// The download succeeded but is not an image.
    #[error("Unexpected content type: {0}")]
    UnexpectedContentType(String),

    /// The object store rejected the write.
    #[error("Storage backend error: {0}")]
    Backend(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
