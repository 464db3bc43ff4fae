//! Durable storage for generated results.
//!
//! Provider-hosted result URLs are often short-lived. [`StoragePromoter`]
//! copies the bytes into an [`ObjectStore`] and hands back a stable public
//! URL; any failure along the way degrades to the original URL.

pub mod config;
pub mod error;
pub mod promoter;
pub mod store;

pub use config::{StorageBackend, StorageConfig, StorageStatus};
pub use error::StorageError;
pub use promoter::{Promotion, ResultPromoter, StoragePromoter};
pub use store::{LocalDirStore, ObjectStore, S3Store};
