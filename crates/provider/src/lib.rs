//! Remote generative-image provider adapter.
//!
//! [`ProviderAdapter`] decides once, at construction, whether it talks to
//! the real provider or serves canned mock results; that decision holds
//! for the adapter's whole lifetime. Callers depend on the
//! [`ImageGenerator`] trait so tests can substitute their own generator.

pub mod adapter;
pub mod client;
pub mod config;
pub mod error;
pub mod mock;

pub use adapter::{GeneratedImage, ImageGenerator, ProviderAdapter, ProviderStatus};
pub use config::ProviderConfig;
pub use error::ProviderError;
