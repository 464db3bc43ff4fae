//! The [`ImageGenerator`] seam and the production [`ProviderAdapter`].

use async_trait::async_trait;
use serde::Serialize;

use crate::client::LiveClient;
use crate::config::ProviderConfig;
use crate::error::ProviderError;
use crate::mock::{MockGenerator, MOCK_MESSAGE};

/// A successfully generated image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedImage {
    /// Provider-hosted URL (or a placeholder path in mock mode).
    pub image_url: String,
    pub is_mock: bool,
    pub message: Option<String>,
}

/// Snapshot reported by `GET /status`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderStatus {
    pub available: bool,
    pub mock_mode: bool,
    pub provider: String,
    pub model: String,
    pub message: String,
}

/// Anything that can turn a prompt plus reference images into one image.
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    /// Generate a single image. Only the first reference image is used.
    async fn generate(
        &self,
        prompt: &str,
        reference_images: &[String],
    ) -> Result<GeneratedImage, ProviderError>;

    fn status(&self) -> ProviderStatus;
}

enum Mode {
    Mock(MockGenerator),
    Live(LiveClient),
}

/// Generator backed by the configured provider, or by canned results when
/// no credential is configured.
pub struct ProviderAdapter {
    mode: Mode,
    provider: String,
    model: String,
}

impl ProviderAdapter {
    /// Build the adapter. The mode is fixed here for the adapter's lifetime.
    pub fn new(config: &ProviderConfig) -> Result<Self, ProviderError> {
        let mode = match &config.api_key {
            Some(key) => {
                tracing::info!(
                    provider = %config.provider,
                    model = %config.model,
                    timeout_secs = config.timeout_secs,
                    "Image provider running in live mode",
                );
                Mode::Live(LiveClient::new(config, key.clone())?)
            }
            None => {
                tracing::warn!(
                    delay_ms = config.mock_delay_ms,
                    "PROVIDER_API_KEY not set, image provider running in mock mode",
                );
                Mode::Mock(MockGenerator::new(config.mock_delay_ms))
            }
        };

        Ok(Self {
            mode,
            provider: config.provider.clone(),
            model: config.model.clone(),
        })
    }

    pub fn is_mock(&self) -> bool {
        matches!(self.mode, Mode::Mock(_))
    }
}

#[async_trait]
impl ImageGenerator for ProviderAdapter {
    async fn generate(
        &self,
        prompt: &str,
        reference_images: &[String],
    ) -> Result<GeneratedImage, ProviderError> {
        match &self.mode {
            Mode::Mock(mock) => Ok(GeneratedImage {
                image_url: mock.generate().await,
                is_mock: true,
                message: Some(MOCK_MESSAGE.to_string()),
            }),
            Mode::Live(client) => {
                let image_url = client.generate(prompt, reference_images).await?;
                Ok(GeneratedImage {
                    image_url,
                    is_mock: false,
                    message: None,
                })
            }
        }
    }

    fn status(&self) -> ProviderStatus {
        let message = if self.is_mock() {
            MOCK_MESSAGE.to_string()
        } else {
            format!("Connected to {} ({})", self.provider, self.model)
        };
        ProviderStatus {
            available: true,
            mock_mode: self.is_mock(),
            provider: self.provider.clone(),
            model: self.model.clone(),
            message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MOCK_RESULT_IMAGES;

    fn mock_config() -> ProviderConfig {
        ProviderConfig {
            mock_delay_ms: 0,
            ..ProviderConfig::default()
        }
    }

    #[tokio::test]
    async fn mock_mode_without_credential() {
        let adapter = ProviderAdapter::new(&mock_config()).unwrap();
        assert!(adapter.is_mock());

        let image = adapter.generate("prompt", &["s.png".into()]).await.unwrap();
        assert!(image.is_mock);
        assert!(MOCK_RESULT_IMAGES.contains(&image.image_url.as_str()));
        assert!(image.message.is_some());
    }

    #[test]
    fn both_modes_side_by_side() {
        let mock = ProviderAdapter::new(&mock_config()).unwrap();
        let live = ProviderAdapter::new(&ProviderConfig {
            api_key: Some("sk-test".into()),
            ..mock_config()
        })
        .unwrap();

        assert!(mock.is_mock());
        assert!(!live.is_mock());
    }

    #[test]
    fn status_reports_mode_and_identifiers() {
        let status = ProviderAdapter::new(&mock_config()).unwrap().status();
        assert!(status.available);
        assert!(status.mock_mode);
        assert_eq!(status.provider, crate::config::DEFAULT_PROVIDER);
        assert_eq!(status.model, crate::config::DEFAULT_MODEL);

        let json = serde_json::to_value(&status).unwrap();
        assert_eq!(json["mockMode"], true);
    }

    #[test]
    fn live_status_message_names_provider() {
        let live = ProviderAdapter::new(&ProviderConfig {
            api_key: Some("sk-test".into()),
            provider: "acme-images".into(),
            ..mock_config()
        })
        .unwrap();
        let status = live.status();
        assert!(!status.mock_mode);
        assert!(status.message.contains("acme-images"));
    }
}
