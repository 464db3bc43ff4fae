//! Provider configuration loaded from environment variables.

/// Default OpenAI-compatible endpoint root.
pub const DEFAULT_BASE_URL: &str = "https://ark.cn-beijing.volces.com/api/v3";
/// Default provider identifier reported by status.
pub const DEFAULT_PROVIDER: &str = "volcengine-ark";
/// Default image model.
pub const DEFAULT_MODEL: &str = "doubao-seedream-4-0-250828";
/// Fixed target resolution.
pub const DEFAULT_IMAGE_SIZE: &str = "1024x1024";
/// Upper bound on a single provider call.
pub const DEFAULT_TIMEOUT_SECS: u64 = 90;
/// Simulated latency in mock mode.
pub const DEFAULT_MOCK_DELAY_MS: u64 = 1500;

/// Provider settings. A missing `api_key` selects mock mode.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub provider: String,
    pub model: String,
    pub image_size: String,
    pub timeout_secs: u64,
    pub mock_delay_ms: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            provider: DEFAULT_PROVIDER.to_string(),
            model: DEFAULT_MODEL.to_string(),
            image_size: DEFAULT_IMAGE_SIZE.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            mock_delay_ms: DEFAULT_MOCK_DELAY_MS,
        }
    }
}

impl ProviderConfig {
    /// Load provider configuration from environment variables.
    ///
    /// | Env Var                 | Default                                    |
    /// |-------------------------|--------------------------------------------|
    /// | `PROVIDER_API_KEY`      | unset (mock mode)                          |
    /// | `PROVIDER_BASE_URL`     | `https://ark.cn-beijing.volces.com/api/v3` |
    /// | `PROVIDER_NAME`         | `volcengine-ark`                           |
    /// | `PROVIDER_MODEL`        | `doubao-seedream-4-0-250828`               |
    /// | `PROVIDER_IMAGE_SIZE`   | `1024x1024`                                |
    /// | `PROVIDER_TIMEOUT_SECS` | `90`                                       |
    /// | `MOCK_DELAY_MS`         | `1500`                                     |
    ///
    /// # Panics
    ///
    /// Panics if a numeric variable is set but not a valid `u64`.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let timeout_secs: u64 = std::env::var("PROVIDER_TIMEOUT_SECS")
            .unwrap_or_else(|_| DEFAULT_TIMEOUT_SECS.to_string())
            .parse()
            .expect("PROVIDER_TIMEOUT_SECS must be a valid u64");

        let mock_delay_ms: u64 = std::env::var("MOCK_DELAY_MS")
            .unwrap_or_else(|_| DEFAULT_MOCK_DELAY_MS.to_string())
            .parse()
            .expect("MOCK_DELAY_MS must be a valid u64");

        Self {
            api_key: non_empty_var("PROVIDER_API_KEY"),
            base_url: non_empty_var("PROVIDER_BASE_URL").unwrap_or(defaults.base_url),
            provider: non_empty_var("PROVIDER_NAME").unwrap_or(defaults.provider),
            model: non_empty_var("PROVIDER_MODEL").unwrap_or(defaults.model),
            image_size: non_empty_var("PROVIDER_IMAGE_SIZE").unwrap_or(defaults.image_size),
            timeout_secs,
            mock_delay_ms,
        }
    }

    /// Whether no credential is configured.
    pub fn is_mock(&self) -> bool {
        self.api_key.is_none()
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
