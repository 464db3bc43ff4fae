/// Errors from a provider generation call.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The call exceeded the configured timeout.
    #[error("Provider request timed out after {0}s")]
    Timeout(u64),

    /// The provider returned a non-2xx status code.
    #[error("Provider API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Upstream message, or the raw body when it is not JSON.
        message: String,
    },

    /// A 2xx response that did not contain a usable image.
    #[error("Malformed provider response: {0}")]
    MalformedResponse(String),
}
