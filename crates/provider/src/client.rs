//! HTTP client for the provider's OpenAI-compatible images endpoint.
//!
//! Sends `POST {base_url}/images/generations` with the prompt, at most one
//! reference image, a fixed size and `response_format = "url"`.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::ProviderConfig;
use crate::error::ProviderError;

/// Request body for the images endpoint.
#[derive(Debug, Serialize)]
struct ImagesRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    image: Option<&'a str>,
    size: &'a str,
    response_format: &'static str,
    watermark: bool,
}

/// Successful response body. Only the first image is used.
#[derive(Debug, Deserialize)]
struct ImagesResponse {
    #[serde(default)]
    data: Vec<ImageData>,
}

#[derive(Debug, Deserialize)]
struct ImageData {
    url: Option<String>,
}

/// HTTP client for the live provider.
pub struct LiveClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
    image_size: String,
    timeout_secs: u64,
}

impl LiveClient {
    /// Build a client with the configured timeout applied to every call.
    pub fn new(config: &ProviderConfig, api_key: String) -> Result<Self, ProviderError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            image_size: config.image_size.clone(),
            timeout_secs: config.timeout_secs,
        })
    }

    /// Request one image and return its provider-hosted URL.
    pub async fn generate(
        &self,
        prompt: &str,
        reference_images: &[String],
    ) -> Result<String, ProviderError> {
        let body = ImagesRequest {
            model: &self.model,
            prompt,
            image: reference_images.first().map(String::as_str),
            size: &self.image_size,
            response_format: "url",
            watermark: false,
        };

        let response = self
            .client
            .post(format!("{}/images/generations", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| self.map_request_error(e))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| self.map_request_error(e))?;

        if !status.is_success() {
            return Err(ProviderError::Api {
                status: status.as_u16(),
                message: extract_error_message(&text),
            });
        }

        first_image_url(&text)
    }

    fn map_request_error(&self, err: reqwest::Error) -> ProviderError {
        if err.is_timeout() {
            ProviderError::Timeout(self.timeout_secs)
        } else {
            ProviderError::Request(err)
        }
    }
}

/// Pull a human-readable message out of an error body.
///
/// Understands `{"error": {"message": ..}}` and `{"message": ..}`; anything
/// else (including non-JSON bodies) is returned as raw text.
pub fn extract_error_message(body: &str) -> String {
    let raw = body.trim();
    let Ok(value) = serde_json::from_str::<serde_json::Value>(raw) else {
        return if raw.is_empty() {
            "<empty body>".to_string()
        } else {
            raw.to_string()
        };
    };

    value
        .pointer("/error/message")
        .or_else(|| value.get("message"))
        .or_else(|| value.get("error"))
        .and_then(|v| v.as_str())
        .map(str::to_string)
        .unwrap_or_else(|| raw.to_string())
}

/// Extract `data[0].url` from a success body.
///
/// A 2xx response without it is a failed generation, not an empty success.
pub fn first_image_url(body: &str) -> Result<String, ProviderError> {
    let parsed: ImagesResponse = serde_json::from_str(body)
        .map_err(|e| ProviderError::MalformedResponse(format!("invalid JSON: {e}")))?;

    parsed
        .data
        .into_iter()
        .next()
        .and_then(|d| d.url)
        .filter(|url| !url.trim().is_empty())
        .ok_or_else(|| ProviderError::MalformedResponse("no image in response data".into()))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
