//! HTTP client for the extraction endpoint.

use std::time::Duration;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;

use crate::types::{DualExtraction, ExtractionRequest, ExtractionResponse};

/// Default request timeout for extraction calls.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for the vision API client.
#[derive(Debug, Clone)]
pub struct VisionConfig {
    /// Base URL of the extraction service (no trailing slash).
    pub api_url: String,
    /// Bearer token sent with every request.
    pub api_key: String,
    /// Model identifier passed through to the service.
    pub model: String,
    /// Per-request timeout in seconds (default: 30).
    pub timeout_secs: u64,
}

impl VisionConfig {
    /// Load vision API configuration from environment variables.
    ///
    /// | Env Var               | Required | Default |
    /// |-----------------------|----------|---------|
    /// | `VISION_API_URL`      | **yes**  | --      |
    /// | `VISION_API_KEY`      | **yes**  | --      |
    /// | `VISION_MODEL`        | no       | `card-extract-1` |
    /// | `VISION_TIMEOUT_SECS` | no       | `30`    |
    ///
    /// # Panics
    ///
    /// Panics if a required variable is missing; misconfiguration
    /// should fail at startup, not on the first upload.
    pub fn from_env() -> Self {
        let api_url = std::env::var("VISION_API_URL")
            .expect("VISION_API_URL must be set in the environment");
        let api_key = std::env::var("VISION_API_KEY")
            .expect("VISION_API_KEY must be set in the environment");
        let model =
            std::env::var("VISION_MODEL").unwrap_or_else(|_| "card-extract-1".into());
        let timeout_secs: u64 = std::env::var("VISION_TIMEOUT_SECS")
            .unwrap_or_else(|_| DEFAULT_TIMEOUT_SECS.to_string())
            .parse()
            .expect("VISION_TIMEOUT_SECS must be a valid u64");

        Self {
            api_url,
            api_key,
            model,
            timeout_secs,
        }
    }
}

/// Errors from the vision API client.
#[derive(Debug, thiserror::Error)]
pub enum VisionError {
    /// Transport-level failure (connect, timeout, body read).
    #[error("Vision API request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("Vision API returned {status}: {message}")]
    Api { status: u16, message: String },
}

/// Client for the hosted extraction endpoint.
///
/// Cheap to clone; the inner `reqwest::Client` pools connections.
#[derive(Debug, Clone)]
pub struct VisionClient {
    http: reqwest::Client,
    config: VisionConfig,
}

impl VisionClient {
    /// Build a client with the configured per-request timeout.
    pub fn new(config: VisionConfig) -> Result<Self, VisionError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { http, config })
    }

    /// Extract contact fields from one card image.
    pub async fn extract(
        &self,
        image: &[u8],
        mime_type: &str,
    ) -> Result<ExtractionResponse, VisionError> {
        let request = ExtractionRequest {
            model: self.config.model.clone(),
            mime_type: mime_type.to_string(),
            image: BASE64.encode(image),
        };

        let response = self
            .http
            .post(format!("{}/v1/extract", self.config.api_url))
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), "Vision API call failed");
            return Err(VisionError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json().await?)
    }

    /// Extract both card sides concurrently.
    ///
    /// The two calls are independent: each side's failure is captured
    /// in its own `Result` and does not abort the other side.
    pub async fn extract_both_sides(
        &self,
        front: (&[u8], &str),
        back: Option<(&[u8], &str)>,
    ) -> DualExtraction {
        let front_fut = self.extract(front.0, front.1);

        match back {
            Some((image, mime)) => {
                let (front, back) =
                    futures::future::join(front_fut, self.extract(image, mime)).await;
                DualExtraction {
                    front,
                    back: Some(back),
                }
            }
            None => DualExtraction {
                front: front_fut.await,
                back: None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Client pointed at a closed local port: every call fails fast.
    fn unreachable_client() -> VisionClient {
        VisionClient::new(VisionConfig {
            api_url: "http://127.0.0.1:9".to_string(),
            api_key: "test-key".to_string(),
            model: "card-extract-1".to_string(),
            timeout_secs: 1,
        })
        .expect("client should build")
    }

    #[tokio::test]
    async fn dual_extraction_captures_failures_per_side() {
        let client = unreachable_client();

        let dual = client
            .extract_both_sides(
                (&b"front"[..], "image/png"),
                Some((&b"back"[..], "image/png")),
            )
            .await;

        // Each side carries its own outcome; neither aborts the other.
        assert!(dual.front.is_err());
        assert!(matches!(dual.back, Some(Err(_))));
    }

    #[tokio::test]
    async fn missing_back_side_is_not_an_outcome() {
        let client = unreachable_client();

        let dual = client
            .extract_both_sides((&b"front"[..], "image/png"), None)
            .await;

        assert!(dual.front.is_err());
        assert!(dual.back.is_none());
    }
}
