//! Remote inference service client
//!
//! A single request/response call to the configured endpoint: POST
//! `<base_url>/detect` with an `{"image": <payload>}` body. No retry, no
//! batching. Every failure (connect error, non-2xx status, malformed
//! body) collapses to [`InferenceError`], which deliberately exposes no
//! discriminating detail; the cause is logged at debug level only.

use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

const USER_AGENT: &str = "OVD/0.1.0 (ovd-ds)";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// The one failure kind the inference path reports
#[derive(Debug, Error)]
#[error("inference request failed")]
pub struct InferenceError;

/// Inference service response body
#[derive(Debug, Clone, Deserialize)]
pub struct InferenceResponse {
    #[serde(default)]
    pub detected_objects: Vec<String>,
    #[serde(default)]
    pub message: String,
}

/// Remote inference HTTP client
pub struct InferenceClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl InferenceClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, crate::error::Error> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| crate::error::Error::Config(format!("HTTP client build failed: {}", e)))?;

        Ok(Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Forward an encoded frame payload and return the parsed response.
    pub async fn detect(&self, image_payload: &str) -> Result<InferenceResponse, InferenceError> {
        let url = format!("{}/detect", self.base_url);

        let response = self
            .http_client
            .post(&url)
            .json(&json!({ "image": image_payload }))
            .send()
            .await
            .map_err(|e| {
                debug!("inference request to {} failed: {}", url, e);
                InferenceError
            })?;

        let status = response.status();
        if !status.is_success() {
            debug!("inference service returned {}", status);
            return Err(InferenceError);
        }

        response.json::<InferenceResponse>().await.map_err(|e| {
            debug!("malformed inference response: {}", e);
            InferenceError
        })
    }
}
