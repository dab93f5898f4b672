//! Detection proxy client
//!
//! A single forward to the external inference service: POST
//! `<base_url>/detect` with the caller's payload wrapped in an
//! `{"image": ...}` envelope. The payload is treated as an opaque JSON
//! value end to end; the response body passes through untouched. No
//! retry, no batching, and every failure collapses to [`ProxyError`],
//! which the HTTP handler turns into the one fixed failure body.

use serde_json::{json, Value};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

const USER_AGENT: &str = "OVD/0.1.0 (ovd-gw)";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// The one failure kind the proxy path reports
#[derive(Debug, Error)]
#[error("error processing image")]
pub struct ProxyError;

/// Forwarding client for the inference service
#[derive(Clone)]
pub struct ProxyClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl ProxyClient {
    pub fn new(base_url: impl Into<String>) -> crate::error::Result<Self> {
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

    /// Forward an image payload; returns the downstream body verbatim.
    pub async fn detect(&self, image: Value) -> Result<Value, ProxyError> {
        let url = format!("{}/detect", self.base_url);

        let response = self
            .http_client
            .post(&url)
            .json(&json!({ "image": image }))
            .send()
            .await
            .map_err(|e| {
                debug!("detect forward to {} failed: {}", url, e);
                ProxyError
            })?;

        let status = response.status();
        if !status.is_success() {
            debug!("inference service returned {}", status);
            return Err(ProxyError);
        }

        response.json::<Value>().await.map_err(|e| {
            debug!("malformed inference response: {}", e);
            ProxyError
        })
    }
}
