//! Remote label source
//!
//! Encodes the sampled frame as a base64 data URL and asks the inference
//! service for labels. Selected by `label_source = "remote"`; the default
//! configuration never touches this path.

use super::inference::InferenceClient;
use super::LabelSource;
use crate::capability::Frame;
use crate::error::Result;
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

pub struct RemoteSource {
    client: InferenceClient,
}

impl RemoteSource {
    pub fn new(client: InferenceClient) -> Self {
        Self { client }
    }

    /// The payload stays opaque to the wire: an encoded blob inside a
    /// data URL envelope, which is the only shape the service consumes.
    pub fn encode_payload(frame: &Frame) -> String {
        format!(
            "data:application/octet-stream;base64,{}",
            STANDARD.encode(&frame.data)
        )
    }
}

#[async_trait]
impl LabelSource for RemoteSource {
    async fn labels(&self, frame: &Frame) -> Result<Vec<String>> {
        let payload = Self::encode_payload(frame);
        let response = self.client.detect(&payload).await?;
        Ok(response.detected_objects)
    }
}
