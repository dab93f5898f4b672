//! Label production
//!
//! Two interchangeable strategies produce each tick's label set: the
//! fabricated catalogue (default) and the remote inference service. They
//! are selected by configuration, never merged.

pub mod catalogue;
pub mod inference;
pub mod overlay;
pub mod remote;

use crate::capability::Frame;
use crate::error::Result;
use async_trait::async_trait;

pub use catalogue::CatalogueSource;
pub use inference::{InferenceClient, InferenceError, InferenceResponse};
pub use remote::RemoteSource;

/// A producer of per-tick label sets
#[async_trait]
pub trait LabelSource: Send + Sync {
    async fn labels(&self, frame: &Frame) -> Result<Vec<String>>;
}
