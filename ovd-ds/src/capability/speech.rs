//! Speech output capability adapter

use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

/// Speech synthesis seam. Failures are reported but never fatal to the
/// session.
#[async_trait]
pub trait SpeechSynth: Send + Sync {
    async fn speak(&self, text: &str) -> Result<()>;
}

/// Speech output that announces via structured logging.
///
/// The service is headless; this adapter is the stand-in for a platform
/// speech engine.
#[derive(Default)]
pub struct LogSpeech;

impl LogSpeech {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl SpeechSynth for LogSpeech {
    async fn speak(&self, text: &str) -> Result<()> {
        info!(speech = text, "Speaking");
        Ok(())
    }
}

/// Test double collecting every spoken utterance
#[derive(Default)]
pub struct RecordingSpeech {
    spoken: Arc<Mutex<Vec<String>>>,
}

impl RecordingSpeech {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn spoken(&self) -> Vec<String> {
        self.spoken.lock().await.clone()
    }

    /// Handle that records into the same transcript, for handing the
    /// engine its own Arc while the test keeps this one.
    pub fn clone_handle(&self) -> Self {
        Self {
            spoken: Arc::clone(&self.spoken),
        }
    }
}

#[async_trait]
impl SpeechSynth for RecordingSpeech {
    async fn speak(&self, text: &str) -> Result<()> {
        self.spoken.lock().await.push(text.to_string());
        Ok(())
    }
}
