//! Camera capability adapter
//!
//! Acquisition is the failable step (permission denial); once acquired,
//! the stream is exclusively owned by the session and must be released on
//! every exit path.

use crate::error::{Error, Result};
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use tracing::info;

/// One sampled camera frame. The pixel payload is opaque to everything
/// downstream of the adapter.
#[derive(Debug, Clone)]
pub struct Frame {
    pub seq: u64,
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

/// Camera stream acquisition
#[async_trait]
pub trait Camera: Send + Sync {
    /// Request a stream at the given dimensions. Failure models the
    /// platform denying camera access.
    async fn acquire(&self, width: u32, height: u32) -> Result<Box<dyn CameraStream>>;
}

/// An acquired, exclusively-owned camera stream
pub trait CameraStream: Send {
    /// Sample the current frame (synchronous, cheap)
    fn frame(&mut self) -> Result<Frame>;

    /// Give the device back. Callers arrange to do this exactly once.
    fn release(&mut self);
}

/// Synthetic camera producing a counting test pattern.
///
/// There is no real capture device behind this service; this adapter is
/// the demo stand-in, and its denial switch drives permission-failure
/// paths in tests.
pub struct TestPatternCamera {
    deny: AtomicBool,
    releases: Arc<AtomicUsize>,
}

impl TestPatternCamera {
    pub fn new() -> Self {
        Self {
            deny: AtomicBool::new(false),
            releases: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Camera that refuses every acquisition
    pub fn denied() -> Self {
        let camera = Self::new();
        camera.deny.store(true, Ordering::Relaxed);
        camera
    }

    /// How many times streams from this camera have been released
    pub fn release_count(&self) -> usize {
        self.releases.load(Ordering::Relaxed)
    }
}

impl Default for TestPatternCamera {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Camera for TestPatternCamera {
    async fn acquire(&self, width: u32, height: u32) -> Result<Box<dyn CameraStream>> {
        if self.deny.load(Ordering::Relaxed) {
            return Err(Error::Camera("camera access denied".to_string()));
        }

        info!("Camera stream acquired ({}x{})", width, height);
        Ok(Box::new(TestPatternStream {
            seq: 0,
            width,
            height,
            released: false,
            releases: Arc::clone(&self.releases),
        }))
    }
}

struct TestPatternStream {
    seq: u64,
    width: u32,
    height: u32,
    released: bool,
    releases: Arc<AtomicUsize>,
}

impl CameraStream for TestPatternStream {
    fn frame(&mut self) -> Result<Frame> {
        if self.released {
            return Err(Error::Camera("stream already released".to_string()));
        }

        let seq = self.seq;
        self.seq += 1;
        // A tiny gradient keyed to the sequence number; enough to make
        // every frame's payload distinct.
        let data = (0..16u8).map(|i| i.wrapping_add(seq as u8)).collect();

        Ok(Frame {
            seq,
            width: self.width,
            height: self.height,
            data,
        })
    }

    fn release(&mut self) {
        if !self.released {
            self.released = true;
            self.releases.fetch_add(1, Ordering::Relaxed);
            info!("Camera stream released");
        }
    }
}
