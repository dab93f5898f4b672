//! Detection engine
//!
//! Owns the session lifecycle: Idle -> Starting -> Active -> Stopping ->
//! Idle. While Active, a cancellable periodic task samples the camera,
//! produces a label set, renders the overlay, and speaks non-empty
//! results. The camera stream is exclusively owned here and released on
//! every exit path.

use crate::capability::{Camera, CameraStream, SpeechSynth};
use crate::config::Config;
use crate::detect::{overlay, LabelSource};
use crate::error::{Error, Result};
use crate::state::{DetectorEvent, SessionState, SharedState};
use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

pub struct DetectionEngine {
    inner: Arc<EngineInner>,
}

struct EngineInner {
    shared: Arc<SharedState>,
    camera: Arc<dyn Camera>,
    speech: Arc<dyn SpeechSynth>,
    source: Arc<dyn LabelSource>,

    /// The acquired stream; Some exactly while a session holds the camera
    stream: Mutex<Option<Box<dyn CameraStream>>>,

    /// Re-entrancy guard: a tick that would overlap an in-flight one is
    /// dropped, not queued
    tick_gate: Mutex<()>,

    /// Handle for the running tick task
    cancel: Mutex<Option<CancellationToken>>,

    tick_period: Duration,
    frame_width: u32,
    frame_height: u32,
}

impl DetectionEngine {
    pub fn new(
        shared: Arc<SharedState>,
        camera: Arc<dyn Camera>,
        speech: Arc<dyn SpeechSynth>,
        source: Arc<dyn LabelSource>,
        config: &Config,
    ) -> Self {
        Self {
            inner: Arc::new(EngineInner {
                shared,
                camera,
                speech,
                source,
                stream: Mutex::new(None),
                tick_gate: Mutex::new(()),
                cancel: Mutex::new(None),
                tick_period: config.tick_interval(),
                frame_width: config.frame_width,
                frame_height: config.frame_height,
            }),
        }
    }

    pub fn shared(&self) -> &Arc<SharedState> {
        &self.inner.shared
    }

    /// Begin a detection session.
    ///
    /// Acquires the camera; on denial the session returns to Idle with an
    /// empty label set and no tick task is spawned.
    pub async fn start(&self) -> Result<()> {
        let inner = &self.inner;

        let current = inner.shared.session_state().await;
        if current != SessionState::Idle {
            return Err(Error::InvalidState(format!(
                "cannot start a session from state '{}'",
                current
            )));
        }

        inner.shared.transition(SessionState::Starting).await;

        let stream = match inner
            .camera
            .acquire(inner.frame_width, inner.frame_height)
            .await
        {
            Ok(stream) => stream,
            Err(e) => {
                warn!("Camera acquisition failed: {}", e);
                inner.shared.transition(SessionState::Idle).await;
                return Err(e);
            }
        };
        *inner.stream.lock().await = Some(stream);
        // Past this point every error path must give the camera back.

        let token = CancellationToken::new();
        *inner.cancel.lock().await = Some(token.clone());
        inner.shared.transition(SessionState::Active).await;
        tokio::spawn(tick_loop(Arc::clone(inner), token));

        info!(
            "Detection session started ({} ms tick period)",
            inner.tick_period.as_millis()
        );
        Ok(())
    }

    /// End the session: cancel the tick task, release the camera, clear
    /// labels. Idempotent: stopping an Idle session is a no-op, and the
    /// camera is released exactly once however many times this runs.
    pub async fn stop(&self) -> Result<()> {
        let inner = &self.inner;

        if inner.shared.session_state().await == SessionState::Idle {
            debug!("Stop requested while idle; nothing to do");
            return Ok(());
        }

        inner.shared.transition(SessionState::Stopping).await;

        // An in-flight tick body is never interrupted; wait it out, then
        // hold the gate so no late tick slips in during teardown.
        let _gate = inner.tick_gate.lock().await;

        // Prevents the next scheduled tick.
        if let Some(token) = inner.cancel.lock().await.take() {
            token.cancel();
        }

        if let Some(mut stream) = inner.stream.lock().await.take() {
            stream.release();
        }

        inner.shared.set_labels(Vec::new()).await;
        inner.shared.set_overlay(None).await;
        inner.shared.transition(SessionState::Idle).await;

        info!("Detection session stopped");
        Ok(())
    }

    /// Run a single tick immediately (also the manual trigger behind the
    /// control API). Only does work while Active.
    pub async fn tick_once(&self) {
        self.inner.tick_once().await;
    }
}

/// Periodic driver for the detection loop
async fn tick_loop(inner: Arc<EngineInner>, cancel: CancellationToken) {
    let mut interval = tokio::time::interval(inner.tick_period);
    // An interval's first tick completes immediately; consume it so the
    // first detection lands one full period after start.
    interval.tick().await;

    info!("Tick task started ({} ms period)", inner.tick_period.as_millis());

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                debug!("Tick task cancelled");
                break;
            }
            _ = interval.tick() => {
                inner.tick_once().await;
            }
        }
    }
}

impl EngineInner {
    async fn tick_once(&self) {
        // Ticks are synchronous and short today; the guard matters the day
        // tick work grows awaits.
        let _gate = match self.tick_gate.try_lock() {
            Ok(gate) => gate,
            Err(_) => {
                debug!("Tick overlapped an in-flight tick; skipping");
                return;
            }
        };

        if self.shared.session_state().await != SessionState::Active {
            return;
        }

        let frame = {
            let mut stream = self.stream.lock().await;
            let Some(stream) = stream.as_mut() else {
                return;
            };
            match stream.frame() {
                Ok(frame) => frame,
                Err(e) => {
                    warn!("Frame sampling failed: {}", e);
                    return;
                }
            }
        };

        let labels = match self.source.labels(&frame).await {
            Ok(labels) => labels,
            Err(e) => {
                // The next tick retries naturally; this one reports nothing.
                warn!("Label production failed: {}", e);
                Vec::new()
            }
        };

        let rendered = overlay::render(&frame, &labels);
        self.shared.set_labels(labels.clone()).await;
        self.shared.set_overlay(Some(rendered)).await;

        let tick = self.shared.bump_ticks();
        self.shared.broadcast(DetectorEvent::DetectionTick {
            tick,
            labels: labels.clone(),
            timestamp: Utc::now(),
        });
        debug!(tick, count = labels.len(), "Detection tick complete");

        if !labels.is_empty() {
            let text = format!("Detected {}", labels.join(", "));
            match self.speech.speak(&text).await {
                Ok(()) => {
                    self.shared.broadcast(DetectorEvent::SpeechSpoken {
                        text,
                        timestamp: Utc::now(),
                    });
                }
                Err(e) => warn!("Speech output failed: {}", e),
            }
        }
    }
}
