//! Shared session state
//!
//! Thread-safe state shared between the detection engine, the tick task
//! and the HTTP handlers. Uses RwLock for concurrent read access with
//! rare writes; the tick task is the only writer of labels.

use crate::detect::overlay::OverlayFrame;
use chrono::Utc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::{broadcast, RwLock};

pub use ovd_common::events::{DetectorEvent, SessionState};

/// Shared state accessible by all components
pub struct SharedState {
    /// Current session lifecycle state
    session_state: RwLock<SessionState>,

    /// Most recent tick's label set (empty outside an active session)
    labels: RwLock<Vec<String>>,

    /// Most recent tick's overlay render (None outside an active session)
    overlay: RwLock<Option<OverlayFrame>>,

    /// Event broadcaster for SSE listeners
    event_tx: broadcast::Sender<DetectorEvent>,

    /// Total ticks executed since startup
    ticks_total: AtomicU64,
}

impl SharedState {
    pub fn new() -> Self {
        let (event_tx, _) = broadcast::channel(100); // Buffer up to 100 events
        Self {
            session_state: RwLock::new(SessionState::Idle),
            labels: RwLock::new(Vec::new()),
            overlay: RwLock::new(None),
            event_tx,
            ticks_total: AtomicU64::new(0),
        }
    }

    pub async fn session_state(&self) -> SessionState {
        *self.session_state.read().await
    }

    /// Set the session state and broadcast the transition
    pub async fn transition(&self, state: SessionState) {
        *self.session_state.write().await = state;
        self.broadcast(DetectorEvent::SessionStateChanged {
            state,
            timestamp: Utc::now(),
        });
    }

    pub async fn labels(&self) -> Vec<String> {
        self.labels.read().await.clone()
    }

    pub async fn set_labels(&self, labels: Vec<String>) {
        *self.labels.write().await = labels;
    }

    pub async fn overlay(&self) -> Option<OverlayFrame> {
        self.overlay.read().await.clone()
    }

    pub async fn set_overlay(&self, overlay: Option<OverlayFrame>) {
        *self.overlay.write().await = overlay;
    }

    /// Broadcast an event to all SSE listeners (no receivers is OK)
    pub fn broadcast(&self, event: DetectorEvent) {
        let _ = self.event_tx.send(event);
    }

    /// Subscribe to the event stream for SSE
    pub fn subscribe(&self) -> broadcast::Receiver<DetectorEvent> {
        self.event_tx.subscribe()
    }

    /// Record one completed tick; returns the new total
    pub fn bump_ticks(&self) -> u64 {
        self.ticks_total.fetch_add(1, Ordering::Relaxed) + 1
    }

    pub fn ticks_total(&self) -> u64 {
        self.ticks_total.load(Ordering::Relaxed)
    }
}

impl Default for SharedState {
    fn default() -> Self {
        Self::new()
    }
}
