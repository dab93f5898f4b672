//! Event types for the OVD event system

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Detection session lifecycle states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionState {
    /// No session; camera released, labels empty
    Idle,
    /// Camera permission pending
    Starting,
    /// Tick loop running
    Active,
    /// Teardown in progress
    Stopping,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SessionState::Idle => "idle",
            SessionState::Starting => "starting",
            SessionState::Active => "active",
            SessionState::Stopping => "stopping",
        };
        write!(f, "{}", s)
    }
}

/// OVD event types broadcast to SSE listeners
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum DetectorEvent {
    /// Session lifecycle transition
    SessionStateChanged {
        state: SessionState,
        timestamp: DateTime<Utc>,
    },

    /// One detection tick completed; labels are this tick's full set
    DetectionTick {
        tick: u64,
        labels: Vec<String>,
        timestamp: DateTime<Utc>,
    },

    /// Speech output was invoked with the given text
    SpeechSpoken {
        text: String,
        timestamp: DateTime<Utc>,
    },
}

impl DetectorEvent {
    /// Event name used for the SSE `event:` field
    pub fn event_type(&self) -> &'static str {
        match self {
            DetectorEvent::SessionStateChanged { .. } => "SessionStateChanged",
            DetectorEvent::DetectionTick { .. } => "DetectionTick",
            DetectorEvent::SpeechSpoken { .. } => "SpeechSpoken",
        }
    }
}
