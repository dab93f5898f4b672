//! # OVD Detection Session Library (ovd-ds)
//!
//! Session state machine and timer-driven detection loop.
//!
//! **Purpose:** Own the camera capability for the lifetime of a session,
//! run a fixed-period tick that samples a frame, produces a label set
//! (fabricated catalogue or remote inference), renders placeholder overlay
//! markers, and speaks the labels, all exposed over an HTTP/SSE control
//! interface.

pub mod api;
pub mod capability;
pub mod config;
pub mod detect;
pub mod engine;
pub mod error;
pub mod state;

pub use engine::DetectionEngine;
pub use error::{Error, Result};
pub use state::SharedState;
