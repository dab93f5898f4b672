//! Capability adapters
//!
//! Thin wrappers around the two external capabilities the session consumes:
//! camera stream acquisition and speech output. Each is independently
//! failable and injected into the engine as a trait object.

pub mod camera;
pub mod speech;

pub use camera::{Camera, CameraStream, Frame, TestPatternCamera};
pub use speech::{LogSpeech, RecordingSpeech, SpeechSynth};
