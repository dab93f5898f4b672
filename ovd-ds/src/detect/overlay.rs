//! Overlay rendering
//!
//! The render surface for a tick: one placeholder marker per label at
//! fixed geometry. Markers are decorative stand-ins, not real bounding
//! boxes; there is no detector to produce real ones.

use crate::capability::Frame;
use serde::{Deserialize, Serialize};

/// Marker column stride in pixels
const MARKER_STRIDE_X: i32 = 150;
/// Marker row stride in pixels
const MARKER_STRIDE_Y: i32 = 30;
/// Top-left corner of the first marker
const MARKER_ORIGIN: (i32, i32) = (50, 50);
/// Every marker has the same box size
const MARKER_SIZE: (u32, u32) = (100, 80);

/// One placeholder marker
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Marker {
    pub label: String,
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

/// The rendered surface for one tick
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverlayFrame {
    pub frame_seq: u64,
    pub width: u32,
    pub height: u32,
    pub markers: Vec<Marker>,
}

/// Build the overlay for a frame: marker `i` sits at
/// `(50 + 150*i, 50 + 30*i)` with a 100x80 box.
pub fn render(frame: &Frame, labels: &[String]) -> OverlayFrame {
    let markers = labels
        .iter()
        .enumerate()
        .map(|(index, label)| {
            let index = index as i32;
            Marker {
                label: label.clone(),
                x: MARKER_ORIGIN.0 + MARKER_STRIDE_X * index,
                y: MARKER_ORIGIN.1 + MARKER_STRIDE_Y * index,
                width: MARKER_SIZE.0,
                height: MARKER_SIZE.1,
            }
        })
        .collect();

    OverlayFrame {
        frame_seq: frame.seq,
        width: frame.width,
        height: frame.height,
        markers,
    }
}
