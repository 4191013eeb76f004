use std::collections::HashMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Detector bounding box in normalised frame coordinates (0.0-1.0)
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BoundingBox {
    pub y1: f64,
    pub x1: f64,
    pub y2: f64,
    pub x2: f64,
}

impl BoundingBox {
    pub fn width(&self) -> f64 {
        self.x2 - self.x1
    }
}

/// Per-frame object distances keyed by frame index
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DetectionTable {
    pub frames: HashMap<usize, Vec<f64>>,
}

impl DetectionTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, frame: usize, distance_m: f64) {
        self.frames.entry(frame).or_default().push(distance_m);
    }

    /// Distances estimated for `frame`, in detection order
    pub fn distances_for(&self, frame: usize) -> &[f64] {
        self.frames.get(&frame).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Total number of detections across all frames
    pub fn detection_count(&self) -> usize {
        self.frames.values().map(Vec::len).sum()
    }
}
