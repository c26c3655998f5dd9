//! Pose frames as delivered by the external pose-estimation model.
//!
//! The core only relies on stable point indices, normalized `x`/`y` in
//! `[0, 1]` and a per-point `visibility` in `[0, 1]`.

pub mod overlay;

use serde::{Deserialize, Serialize};

/// Number of points in the reference skeleton topology.
pub const LANDMARK_COUNT: usize = 33;

/// Landmark indices consulted by the coach (right side of the reference topology).
pub mod landmark {
    pub const LEFT_SHOULDER: usize = 11;
    pub const RIGHT_SHOULDER: usize = 12;
    pub const LEFT_ELBOW: usize = 13;
    pub const RIGHT_ELBOW: usize = 14;
    pub const LEFT_WRIST: usize = 15;
    pub const RIGHT_WRIST: usize = 16;
    pub const LEFT_HIP: usize = 23;
    pub const RIGHT_HIP: usize = 24;
    pub const LEFT_KNEE: usize = 25;
    pub const RIGHT_KNEE: usize = 26;
    pub const LEFT_ANKLE: usize = 27;
    pub const RIGHT_ANKLE: usize = 28;
}

/// One labeled 2D point in normalized frame coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Joint {
    pub x: f64,
    pub y: f64,
    #[serde(default = "default_visibility")]
    pub visibility: f64,
}

fn default_visibility() -> f64 {
    1.0
}

impl Joint {
    pub fn new(x: f64, y: f64, visibility: f64) -> Self {
        Self { x, y, visibility }
    }

    /// Both coordinates are finite numbers
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    pub fn is_visible(&self, threshold: f64) -> bool {
        self.visibility > threshold
    }
}

/// One timestamped pose snapshot.
///
/// An empty joint list means the model found no person in the frame.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PoseFrame {
    pub timestamp_ms: u64,
    #[serde(default)]
    pub joints: Vec<Joint>,
}

impl PoseFrame {
    pub fn new(timestamp_ms: u64, joints: Vec<Joint>) -> Self {
        Self {
            timestamp_ms,
            joints,
        }
    }

    /// Frame in which no person was detected
    pub fn empty(timestamp_ms: u64) -> Self {
        Self {
            timestamp_ms,
            joints: Vec::new(),
        }
    }

    pub fn has_person(&self) -> bool {
        !self.joints.is_empty()
    }

    /// Joint at `index`, if present with finite coordinates
    pub fn joint(&self, index: usize) -> Option<&Joint> {
        self.joints.get(index).filter(|joint| joint.is_finite())
    }
}
