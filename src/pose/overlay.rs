// Skeleton overlay geometry handed to the renderer.
//
// Only joints above the visibility threshold are drawn; this never affects
// the metric computation.

use serde::{Deserialize, Serialize};

use super::{landmark, Joint, PoseFrame};

/// Bones drawn between landmark pairs (arms, torso, legs)
pub const CONNECTIONS: [(usize, usize); 12] = [
    (landmark::LEFT_SHOULDER, landmark::RIGHT_SHOULDER),
    (landmark::LEFT_SHOULDER, landmark::LEFT_ELBOW),
    (landmark::LEFT_ELBOW, landmark::LEFT_WRIST),
    (landmark::RIGHT_SHOULDER, landmark::RIGHT_ELBOW),
    (landmark::RIGHT_ELBOW, landmark::RIGHT_WRIST),
    (landmark::LEFT_SHOULDER, landmark::LEFT_HIP),
    (landmark::RIGHT_SHOULDER, landmark::RIGHT_HIP),
    (landmark::LEFT_HIP, landmark::RIGHT_HIP),
    (landmark::LEFT_HIP, landmark::LEFT_KNEE),
    (landmark::RIGHT_HIP, landmark::RIGHT_KNEE),
    (landmark::LEFT_KNEE, landmark::LEFT_ANKLE),
    (landmark::RIGHT_KNEE, landmark::RIGHT_ANKLE),
];

/// Key points drawn as dots
pub const KEY_POINTS: [usize; 12] = [
    landmark::LEFT_SHOULDER,
    landmark::RIGHT_SHOULDER,
    landmark::LEFT_ELBOW,
    landmark::RIGHT_ELBOW,
    landmark::LEFT_WRIST,
    landmark::RIGHT_WRIST,
    landmark::LEFT_HIP,
    landmark::RIGHT_HIP,
    landmark::LEFT_KNEE,
    landmark::RIGHT_KNEE,
    landmark::LEFT_ANKLE,
    landmark::RIGHT_ANKLE,
];

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OverlayPoint {
    pub index: usize,
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OverlaySegment {
    pub from: OverlayPoint,
    pub to: OverlayPoint,
}

/// Visible skeleton for one frame
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SkeletonOverlay {
    pub points: Vec<OverlayPoint>,
    pub segments: Vec<OverlaySegment>,
}

impl SkeletonOverlay {
    pub fn from_frame(frame: &PoseFrame, visibility_threshold: f64) -> Self {
        let visible = |index: usize| -> Option<OverlayPoint> {
            frame
                .joint(index)
                .filter(|joint| joint.is_visible(visibility_threshold))
                .map(|joint: &Joint| OverlayPoint {
                    index,
                    x: joint.x,
                    y: joint.y,
                })
        };

        let points = KEY_POINTS.iter().filter_map(|&index| visible(index)).collect();
        let segments = CONNECTIONS
            .iter()
            .filter_map(|&(a, b)| Some(OverlaySegment {
                from: visible(a)?,
                to: visible(b)?,
            }))
            .collect();

        Self { points, segments }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
