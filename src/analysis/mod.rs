//! Per-frame signal analysis: metric extraction and repetition detection.

pub mod angle;
pub mod repetition;

pub use angle::{compute_metric, joint_angle, lift_height, try_metric};
pub use repetition::{Phase, RepEvent, RepState, RepetitionTracker};
