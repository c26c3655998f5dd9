//! Synthetic poses that reproduce a requested metric exactly.

use std::f64::consts::PI;

use crate::exercise::{ExerciseKind, Thresholds};
use crate::pose::{landmark, Joint, PoseFrame, LANDMARK_COUNT};

const LIMB: f64 = 0.2;
const VERTEX: (f64, f64) = (0.5, 0.5);

/// Ms the top position is held before each descent. Longer than the
/// default debounce so every cycle counts.
pub const TOP_HOLD_MS: u64 = 1_200;
const DESCENT_MS: u64 = 400;
const BOTTOM_HOLD_MS: u64 = 400;
const ASCENT_MS: u64 = 400;
pub const CYCLE_MS: u64 = TOP_HOLD_MS + DESCENT_MS + BOTTOM_HOLD_MS + ASCENT_MS;

fn resting_skeleton() -> Vec<Joint> {
    (0..LANDMARK_COUNT)
        .map(|i| Joint::new(0.3 + 0.4 * (i as f64 / LANDMARK_COUNT as f64), 0.5, 1.0))
        .collect()
}

/// A frame whose metric for `exercise` is `metric`. `0` gives a degenerate
/// pose (no signal).
pub fn frame_for_metric(exercise: ExerciseKind, metric: u32, timestamp_ms: u64) -> PoseFrame {
    let mut joints = resting_skeleton();
    match exercise {
        ExerciseKind::Squat => place_angle(
            &mut joints,
            [landmark::RIGHT_HIP, landmark::RIGHT_KNEE, landmark::RIGHT_ANKLE],
            metric,
        ),
        ExerciseKind::Pushup | ExerciseKind::BicepCurl => place_angle(
            &mut joints,
            [
                landmark::RIGHT_SHOULDER,
                landmark::RIGHT_ELBOW,
                landmark::RIGHT_WRIST,
            ],
            metric,
        ),
        ExerciseKind::ShoulderPress => {
            let height = metric.min(100) as f64 / 100.0;
            joints[landmark::RIGHT_SHOULDER] = Joint::new(0.5, 1.0, 1.0);
            joints[landmark::RIGHT_WRIST] = Joint::new(0.5, 1.0 - height, 1.0);
        }
    }
    PoseFrame::new(timestamp_ms, joints)
}

fn place_angle(joints: &mut [Joint], [proximal, vertex, distal]: [usize; 3], degrees: u32) {
    let (vx, vy) = VERTEX;
    joints[vertex] = Joint::new(vx, vy, 1.0);
    joints[proximal] = Joint::new(vx, vy - LIMB, 1.0);
    if degrees == 0 {
        joints[distal] = joints[vertex];
        return;
    }
    let theta = (degrees.min(180) as f64) * PI / 180.0;
    joints[distal] = Joint::new(vx + LIMB * theta.sin(), vy - LIMB * theta.cos(), 1.0);
}

/// Metric at `t_ms` into a repetition cycle: hold top, descend, hold
/// bottom, ascend. Overshoots the thresholds by 5 on both sides.
pub fn cycle_metric(thresholds: Thresholds, t_ms: u64) -> u32 {
    let (min, max) = thresholds.bounds();
    let top = (max + 5) as f64;
    let bottom = min.saturating_sub(5).max(1) as f64;
    let t = t_ms % CYCLE_MS;

    let value = if t < TOP_HOLD_MS {
        top
    } else if t < TOP_HOLD_MS + DESCENT_MS {
        let p = (t - TOP_HOLD_MS) as f64 / DESCENT_MS as f64;
        top + (bottom - top) * p
    } else if t < TOP_HOLD_MS + DESCENT_MS + BOTTOM_HOLD_MS {
        bottom
    } else {
        let p = (t - TOP_HOLD_MS - DESCENT_MS - BOTTOM_HOLD_MS) as f64 / ASCENT_MS as f64;
        bottom + (top - bottom) * p
    };
    value.round() as u32
}

/// Frames for `reps` clean repetitions sampled every `frame_interval_ms`,
/// ending with one extra top hold.
pub fn rep_sequence(
    exercise: ExerciseKind,
    thresholds: Thresholds,
    reps: u32,
    start_ms: u64,
    frame_interval_ms: u64,
) -> Vec<PoseFrame> {
    let span = reps as u64 * CYCLE_MS + TOP_HOLD_MS;
    let step = frame_interval_ms.max(1);
    (0..=span)
        .step_by(step as usize)
        .map(|t| frame_for_metric(exercise, cycle_metric(thresholds, t), start_ms + t))
        .collect()
}
