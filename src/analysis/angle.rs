//! Angle Extractor - maps one pose frame to the exercise metric.
//!
//! Pure functions, no state. The metric is a whole number of degrees for
//! angle-based exercises or a 0-100 normalized height for the shoulder press.
//! A metric of `0` means "no signal" and is never a valid reading.

use crate::error::SignalError;
use crate::exercise::ExerciseKind;
use crate::pose::{landmark, Joint, PoseFrame};

/// Interior angle at `b` formed by `a`-`b`-`c`, rounded to whole degrees.
///
/// Returns `0` when either limb vector has zero length.
pub fn joint_angle(a: &Joint, b: &Joint, c: &Joint) -> u32 {
    let ba = (a.x - b.x, a.y - b.y);
    let bc = (c.x - b.x, c.y - b.y);

    let mag_ba = (ba.0 * ba.0 + ba.1 * ba.1).sqrt();
    let mag_bc = (bc.0 * bc.0 + bc.1 * bc.1).sqrt();
    if mag_ba == 0.0 || mag_bc == 0.0 {
        return 0;
    }

    let cos = ((ba.0 * bc.0 + ba.1 * bc.1) / (mag_ba * mag_bc)).clamp(-1.0, 1.0);
    cos.acos().to_degrees().round() as u32
}

/// Normalized vertical distance of the wrist above the shoulder, 0-100.
pub fn lift_height(shoulder: &Joint, wrist: &Joint) -> u32 {
    let height = ((shoulder.y - wrist.y) * 100.0).round();
    height.clamp(0.0, 100.0) as u32
}

fn required(frame: &PoseFrame, index: usize) -> Result<&Joint, SignalError> {
    frame.joint(index).ok_or(SignalError::MissingJoint { index })
}

fn angle_metric(
    frame: &PoseFrame,
    proximal: usize,
    vertex: usize,
    distal: usize,
) -> Result<u32, SignalError> {
    let a = required(frame, proximal)?;
    let b = required(frame, vertex)?;
    let c = required(frame, distal)?;
    match joint_angle(a, b, c) {
        0 => Err(SignalError::DegenerateAngle),
        angle => Ok(angle),
    }
}

/// Compute the metric for `exercise`, explaining why when there is none.
pub fn try_metric(exercise: ExerciseKind, frame: &PoseFrame) -> Result<u32, SignalError> {
    if !frame.has_person() {
        return Err(SignalError::NoPerson);
    }

    match exercise {
        ExerciseKind::Squat => angle_metric(
            frame,
            landmark::RIGHT_HIP,
            landmark::RIGHT_KNEE,
            landmark::RIGHT_ANKLE,
        ),
        ExerciseKind::Pushup | ExerciseKind::BicepCurl => angle_metric(
            frame,
            landmark::RIGHT_SHOULDER,
            landmark::RIGHT_ELBOW,
            landmark::RIGHT_WRIST,
        ),
        ExerciseKind::ShoulderPress => {
            let shoulder = required(frame, landmark::RIGHT_SHOULDER)?;
            let wrist = required(frame, landmark::RIGHT_WRIST)?;
            match lift_height(shoulder, wrist) {
                0 => Err(SignalError::DegenerateAngle),
                height => Ok(height),
            }
        }
    }
}

/// Compute the metric for `exercise`; `0` means no signal.
pub fn compute_metric(exercise: ExerciseKind, frame: &PoseFrame) -> u32 {
    try_metric(exercise, frame).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pose::LANDMARK_COUNT;

    fn joint(x: f64, y: f64) -> Joint {
        Joint::new(x, y, 1.0)
    }

    fn frame_with(points: &[(usize, Joint)]) -> PoseFrame {
        let mut joints = vec![joint(0.0, 0.0); LANDMARK_COUNT];
        for &(index, point) in points {
            joints[index] = point;
        }
        PoseFrame::new(0, joints)
    }

    #[test]
    fn right_angle_is_ninety_degrees() {
        let angle = joint_angle(&joint(0.0, 0.0), &joint(1.0, 0.0), &joint(1.0, 1.0));
        assert_eq!(angle, 90);
    }

    #[test]
    fn straight_limb_is_one_eighty() {
        let angle = joint_angle(&joint(0.5, 0.2), &joint(0.5, 0.5), &joint(0.5, 0.8));
        assert_eq!(angle, 180);
    }

    #[test]
    fn angle_rounds_to_nearest_degree() {
        // 30 degrees between the x-axis and (cos 30.4, sin 30.4)
        let theta = 30.4_f64.to_radians();
        let angle = joint_angle(
            &joint(1.0, 0.0),
            &joint(0.0, 0.0),
            &joint(theta.cos(), theta.sin()),
        );
        assert_eq!(angle, 30);
    }

    #[test]
    fn zero_length_vectors_yield_zero() {
        let b = joint(0.4, 0.4);
        assert_eq!(joint_angle(&b, &b, &joint(0.9, 0.9)), 0);
        assert_eq!(joint_angle(&joint(0.1, 0.1), &b, &b), 0);
    }

    #[test]
    fn squat_uses_right_knee() {
        let frame = frame_with(&[
            (landmark::RIGHT_HIP, joint(0.5, 0.5)),
            (landmark::RIGHT_KNEE, joint(0.5, 0.7)),
            (landmark::RIGHT_ANKLE, joint(0.7, 0.7)),
        ]);
        assert_eq!(compute_metric(ExerciseKind::Squat, &frame), 90);
    }

    #[test]
    fn curl_and_pushup_use_right_elbow() {
        let frame = frame_with(&[
            (landmark::RIGHT_SHOULDER, joint(0.5, 0.3)),
            (landmark::RIGHT_ELBOW, joint(0.5, 0.5)),
            (landmark::RIGHT_WRIST, joint(0.5, 0.7)),
        ]);
        assert_eq!(compute_metric(ExerciseKind::Pushup, &frame), 180);
        assert_eq!(compute_metric(ExerciseKind::BicepCurl, &frame), 180);
    }

    #[test]
    fn shoulder_height_is_clamped() {
        let frame = frame_with(&[
            (landmark::RIGHT_SHOULDER, joint(0.5, 0.5)),
            (landmark::RIGHT_WRIST, joint(0.5, 0.1)),
        ]);
        assert_eq!(compute_metric(ExerciseKind::ShoulderPress, &frame), 40);

        let above_frame = frame_with(&[
            (landmark::RIGHT_SHOULDER, joint(0.5, 1.8)),
            (landmark::RIGHT_WRIST, joint(0.5, 0.1)),
        ]);
        assert_eq!(compute_metric(ExerciseKind::ShoulderPress, &above_frame), 100);

        let below_frame = frame_with(&[
            (landmark::RIGHT_SHOULDER, joint(0.5, 0.3)),
            (landmark::RIGHT_WRIST, joint(0.5, 0.6)),
        ]);
        assert_eq!(try_metric(ExerciseKind::ShoulderPress, &below_frame), Err(SignalError::DegenerateAngle));
    }

    #[test]
    fn missing_joint_is_no_signal() {
        let frame = PoseFrame::new(0, vec![joint(0.5, 0.5); 20]);
        assert_eq!(
            try_metric(ExerciseKind::Squat, &frame),
            Err(SignalError::MissingJoint {
                index: landmark::RIGHT_HIP
            })
        );
        assert_eq!(compute_metric(ExerciseKind::Squat, &frame), 0);
    }

    #[test]
    fn non_finite_joint_counts_as_missing() {
        let frame = frame_with(&[
            (landmark::RIGHT_SHOULDER, joint(0.5, 0.3)),
            (landmark::RIGHT_ELBOW, joint(f64::NAN, 0.5)),
            (landmark::RIGHT_WRIST, joint(0.5, 0.7)),
        ]);
        assert_eq!(
            try_metric(ExerciseKind::BicepCurl, &frame),
            Err(SignalError::MissingJoint {
                index: landmark::RIGHT_ELBOW
            })
        );
    }

    #[test]
    fn empty_frame_has_no_person() {
        assert_eq!(
            try_metric(ExerciseKind::Pushup, &PoseFrame::empty(10)),
            Err(SignalError::NoPerson)
        );
    }

    #[test]
    fn low_visibility_does_not_block_metric() {
        let mut frame = frame_with(&[
            (landmark::RIGHT_HIP, joint(0.5, 0.5)),
            (landmark::RIGHT_KNEE, joint(0.5, 0.7)),
            (landmark::RIGHT_ANKLE, joint(0.7, 0.7)),
        ]);
        frame.joints[landmark::RIGHT_KNEE].visibility = 0.1;
        assert_eq!(compute_metric(ExerciseKind::Squat, &frame), 90);
    }
}
