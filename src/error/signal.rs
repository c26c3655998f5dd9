// Pose signal availability errors

use crate::error::ErrorCode;
use std::fmt;

/// Signal error code constants
///
/// Error code range: 3001-3003
pub struct SignalErrorCodes {}

impl SignalErrorCodes {
    /// No person detected in the frame
    pub const NO_PERSON: i32 = 3001;

    /// A joint required by the current exercise is absent or non-finite
    pub const MISSING_JOINT: i32 = 3002;

    /// Joints present but the angle is undefined (zero-length limb vector)
    pub const DEGENERATE_ANGLE: i32 = 3003;
}

/// Reasons a frame yields no usable metric
///
/// Always recoverable: the frame is skipped for rep and coaching logic and
/// the user is asked to move into frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalError {
    NoPerson,
    MissingJoint { index: usize },
    DegenerateAngle,
}

impl ErrorCode for SignalError {
    fn code(&self) -> i32 {
        match self {
            SignalError::NoPerson => SignalErrorCodes::NO_PERSON,
            SignalError::MissingJoint { .. } => SignalErrorCodes::MISSING_JOINT,
            SignalError::DegenerateAngle => SignalErrorCodes::DEGENERATE_ANGLE,
        }
    }

    fn message(&self) -> String {
        match self {
            SignalError::NoPerson => "No person detected in frame".to_string(),
            SignalError::MissingJoint { index } => format!("Required joint {} missing", index),
            SignalError::DegenerateAngle => "Joint angle is undefined".to_string(),
        }
    }
}

impl fmt::Display for SignalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SignalError::{:?} (code {}): {}",
            self,
            self.code(),
            self.message()
        )
    }
}

impl std::error::Error for SignalError {}
