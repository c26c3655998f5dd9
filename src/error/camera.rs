// Camera transport error types and constants

use crate::error::ErrorCode;
use std::fmt;
use tracing::error;

/// Camera error code constants
///
/// Error code range: 1001-1003
pub struct CameraErrorCodes {}

impl CameraErrorCodes {
    /// User or platform refused camera access
    pub const PERMISSION_DENIED: i32 = 1001;

    /// No capture device present
    pub const NOT_FOUND: i32 = 1002;

    /// Any other acquisition failure reported by the platform
    pub const ACQUISITION_FAILED: i32 = 1003;
}

/// Log a camera error with structured context
///
/// Camera failures are the only errors that end a session, so they are
/// always logged at error level.
pub fn log_camera_error(err: &CameraError, context: &str) {
    error!(
        "Camera error in {}: code={}, component=CameraLease, message={}",
        context,
        err.code(),
        err.message()
    );
}

/// Camera acquisition failures
///
/// These are fatal to the session: the user must fix permissions or
/// hardware before a new session can start.
#[derive(Debug, Clone, PartialEq)]
pub enum CameraError {
    /// Camera permission denied
    PermissionDenied,

    /// No camera device available
    NotFound,

    /// Platform reported another failure
    AcquisitionFailed { details: String },
}

impl CameraError {
    /// Remediation text shown to the user, keyed by subtype
    pub fn remediation(&self) -> String {
        let prefix = "Camera access denied.";
        match self {
            CameraError::PermissionDenied => {
                format!("{} Please allow camera permissions in your browser.", prefix)
            }
            CameraError::NotFound => format!("{} No camera found on your device.", prefix),
            CameraError::AcquisitionFailed { details } => {
                format!("{} Error: {}", prefix, details)
            }
        }
    }
}

impl ErrorCode for CameraError {
    fn code(&self) -> i32 {
        match self {
            CameraError::PermissionDenied => CameraErrorCodes::PERMISSION_DENIED,
            CameraError::NotFound => CameraErrorCodes::NOT_FOUND,
            CameraError::AcquisitionFailed { .. } => CameraErrorCodes::ACQUISITION_FAILED,
        }
    }

    fn message(&self) -> String {
        match self {
            CameraError::PermissionDenied => "Camera permission denied".to_string(),
            CameraError::NotFound => "No camera device found".to_string(),
            CameraError::AcquisitionFailed { details } => {
                format!("Failed to acquire camera: {}", details)
            }
        }
    }
}

impl fmt::Display for CameraError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CameraError::{:?} (code {}): {}",
            self,
            self.code(),
            self.message()
        )
    }
}

impl std::error::Error for CameraError {}

impl From<std::io::Error> for CameraError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::PermissionDenied => CameraError::PermissionDenied,
            std::io::ErrorKind::NotFound => CameraError::NotFound,
            _ => CameraError::AcquisitionFailed {
                details: err.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camera_error_codes() {
        assert_eq!(
            CameraError::PermissionDenied.code(),
            CameraErrorCodes::PERMISSION_DENIED
        );
        assert_eq!(CameraError::NotFound.code(), CameraErrorCodes::NOT_FOUND);
        assert_eq!(
            CameraError::AcquisitionFailed {
                details: "busy".to_string()
            }
            .code(),
            1003
        );
    }

    #[test]
    fn test_remediation_is_keyed_by_subtype() {
        assert_eq!(
            CameraError::PermissionDenied.remediation(),
            "Camera access denied. Please allow camera permissions in your browser."
        );
        assert_eq!(
            CameraError::NotFound.remediation(),
            "Camera access denied. No camera found on your device."
        );
        let err = CameraError::AcquisitionFailed {
            details: "device busy".to_string(),
        };
        assert_eq!(err.remediation(), "Camera access denied. Error: device busy");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "nope");
        assert_eq!(CameraError::from(io_err), CameraError::PermissionDenied);

        let io_err = std::io::Error::new(std::io::ErrorKind::Other, "usb reset");
        match CameraError::from(io_err) {
            CameraError::AcquisitionFailed { details } => assert!(details.contains("usb reset")),
            other => panic!("Expected AcquisitionFailed, got {:?}", other),
        }
    }

    #[test]
    fn test_camera_error_display() {
        let display = format!("{}", CameraError::NotFound);
        assert!(display.contains("CameraError"));
        assert!(display.contains("1002"));
    }
}
