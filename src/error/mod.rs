// Error types for the rep coach
//
// One error enum per domain (camera transport, external analysis, pose signal,
// configuration), each carrying a stable numeric code so status surfaces can
// key remediation text off the code instead of parsing messages.

mod analysis;
mod camera;
mod config;
mod signal;

pub use analysis::{log_analysis_error, AnalysisError, AnalysisErrorCodes};
pub use camera::{log_camera_error, CameraError, CameraErrorCodes};
pub use config::{log_config_error, ConfigError, ConfigErrorCodes};
pub use signal::{SignalError, SignalErrorCodes};

/// Error codes for structured error reporting
///
/// This trait provides a standard way to get error codes and messages
/// from custom error types, enabling consistent status reporting across
/// the presentation boundary.
pub trait ErrorCode {
    /// Get the numeric error code
    fn code(&self) -> i32;

    /// Get the human-readable error message
    fn message(&self) -> String;
}
