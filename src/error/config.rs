// Configuration validation errors

use crate::error::ErrorCode;
use std::fmt;

/// Config error code constants
///
/// Error code range: 4001-4002
pub struct ConfigErrorCodes {}

impl ConfigErrorCodes {
    /// Threshold pair violates min < max
    pub const INVALID_THRESHOLDS: i32 = 4001;

    /// A scalar parameter is out of range
    pub const INVALID_PARAMETER: i32 = 4002;
}

/// Log a configuration error with structured context
pub fn log_config_error(err: &ConfigError, context: &str) {
    log::warn!(
        "Config error in {}: code={}, component=AppConfig, message={}",
        context,
        err.code(),
        err.message()
    );
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// `min >= max` for an exercise threshold pair
    InvalidThresholds {
        exercise: String,
        min: u32,
        max: u32,
    },

    /// Scalar parameter outside its allowed range
    InvalidParameter { name: &'static str, reason: String },
}

impl ErrorCode for ConfigError {
    fn code(&self) -> i32 {
        match self {
            ConfigError::InvalidThresholds { .. } => ConfigErrorCodes::INVALID_THRESHOLDS,
            ConfigError::InvalidParameter { .. } => ConfigErrorCodes::INVALID_PARAMETER,
        }
    }

    fn message(&self) -> String {
        match self {
            ConfigError::InvalidThresholds { exercise, min, max } => format!(
                "Thresholds for {} must satisfy min < max (got {} >= {})",
                exercise, min, max
            ),
            ConfigError::InvalidParameter { name, reason } => {
                format!("Invalid parameter {}: {}", name, reason)
            }
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ConfigError::{:?} (code {}): {}",
            self,
            self.code(),
            self.message()
        )
    }
}

impl std::error::Error for ConfigError {}
