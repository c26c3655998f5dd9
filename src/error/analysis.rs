// External analysis error types and constants

use crate::error::ErrorCode;
use std::fmt;
use tracing::warn;

/// Analysis error code constants
///
/// Error code range: 2001-2005
pub struct AnalysisErrorCodes {}

impl AnalysisErrorCodes {
    /// Collaborator answered with a non-success HTTP status
    pub const HTTP_STATUS: i32 = 2001;

    /// Response body missing the generated text
    pub const MALFORMED_RESPONSE: i32 = 2002;

    /// Request never produced a response (DNS, TLS, connection reset)
    pub const TRANSPORT: i32 = 2003;

    /// Analysis requested but no client/API key configured
    pub const NOT_CONFIGURED: i32 = 2004;

    /// Request could not be scheduled (no async runtime, slot dropped)
    pub const NOT_SCHEDULED: i32 = 2005;
}

/// Log an analysis error with structured context
///
/// Analysis failures are recoverable and never affect rep counting, so they
/// are logged as warnings.
pub fn log_analysis_error(err: &AnalysisError, context: &str) {
    warn!(
        "Analysis error in {}: code={}, component=FeedbackGate, message={}",
        context,
        err.code(),
        err.message()
    );
}

/// Failures of the external form-analysis call
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisError {
    /// Non-2xx response
    HttpStatus { status: u16 },

    /// Body could not be parsed or had no content
    MalformedResponse { reason: String },

    /// Network-level failure
    Transport { details: String },

    /// No analysis client configured
    NotConfigured,

    /// The request could not be scheduled or its result was lost
    NotScheduled { reason: String },
}

impl ErrorCode for AnalysisError {
    fn code(&self) -> i32 {
        match self {
            AnalysisError::HttpStatus { .. } => AnalysisErrorCodes::HTTP_STATUS,
            AnalysisError::MalformedResponse { .. } => AnalysisErrorCodes::MALFORMED_RESPONSE,
            AnalysisError::Transport { .. } => AnalysisErrorCodes::TRANSPORT,
            AnalysisError::NotConfigured => AnalysisErrorCodes::NOT_CONFIGURED,
            AnalysisError::NotScheduled { .. } => AnalysisErrorCodes::NOT_SCHEDULED,
        }
    }

    fn message(&self) -> String {
        match self {
            AnalysisError::HttpStatus { status } => {
                format!("API request failed: {}", status)
            }
            AnalysisError::MalformedResponse { reason } => {
                format!("Malformed analysis response: {}", reason)
            }
            AnalysisError::Transport { details } => {
                format!("Analysis request failed: {}", details)
            }
            AnalysisError::NotConfigured => {
                "AI analysis is not configured. Set an API key first.".to_string()
            }
            AnalysisError::NotScheduled { reason } => {
                format!("Analysis request not scheduled: {}", reason)
            }
        }
    }
}

impl fmt::Display for AnalysisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "AnalysisError::{:?} (code {}): {}",
            self,
            self.code(),
            self.message()
        )
    }
}

impl std::error::Error for AnalysisError {}

impl From<serde_json::Error> for AnalysisError {
    fn from(err: serde_json::Error) -> Self {
        AnalysisError::MalformedResponse {
            reason: err.to_string(),
        }
    }
}

impl From<reqwest::Error> for AnalysisError {
    fn from(err: reqwest::Error) -> Self {
        // The request URL never belongs in a user-facing message
        let err = err.without_url();
        match err.status() {
            Some(status) => AnalysisError::HttpStatus {
                status: status.as_u16(),
            },
            None if err.is_decode() => AnalysisError::MalformedResponse {
                reason: err.to_string(),
            },
            None => AnalysisError::Transport {
                details: err.to_string(),
            },
        }
    }
}
