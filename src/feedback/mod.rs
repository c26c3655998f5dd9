//! AI form analysis: the external client and the gate that rate-limits it.

pub mod category;
pub mod client;
pub mod gate;

pub use category::FeedbackCategory;
pub use client::{extract_text, AnalysisClient, GeminiClient};
pub use gate::{AnalysisReport, FeedbackGate, FeedbackGateState, GateRejection, SessionSummary};
