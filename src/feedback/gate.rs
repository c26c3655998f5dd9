//! Feedback Gate - rate-limited, single-flight AI analysis.
//!
//! At most one request is in flight at a time, and accepted requests are at
//! least `cooldown_ms` apart. The request future runs on the ambient tokio
//! runtime; its result lands in a one-slot channel the owner drains with
//! [`FeedbackGate::poll_completion`] (every tick) or
//! [`FeedbackGate::wait_for_completion`].

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::oneshot;
use tokio::sync::oneshot::error::TryRecvError;

use super::category::FeedbackCategory;
use super::client::AnalysisClient;
use crate::analysis::Phase;
use crate::error::AnalysisError;
use crate::exercise::ExerciseKind;

type Slot = oneshot::Receiver<Result<String, AnalysisError>>;

/// Snapshot of the session sent to the collaborator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub exercise: ExerciseKind,
    pub total_reps: u32,
    pub phase: Phase,
    pub consecutive_reps: u32,
    pub duration_ms: u64,
}

impl SessionSummary {
    pub fn duration_seconds(&self) -> u64 {
        (self.duration_ms + 500) / 1000
    }

    pub fn prompt(&self) -> String {
        format!(
            "As a professional fitness coach, analyze this workout session and provide brief, actionable feedback:\n\n\
             Exercise: {}\n\
             Total Reps: {}\n\
             Current State: {}\n\
             Consecutive Reps: {}\n\
             Workout Duration: {} seconds\n\n\
             Provide 2-3 sentences of encouraging, professional feedback focusing on form and motivation.",
            self.exercise.as_str(),
            self.total_reps,
            self.phase.as_str(),
            self.consecutive_reps,
            self.duration_seconds()
        )
    }
}

/// Why a request was not sent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateRejection {
    NotConfigured,
    InFlight,
    CoolingDown { remaining_ms: u64 },
}

/// Observable gate bookkeeping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedbackGateState {
    pub last_call_ms: Option<u64>,
    pub in_flight: bool,
}

/// Successful analysis, classified
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisReport {
    pub text: String,
    pub category: FeedbackCategory,
}

impl AnalysisReport {
    pub fn from_text(text: String) -> Self {
        let category = FeedbackCategory::classify(&text);
        Self { text, category }
    }

    pub fn spoken(&self) -> &'static str {
        self.category.spoken()
    }
}

pub struct FeedbackGate {
    client: Option<Arc<dyn AnalysisClient>>,
    cooldown_ms: u64,
    last_call_ms: Option<u64>,
    pending: Option<Slot>,
}

impl FeedbackGate {
    pub fn new(client: Option<Arc<dyn AnalysisClient>>, cooldown_ms: u64) -> Self {
        Self {
            client,
            cooldown_ms,
            last_call_ms: None,
            pending: None,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.client.is_some()
    }

    pub fn in_flight(&self) -> bool {
        self.pending.is_some()
    }

    pub fn state(&self) -> FeedbackGateState {
        FeedbackGateState {
            last_call_ms: self.last_call_ms,
            in_flight: self.in_flight(),
        }
    }

    /// Send `summary` for analysis unless in flight or cooling down.
    ///
    /// Acceptance starts the cooldown whatever the eventual outcome.
    pub fn request_analysis(
        &mut self,
        summary: &SessionSummary,
        now_ms: u64,
    ) -> Result<(), GateRejection> {
        let client = self.client.clone().ok_or(GateRejection::NotConfigured)?;
        if self.in_flight() {
            return Err(GateRejection::InFlight);
        }
        if let Some(last) = self.last_call_ms {
            let elapsed = now_ms.saturating_sub(last);
            if elapsed < self.cooldown_ms {
                return Err(GateRejection::CoolingDown {
                    remaining_ms: self.cooldown_ms - elapsed,
                });
            }
        }

        self.last_call_ms = Some(now_ms);
        let (tx, rx) = oneshot::channel();
        self.pending = Some(rx);

        let future = client.generate(summary.prompt());
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(async move {
                    // Receiver may be gone if the session stopped first
                    let _ = tx.send(future.await);
                });
                tracing::info!(
                    "[FeedbackGate] analysis requested at {}ms ({} reps)",
                    now_ms,
                    summary.total_reps
                );
            }
            Err(err) => {
                let _ = tx.send(Err(AnalysisError::NotScheduled {
                    reason: err.to_string(),
                }));
            }
        }
        Ok(())
    }

    /// Non-blocking check for a finished request. Clears in-flight on
    /// completion, success or failure.
    pub fn poll_completion(&mut self) -> Option<Result<AnalysisReport, AnalysisError>> {
        let slot = self.pending.as_mut()?;
        let result = match slot.try_recv() {
            Err(TryRecvError::Empty) => return None,
            Ok(result) => result,
            Err(TryRecvError::Closed) => Err(AnalysisError::NotScheduled {
                reason: "analysis task dropped its result".to_string(),
            }),
        };
        self.pending = None;
        Some(Self::finish(result))
    }

    /// Await the in-flight request, if any
    pub async fn wait_for_completion(&mut self) -> Option<Result<AnalysisReport, AnalysisError>> {
        let slot = self.pending.take()?;
        let result = slot.await.unwrap_or_else(|_| {
            Err(AnalysisError::NotScheduled {
                reason: "analysis task dropped its result".to_string(),
            })
        });
        Some(Self::finish(result))
    }

    fn finish(result: Result<String, AnalysisError>) -> Result<AnalysisReport, AnalysisError> {
        let report = result.map(AnalysisReport::from_text)?;
        tracing::info!("[FeedbackGate] analysis classified as {}", report.category);
        Ok(report)
    }
}
