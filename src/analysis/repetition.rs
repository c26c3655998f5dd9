//! Repetition State Machine - turns the per-frame metric into rep events.
//!
//! Phases follow one repetition cycle: `Top -> Bottom -> Top` for squats and
//! push-ups, `Top -> Contracted -> Top` for bicep curls. Returning to `Top`
//! completes a repetition. Two guards keep jitter from producing false reps:
//!
//! - **Debounce**: no transition of any kind while fewer than `debounce_ms`
//!   have elapsed since the last completed repetition.
//! - **Hysteresis**: a transition needs the metric strictly below `min` (to
//!   descend) or strictly above `max` (to complete); values in between never
//!   move the phase.
//!
//! Height-based exercises (shoulder press) have no repetition rule and only
//! update `last_metric`.

use serde::{Deserialize, Serialize};

use crate::exercise::{ExerciseKind, Thresholds};

/// Position within one repetition cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Top,
    Bottom,
    Contracted,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Top => "top",
            Phase::Bottom => "bottom",
            Phase::Contracted => "contracted",
        }
    }
}

/// Mutable per-session repetition state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepState {
    pub rep_count: u32,
    pub phase: Phase,
    pub last_metric: u32,
    pub last_rep_timestamp_ms: u64,
    pub consecutive_reps: u32,
    pub session_start_ms: u64,
}

impl RepState {
    pub fn new(session_start_ms: u64) -> Self {
        Self {
            rep_count: 0,
            phase: Phase::Top,
            last_metric: 0,
            last_rep_timestamp_ms: 0,
            consecutive_reps: 0,
            session_start_ms,
        }
    }
}

/// Outcome of feeding one metric sample
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepEvent {
    /// Entered the lowered/contracted phase
    PhaseChanged { phase: Phase, metric: u32 },
    /// Returned to `Top`, completing repetition number `rep_count`
    RepCompleted { rep_count: u32, timestamp_ms: u64 },
}

/// Drives [`RepState`] from metric samples
#[derive(Debug, Clone)]
pub struct RepetitionTracker {
    state: RepState,
    debounce_ms: u64,
}

impl RepetitionTracker {
    pub const DEFAULT_DEBOUNCE_MS: u64 = 1000;

    pub fn new(session_start_ms: u64, debounce_ms: u64) -> Self {
        Self {
            state: RepState::new(session_start_ms),
            debounce_ms,
        }
    }

    pub fn state(&self) -> &RepState {
        &self.state
    }

    pub fn rep_count(&self) -> u32 {
        self.state.rep_count
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    /// Reset counting state. Idempotent; keeps the session start time.
    pub fn reset(&mut self) {
        self.state.rep_count = 0;
        self.state.phase = Phase::Top;
        self.state.last_rep_timestamp_ms = 0;
        self.state.consecutive_reps = 0;
    }

    /// Feed one metric sample taken at `now_ms`.
    ///
    /// A `metric` of `0` is "no signal" and leaves the state untouched.
    pub fn update(
        &mut self,
        exercise: ExerciseKind,
        thresholds: Thresholds,
        metric: u32,
        now_ms: u64,
    ) -> Option<RepEvent> {
        if metric == 0 {
            return None;
        }
        self.state.last_metric = metric;

        if exercise.is_height_based() {
            return None;
        }

        let since_last_rep = now_ms.saturating_sub(self.state.last_rep_timestamp_ms);
        if since_last_rep < self.debounce_ms {
            return None;
        }

        let (min, max) = thresholds.bounds();
        let lowered = match exercise {
            ExerciseKind::BicepCurl => Phase::Contracted,
            _ => Phase::Bottom,
        };

        match self.state.phase {
            Phase::Top if metric < min => {
                self.state.phase = lowered;
                tracing::debug!(
                    "[RepTracker] {} entered {} at metric {}",
                    exercise,
                    lowered.as_str(),
                    metric
                );
                Some(RepEvent::PhaseChanged {
                    phase: lowered,
                    metric,
                })
            }
            phase if phase == lowered && metric > max => {
                self.state.rep_count += 1;
                self.state.phase = Phase::Top;
                self.state.last_rep_timestamp_ms = now_ms;
                self.state.consecutive_reps += 1;
                tracing::info!(
                    "[RepTracker] {} rep {} completed at {}ms",
                    exercise,
                    self.state.rep_count,
                    now_ms
                );
                Some(RepEvent::RepCompleted {
                    rep_count: self.state.rep_count,
                    timestamp_ms: now_ms,
                })
            }
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "repetition_tests.rs"]
mod tests;
