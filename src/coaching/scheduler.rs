//! Coaching Scheduler - time-gated generic tips.
//!
//! A tip fires when more than `tip_interval_ms + next_tip_delay_ms` has
//! elapsed since the previous tip. The jitter is redrawn from the injected
//! RNG after every firing so consecutive tips do not land on a fixed beat.

use rand::Rng;

use crate::config::CoachingConfig;
use crate::exercise::{messages, ExerciseKind};

/// Scheduler bookkeeping, mutated only by [`CoachingScheduler`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoachingClock {
    pub last_tip_ms: u64,
    pub next_tip_delay_ms: u64,
}

#[derive(Debug, Clone)]
pub struct CoachingScheduler {
    clock: CoachingClock,
    tip_interval_ms: u64,
    tip_jitter_ms: u64,
}

impl CoachingScheduler {
    /// Start counting from `now_ms`; the first tip comes one interval later.
    pub fn new<R: Rng>(config: &CoachingConfig, now_ms: u64, rng: &mut R) -> Self {
        let mut scheduler = Self {
            clock: CoachingClock {
                last_tip_ms: now_ms,
                next_tip_delay_ms: 0,
            },
            tip_interval_ms: config.tip_interval_ms,
            tip_jitter_ms: config.tip_jitter_ms,
        };
        scheduler.clock.next_tip_delay_ms = scheduler.draw_delay(rng);
        scheduler
    }

    pub fn clock(&self) -> CoachingClock {
        self.clock
    }

    fn draw_delay<R: Rng>(&self, rng: &mut R) -> u64 {
        if self.tip_jitter_ms == 0 {
            0
        } else {
            rng.gen_range(0..self.tip_jitter_ms)
        }
    }

    /// Current firing threshold in milliseconds since the last tip
    pub fn threshold_ms(&self) -> u64 {
        self.tip_interval_ms + self.clock.next_tip_delay_ms
    }

    /// Called once per valid-metric frame. Returns the tip to speak, if due.
    pub fn poll<R: Rng>(
        &mut self,
        exercise: ExerciseKind,
        now_ms: u64,
        rng: &mut R,
    ) -> Option<&'static str> {
        let elapsed = now_ms.saturating_sub(self.clock.last_tip_ms);
        if elapsed <= self.threshold_ms() {
            return None;
        }

        let tip = messages::pick_tip(exercise, rng)?;
        self.clock.last_tip_ms = now_ms;
        self.clock.next_tip_delay_ms = self.draw_delay(rng);
        tracing::debug!(
            "[CoachingScheduler] tip after {}ms, next threshold {}ms",
            elapsed,
            self.threshold_ms()
        );
        Some(tip)
    }
}
