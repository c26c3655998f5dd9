//! Session Orchestrator - one workout, from camera acquisition to stop.
//!
//! `TrainerSession` owns every piece of per-session state (rep tracker,
//! coaching clock, feedback gate, speech channel, camera lease) and is
//! driven by the caller one frame at a time. Everything observable leaves
//! through the [`EventBus`].

pub mod events;

use std::sync::Arc;

use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::analysis::{compute_metric, RepEvent, RepState, RepetitionTracker};
use crate::camera::{CameraLease, CameraSource};
use crate::coaching::{CoachingScheduler, SpeechChannel, SpeechOutcome, SpeechSynthesizer};
use crate::config::AppConfig;
use crate::error::{log_analysis_error, AnalysisError, CameraError, ErrorCode};
use crate::exercise::{messages, ExerciseKind};
use crate::feedback::{AnalysisClient, AnalysisReport, FeedbackGate, FeedbackGateState, SessionSummary};
use crate::pose::overlay::SkeletonOverlay;
use crate::pose::PoseFrame;

pub use events::{EventBus, FrameUpdate, SessionEvent, Status, StatusLevel};

pub const CAMERA_READY: &str = "AI COACH READY - BEGIN WORKOUT!";
pub const CAMERA_STOPPED: &str = "WORKOUT COMPLETE";
pub const TRACKING_ACTIVE: &str = "BODY TRACKING ACTIVE - AI COACHING";
pub const TRACKING_LOST: &str = "MOVE INTO FRAME FOR AI COACHING";
pub const TRACKING_DONE: &str = "Great session! Ready for next workout";
pub const STEP_INTO_VIEW: &str = "Step into camera view to begin workout";

/// User choices made before starting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionOptions {
    pub exercise: ExerciseKind,
    pub voice_enabled: bool,
    pub analysis_enabled: bool,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            exercise: ExerciseKind::Squat,
            voice_enabled: true,
            analysis_enabled: false,
        }
    }
}

/// External collaborators injected into a session
pub struct SessionDeps {
    pub speech: Box<dyn SpeechSynthesizer>,
    pub client: Option<Arc<dyn AnalysisClient>>,
    pub rng: StdRng,
    pub events: EventBus,
}

/// Summary returned by [`TrainerSession::stop`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionReport {
    pub exercise: ExerciseKind,
    pub total_reps: u32,
    pub duration_ms: u64,
}

pub struct TrainerSession {
    config: AppConfig,
    exercise: ExerciseKind,
    tracker: RepetitionTracker,
    scheduler: CoachingScheduler,
    gate: FeedbackGate,
    speech: SpeechChannel,
    rng: StdRng,
    events: EventBus,
    analysis_enabled: bool,
    latest_frame: Option<PoseFrame>,
    last_tick_ms: u64,
    feedback: Status,
    // Released when the session is dropped
    _camera: CameraLease,
}

impl TrainerSession {
    /// Acquire the camera and begin a session at `now_ms`.
    ///
    /// Camera failure is the only fatal error: a status carrying the
    /// remediation text is published and no session is created.
    pub fn start(
        config: AppConfig,
        options: SessionOptions,
        deps: SessionDeps,
        camera: Box<dyn CameraSource>,
        now_ms: u64,
    ) -> Result<Self, CameraError> {
        let SessionDeps {
            speech,
            client,
            mut rng,
            events,
        } = deps;

        let camera = match CameraLease::acquire(camera) {
            Ok(lease) => lease,
            Err(err) => {
                events.publish(SessionEvent::CameraStatus(Status::new(
                    err.remediation(),
                    StatusLevel::Bad,
                )));
                return Err(err);
            }
        };
        events.publish(SessionEvent::CameraStatus(Status::new(
            CAMERA_READY,
            StatusLevel::Good,
        )));

        let tracker = RepetitionTracker::new(now_ms, config.repetition.debounce_ms);
        let scheduler = CoachingScheduler::new(&config.coaching, now_ms, &mut rng);
        let gate = FeedbackGate::new(client, config.feedback.cooldown_ms);
        let speech = SpeechChannel::new(speech, config.speech.clone(), options.voice_enabled);

        let mut session = Self {
            config,
            exercise: options.exercise,
            tracker,
            scheduler,
            gate,
            speech,
            rng,
            events,
            analysis_enabled: false,
            latest_frame: None,
            last_tick_ms: now_ms,
            feedback: Status::new(STEP_INTO_VIEW, StatusLevel::Neutral),
            _camera: camera,
        };

        tracing::info!(
            "[Session] started: exercise={}, voice={}, analysis={}",
            session.exercise,
            options.voice_enabled,
            options.analysis_enabled
        );
        session.say(messages::welcome(session.exercise), now_ms);

        if options.analysis_enabled {
            if session.gate.is_configured() {
                session.analysis_enabled = true;
                session
                    .events
                    .publish(SessionEvent::AnalysisToggled { enabled: true });
            } else {
                log_analysis_error(&AnalysisError::NotConfigured, "TrainerSession::start");
            }
        }

        Ok(session)
    }

    pub fn exercise(&self) -> ExerciseKind {
        self.exercise
    }

    pub fn rep_state(&self) -> &RepState {
        self.tracker.state()
    }

    pub fn gate_state(&self) -> FeedbackGateState {
        self.gate.state()
    }

    pub fn analysis_enabled(&self) -> bool {
        self.analysis_enabled
    }

    pub fn voice_enabled(&self) -> bool {
        self.speech.is_enabled()
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    /// Run one tick for `frame`. Its timestamp is the tick's clock.
    pub fn process_frame(&mut self, frame: PoseFrame) {
        let now_ms = frame.timestamp_ms;
        self.last_tick_ms = now_ms;
        self.poll_analysis(now_ms);

        if !frame.has_person() {
            self.feedback = Status::new(STEP_INTO_VIEW, StatusLevel::Warning);
            self.events.publish(SessionEvent::Frame(FrameUpdate {
                timestamp_ms: now_ms,
                metric: None,
                rep_count: self.tracker.rep_count(),
                tracking: Status::new(TRACKING_LOST, StatusLevel::Warning),
                feedback: self.feedback.clone(),
                overlay: SkeletonOverlay::default(),
            }));
            return;
        }

        let overlay =
            SkeletonOverlay::from_frame(&frame, self.config.overlay.visibility_threshold);
        let metric = compute_metric(self.exercise, &frame);
        self.latest_frame = Some(frame);

        if metric > 0 {
            let thresholds = self.config.exercises.get(self.exercise);
            if let Some(event) = self.tracker.update(self.exercise, thresholds, metric, now_ms) {
                self.handle_rep_event(event, now_ms);
            }
            if self.speech.is_enabled() {
                if let Some(tip) = self.scheduler.poll(self.exercise, now_ms, &mut self.rng) {
                    self.say(tip, now_ms);
                }
            }
        }

        self.events.publish(SessionEvent::Frame(FrameUpdate {
            timestamp_ms: now_ms,
            metric: (metric > 0).then_some(metric),
            rep_count: self.tracker.rep_count(),
            tracking: Status::new(TRACKING_ACTIVE, StatusLevel::Good),
            feedback: self.feedback.clone(),
            overlay,
        }));
    }

    fn handle_rep_event(&mut self, event: RepEvent, now_ms: u64) {
        match event {
            RepEvent::PhaseChanged { phase, metric } => {
                let feedback = messages::phase_feedback(self.exercise, phase)
                    .map(|text| Status::new(text, StatusLevel::Good));
                if let Some(status) = &feedback {
                    self.feedback = status.clone();
                }
                self.events.publish(SessionEvent::PhaseChanged {
                    phase,
                    metric,
                    feedback,
                });
                self.say(messages::phase_remark(self.exercise, phase, metric), now_ms);
            }
            RepEvent::RepCompleted {
                rep_count,
                timestamp_ms,
            } => {
                self.feedback = Status::new(messages::rep_feedback(rep_count), StatusLevel::Good);
                self.events.publish(SessionEvent::RepCompleted {
                    rep_count,
                    timestamp_ms,
                    feedback: self.feedback.clone(),
                });
                let cheer = messages::encouragement(rep_count, &mut self.rng);
                self.say(&cheer, now_ms);

                let every = self.config.repetition.analysis_every_n_reps.max(1);
                if self.analysis_enabled && rep_count % every == 0 {
                    self.request_analysis(now_ms);
                }
            }
        }
    }

    fn request_analysis(&mut self, now_ms: u64) {
        if self.latest_frame.is_none() {
            tracing::debug!("[Session] analysis skipped: no frame seen yet");
            return;
        }
        let state = self.tracker.state();
        let summary = SessionSummary {
            exercise: self.exercise,
            total_reps: state.rep_count,
            phase: state.phase,
            consecutive_reps: state.consecutive_reps,
            duration_ms: now_ms.saturating_sub(state.session_start_ms),
        };
        match self.gate.request_analysis(&summary, now_ms) {
            Ok(()) => self.events.publish(SessionEvent::AnalysisStarted {
                total_reps: summary.total_reps,
            }),
            Err(rejection) => {
                tracing::debug!("[Session] analysis not sent: {:?}", rejection);
            }
        }
    }

    /// Handle a finished analysis, if one is waiting. Called at the start
    /// of every tick; hosts without frames can call it directly.
    pub fn poll_analysis(&mut self, now_ms: u64) {
        if let Some(outcome) = self.gate.poll_completion() {
            self.handle_analysis_outcome(&outcome, now_ms);
        }
    }

    /// Await the in-flight analysis and handle it at the last tick time
    pub async fn wait_for_analysis(&mut self) -> Option<Result<AnalysisReport, AnalysisError>> {
        let outcome = self.gate.wait_for_completion().await?;
        self.handle_analysis_outcome(&outcome, self.last_tick_ms);
        Some(outcome)
    }

    fn handle_analysis_outcome(
        &mut self,
        outcome: &Result<AnalysisReport, AnalysisError>,
        now_ms: u64,
    ) {
        match outcome {
            Ok(report) => {
                self.events.publish(SessionEvent::AnalysisCompleted {
                    text: report.text.clone(),
                    category: report.category,
                    spoken: report.spoken().to_string(),
                });
                self.say(report.spoken(), now_ms);
            }
            Err(err) => {
                log_analysis_error(err, "TrainerSession::poll_analysis");
                self.events.publish(SessionEvent::AnalysisFailed {
                    code: err.code(),
                    message: err.message(),
                });
            }
        }
    }

    /// Switch exercise; counting restarts from zero
    pub fn select_exercise(&mut self, exercise: ExerciseKind, now_ms: u64) {
        self.exercise = exercise;
        self.tracker.reset();
        self.feedback = Status::new(messages::RESET_FEEDBACK, StatusLevel::Good);
        tracing::info!("[Session] switched to {}", exercise);
        self.events
            .publish(SessionEvent::ExerciseChanged { exercise });
        self.say(&messages::switched_to(exercise), now_ms);
    }

    /// Zero the rep count. Leaves the feedback gate alone.
    pub fn reset(&mut self, now_ms: u64) {
        self.tracker.reset();
        self.feedback = Status::new(messages::RESET_FEEDBACK, StatusLevel::Good);
        self.events.publish(SessionEvent::RepsReset {
            feedback: self.feedback.clone(),
        });
        self.say(messages::RESET_SPOKEN, now_ms);
    }

    pub fn set_voice_enabled(&mut self, enabled: bool, now_ms: u64) {
        self.speech.set_enabled(enabled);
        self.events.publish(SessionEvent::VoiceToggled { enabled });
        if enabled {
            // Tips resume one full interval after voice comes back
            self.scheduler = CoachingScheduler::new(&self.config.coaching, now_ms, &mut self.rng);
            self.say(messages::VOICE_ACTIVATED, now_ms);
        }
    }

    /// Flip AI analysis. Enabling without a client fails.
    pub fn toggle_analysis(&mut self, now_ms: u64) -> Result<bool, AnalysisError> {
        if !self.analysis_enabled && !self.gate.is_configured() {
            let err = AnalysisError::NotConfigured;
            log_analysis_error(&err, "TrainerSession::toggle_analysis");
            return Err(err);
        }

        self.analysis_enabled = !self.analysis_enabled;
        self.events.publish(SessionEvent::AnalysisToggled {
            enabled: self.analysis_enabled,
        });
        if self.analysis_enabled {
            self.say(messages::ANALYSIS_ACTIVATED, now_ms);
        }
        Ok(self.analysis_enabled)
    }

    pub fn test_voice(&mut self, now_ms: u64) -> SpeechOutcome {
        self.say(messages::TEST_VOICE, now_ms)
    }

    /// End the session. The camera is released when `self` drops here.
    pub fn stop(mut self, now_ms: u64) -> SessionReport {
        let total_reps = self.tracker.rep_count();
        let duration_ms = now_ms.saturating_sub(self.tracker.state().session_start_ms);

        if total_reps > 0 {
            self.say(&messages::farewell(total_reps), now_ms);
        }
        self.events.publish(SessionEvent::CameraStatus(Status::new(
            CAMERA_STOPPED,
            StatusLevel::Neutral,
        )));
        self.events.publish(SessionEvent::SessionStopped {
            total_reps,
            duration_ms,
            tracking: Status::new(TRACKING_DONE, StatusLevel::Good),
            feedback: Status::new(messages::completed_feedback(total_reps), StatusLevel::Good),
        });
        tracing::info!(
            "[Session] stopped: {} reps of {} in {}ms",
            total_reps,
            self.exercise,
            duration_ms
        );

        SessionReport {
            exercise: self.exercise,
            total_reps,
            duration_ms,
        }
    }

    fn say(&mut self, text: &str, now_ms: u64) -> SpeechOutcome {
        let outcome = self.speech.say(text, now_ms);
        match outcome {
            SpeechOutcome::Spoken => self.events.publish(SessionEvent::Spoken {
                text: text.to_string(),
            }),
            SpeechOutcome::Dropped => self.events.publish(SessionEvent::SpeechDropped {
                text: text.to_string(),
            }),
            SpeechOutcome::Muted => {}
        }
        outcome
    }
}
