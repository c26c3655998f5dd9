//! Headless presentation model.
//!
//! `SessionView` folds [`SessionEvent`]s into the strings a screen would
//! show. It holds no session logic; rendering backends read its fields.

use serde::Serialize;

use crate::pose::overlay::SkeletonOverlay;
use crate::session::{SessionEvent, Status, StatusLevel};

pub const METRIC_PLACEHOLDER: &str = "--";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionView {
    pub rep_counter: String,
    pub metric_display: String,
    pub feedback: Status,
    pub camera_status: Status,
    pub tracking_status: Status,
    pub analysis_status: Status,
    /// Last thing the coach said
    pub voice_echo: Option<String>,
    /// Last AI analysis text
    pub analysis_echo: Option<String>,
    pub overlay: SkeletonOverlay,
}

impl Default for SessionView {
    fn default() -> Self {
        Self {
            rep_counter: "0".to_string(),
            metric_display: METRIC_PLACEHOLDER.to_string(),
            feedback: Status::new("", StatusLevel::Neutral),
            camera_status: Status::new("", StatusLevel::Neutral),
            tracking_status: Status::new("", StatusLevel::Neutral),
            analysis_status: Status::new("AI Analysis Off", StatusLevel::Neutral),
            voice_echo: None,
            analysis_echo: None,
            overlay: SkeletonOverlay::default(),
        }
    }
}

fn format_metric(metric: Option<u32>) -> String {
    match metric {
        Some(value) => format!("{}°", value),
        None => METRIC_PLACEHOLDER.to_string(),
    }
}

impl SessionView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, event: &SessionEvent) {
        match event {
            SessionEvent::Frame(update) => {
                self.rep_counter = update.rep_count.to_string();
                self.metric_display = format_metric(update.metric);
                self.tracking_status = update.tracking.clone();
                self.feedback = update.feedback.clone();
                self.overlay = update.overlay.clone();
            }
            SessionEvent::PhaseChanged {
                feedback: Some(status),
                ..
            } => self.feedback = status.clone(),
            SessionEvent::PhaseChanged { .. } => {}
            SessionEvent::RepCompleted {
                rep_count,
                feedback,
                ..
            } => {
                self.rep_counter = rep_count.to_string();
                self.feedback = feedback.clone();
            }
            SessionEvent::Spoken { text } => self.voice_echo = Some(text.clone()),
            SessionEvent::SpeechDropped { .. } => {}
            SessionEvent::CameraStatus(status) => self.camera_status = status.clone(),
            SessionEvent::AnalysisStarted { .. } => {
                self.analysis_status =
                    Status::new("Analyzing form with AI...", StatusLevel::Warning);
            }
            SessionEvent::AnalysisCompleted { text, .. } => {
                self.analysis_echo = Some(text.clone());
                self.analysis_status = Status::new("AI Analysis Complete", StatusLevel::Good);
            }
            SessionEvent::AnalysisFailed { .. } => {
                self.analysis_status = Status::new("AI analysis failed", StatusLevel::Bad);
            }
            SessionEvent::AnalysisToggled { enabled: true } => {
                self.analysis_status =
                    Status::new("AI Active - Analyzing Form", StatusLevel::Good);
            }
            SessionEvent::AnalysisToggled { enabled: false } => {
                self.analysis_status = Status::new("AI Paused", StatusLevel::Neutral);
            }
            SessionEvent::VoiceToggled { .. } => {}
            SessionEvent::ExerciseChanged { .. } => {
                self.rep_counter = "0".to_string();
                self.metric_display = METRIC_PLACEHOLDER.to_string();
            }
            SessionEvent::RepsReset { feedback } => {
                self.rep_counter = "0".to_string();
                self.metric_display = METRIC_PLACEHOLDER.to_string();
                self.feedback = feedback.clone();
            }
            SessionEvent::SessionStopped {
                tracking, feedback, ..
            } => {
                self.tracking_status = tracking.clone();
                self.feedback = feedback.clone();
                self.overlay = SkeletonOverlay::default();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feedback::FeedbackCategory;
    use crate::session::FrameUpdate;

    fn frame(metric: Option<u32>, rep_count: u32) -> SessionEvent {
        SessionEvent::Frame(FrameUpdate {
            timestamp_ms: 0,
            metric,
            rep_count,
            tracking: Status::new("BODY TRACKING ACTIVE - AI COACHING", StatusLevel::Good),
            feedback: Status::new("Perfect rep #3!", StatusLevel::Good),
            overlay: SkeletonOverlay::default(),
        })
    }

    #[test]
    fn frame_updates_counter_and_metric() {
        let mut view = SessionView::new();
        view.apply(&frame(Some(92), 3));
        assert_eq!(view.rep_counter, "3");
        assert_eq!(view.metric_display, "92°");
        assert_eq!(view.feedback.message, "Perfect rep #3!");

        view.apply(&frame(None, 3));
        assert_eq!(view.metric_display, "--");
    }

    #[test]
    fn reset_clears_display() {
        let mut view = SessionView::new();
        view.apply(&frame(Some(150), 5));
        view.apply(&SessionEvent::RepsReset {
            feedback: Status::new("Reps reset! Ready for new set!", StatusLevel::Good),
        });
        assert_eq!(view.rep_counter, "0");
        assert_eq!(view.metric_display, "--");
        assert_eq!(view.feedback.message, "Reps reset! Ready for new set!");
    }

    #[test]
    fn echoes_speech_and_analysis() {
        let mut view = SessionView::new();
        view.apply(&SessionEvent::Spoken {
            text: "Great form!".to_string(),
        });
        view.apply(&SessionEvent::AnalysisStarted { total_reps: 3 });
        assert_eq!(view.analysis_status.level, StatusLevel::Warning);

        view.apply(&SessionEvent::AnalysisCompleted {
            text: "Well done.".to_string(),
            category: FeedbackCategory::Good,
            spoken: FeedbackCategory::Good.spoken().to_string(),
        });
        assert_eq!(view.voice_echo.as_deref(), Some("Great form!"));
        assert_eq!(view.analysis_echo.as_deref(), Some("Well done."));
        assert_eq!(view.analysis_status.message, "AI Analysis Complete");
    }

    #[test]
    fn dropped_speech_keeps_previous_echo() {
        let mut view = SessionView::new();
        view.apply(&SessionEvent::Spoken {
            text: "first".to_string(),
        });
        view.apply(&SessionEvent::SpeechDropped {
            text: "second".to_string(),
        });
        assert_eq!(view.voice_echo.as_deref(), Some("first"));
    }
}
