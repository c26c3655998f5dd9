//! One-way events from the session to whatever renders it.
//!
//! Events go out on a `tokio::sync::broadcast` channel. Publishing never
//! blocks; a subscriber that falls behind loses the oldest events.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tokio_stream::wrappers::BroadcastStream;

use crate::analysis::Phase;
use crate::exercise::ExerciseKind;
use crate::feedback::FeedbackCategory;
use crate::pose::overlay::SkeletonOverlay;

/// Severity used to colour a status line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusLevel {
    Good,
    Warning,
    Bad,
    Neutral,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Status {
    pub message: String,
    pub level: StatusLevel,
}

impl Status {
    pub fn new(message: impl Into<String>, level: StatusLevel) -> Self {
        Self {
            message: message.into(),
            level,
        }
    }
}

/// Everything the renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameUpdate {
    pub timestamp_ms: u64,
    /// `None` when there is no signal this frame
    pub metric: Option<u32>,
    pub rep_count: u32,
    pub tracking: Status,
    pub feedback: Status,
    pub overlay: SkeletonOverlay,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum SessionEvent {
    Frame(FrameUpdate),
    PhaseChanged {
        phase: Phase,
        metric: u32,
        feedback: Option<Status>,
    },
    RepCompleted {
        rep_count: u32,
        timestamp_ms: u64,
        feedback: Status,
    },
    Spoken {
        text: String,
    },
    /// Speech request lost to an utterance already playing
    SpeechDropped {
        text: String,
    },
    CameraStatus(Status),
    AnalysisStarted {
        total_reps: u32,
    },
    AnalysisCompleted {
        text: String,
        category: FeedbackCategory,
        spoken: String,
    },
    AnalysisFailed {
        code: i32,
        message: String,
    },
    AnalysisToggled {
        enabled: bool,
    },
    VoiceToggled {
        enabled: bool,
    },
    ExerciseChanged {
        exercise: ExerciseKind,
    },
    RepsReset {
        feedback: Status,
    },
    SessionStopped {
        total_reps: u32,
        duration_ms: u64,
        tracking: Status,
        feedback: Status,
    },
}

/// Cloneable publisher handle for [`SessionEvent`]s
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<SessionEvent>,
}

impl EventBus {
    pub const DEFAULT_CAPACITY: usize = 256;

    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Publish to current subscribers; having none is not an error
    pub fn publish(&self, event: SessionEvent) {
        let _ = self.sender.send(event);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.sender.subscribe()
    }

    pub fn stream(&self) -> BroadcastStream<SessionEvent> {
        BroadcastStream::new(self.subscribe())
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY)
    }
}
