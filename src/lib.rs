// Rep Coach Core - real-time repetition counting and form coaching
// Pose frames in, rep events, spoken cues and AI analysis out

// Module declarations
pub mod analysis;
pub mod camera;
pub mod coaching;
pub mod config;
pub mod error;
pub mod exercise;
pub mod feedback;
pub mod fixtures;
pub mod pose;
pub mod presentation;
pub mod session;

// Re-exports for convenience
pub use config::AppConfig;
pub use exercise::ExerciseKind;
pub use pose::{Joint, PoseFrame};
pub use session::{EventBus, SessionEvent, SessionOptions, SessionReport, TrainerSession};

use tracing_subscriber::EnvFilter;

/// Install the global `tracing` subscriber.
///
/// Honors `RUST_LOG`, defaulting to `info`, and writes to stderr so stdout
/// stays free for event output. Safe to call more than once;
/// later calls are no-ops.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
