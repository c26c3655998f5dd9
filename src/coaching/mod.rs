//! Spoken coaching: periodic tips and the shared speech output.

pub mod scheduler;
pub mod speech;

pub use scheduler::{CoachingClock, CoachingScheduler};
pub use speech::{SpeechChannel, SpeechOutcome, SpeechSynthesizer, TimedSpeech, Utterance};
