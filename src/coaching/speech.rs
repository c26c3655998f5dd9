//! Speech output channel.
//!
//! The synthesizer is one shared resource with a "skip if currently
//! speaking" policy: a request made while an utterance is playing is
//! dropped, never queued. Rep messages, tips and analysis results all route
//! through the same [`SpeechChannel`], so the first request wins until it
//! finishes.

use crate::config::SpeechConfig;

/// One utterance handed to the synthesizer
#[derive(Debug, Clone, PartialEq)]
pub struct Utterance {
    pub text: String,
    pub rate: f32,
    pub pitch: f32,
    pub volume: f32,
}

/// External speech collaborator.
///
/// Receives the caller's clock so simulated voices can model utterance
/// length without reading wall time.
pub trait SpeechSynthesizer: Send {
    fn is_speaking(&self, now_ms: u64) -> bool;
    fn speak(&mut self, utterance: &Utterance, now_ms: u64);
    fn cancel(&mut self);
}

/// What happened to a speech request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeechOutcome {
    Spoken,
    /// Another utterance was still playing
    Dropped,
    /// Voice output is switched off
    Muted,
}

pub struct SpeechChannel {
    synth: Box<dyn SpeechSynthesizer>,
    enabled: bool,
    config: SpeechConfig,
}

impl SpeechChannel {
    pub fn new(synth: Box<dyn SpeechSynthesizer>, config: SpeechConfig, enabled: bool) -> Self {
        Self {
            synth,
            enabled,
            config,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Switching voice off cancels whatever is playing
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.synth.cancel();
        }
    }

    pub fn say(&mut self, text: &str, now_ms: u64) -> SpeechOutcome {
        if !self.enabled {
            return SpeechOutcome::Muted;
        }
        if self.synth.is_speaking(now_ms) {
            tracing::debug!("[Speech] dropped while speaking: {}", text);
            return SpeechOutcome::Dropped;
        }

        let utterance = Utterance {
            text: text.to_string(),
            rate: self.config.rate,
            pitch: self.config.pitch,
            volume: self.config.volume,
        };
        self.synth.speak(&utterance, now_ms);
        SpeechOutcome::Spoken
    }
}

/// Deterministic stand-in voice that "speaks" for a duration derived from
/// the word count, used by the CLI harness.
pub struct TimedSpeech {
    ms_per_word: u64,
    speaking_until_ms: u64,
}

impl TimedSpeech {
    pub fn new(words_per_minute: u32) -> Self {
        let ms_per_word = if words_per_minute == 0 {
            0
        } else {
            60_000 / words_per_minute as u64
        };
        Self {
            ms_per_word,
            speaking_until_ms: 0,
        }
    }

    /// Finishes every utterance immediately, so nothing is ever dropped
    pub fn instant() -> Self {
        Self::new(0)
    }
}

impl SpeechSynthesizer for TimedSpeech {
    fn is_speaking(&self, now_ms: u64) -> bool {
        now_ms < self.speaking_until_ms
    }

    fn speak(&mut self, utterance: &Utterance, now_ms: u64) {
        let words = utterance.text.split_whitespace().count() as u64;
        let rate = if utterance.rate > 0.0 { utterance.rate } else { 1.0 };
        let duration = (words * self.ms_per_word) as f32 / rate;
        self.speaking_until_ms = now_ms + duration as u64;
        tracing::info!("[Speech] {}", utterance.text);
    }

    fn cancel(&mut self) {
        self.speaking_until_ms = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn channel(words_per_minute: u32) -> SpeechChannel {
        SpeechChannel::new(
            Box::new(TimedSpeech::new(words_per_minute)),
            SpeechConfig::default(),
            true,
        )
    }

    #[test]
    fn first_request_wins_while_speaking() {
        // 120 wpm -> 500ms per word
        let mut speech = channel(120);
        assert_eq!(speech.say("one two three four", 0), SpeechOutcome::Spoken);
        assert_eq!(speech.say("interrupt", 1000), SpeechOutcome::Dropped);
        assert_eq!(speech.say("after", 2000), SpeechOutcome::Spoken);
    }

    #[test]
    fn muted_channel_never_speaks() {
        let mut speech = channel(120);
        speech.set_enabled(false);
        assert_eq!(speech.say("hello", 0), SpeechOutcome::Muted);
    }

    #[test]
    fn disabling_cancels_current_utterance() {
        let mut speech = channel(60);
        assert_eq!(speech.say("a long sentence here", 0), SpeechOutcome::Spoken);
        speech.set_enabled(false);
        speech.set_enabled(true);
        assert_eq!(speech.say("next", 100), SpeechOutcome::Spoken);
    }

    #[test]
    fn instant_voice_never_drops() {
        let mut speech = SpeechChannel::new(
            Box::new(TimedSpeech::instant()),
            SpeechConfig::default(),
            true,
        );
        for ts in 0..5 {
            assert_eq!(speech.say("go", ts), SpeechOutcome::Spoken);
        }
    }
}
