//! Configuration management for coaching parameters
//!
//! This module provides runtime configuration loading from JSON files so
//! thresholds and timings can be tuned without recompilation. A missing or
//! invalid file never prevents a session from starting: defaults are used
//! and a warning is logged.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{log_config_error, ConfigError};
use crate::exercise::ExerciseTable;

/// Complete application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub exercises: ExerciseTable,
    #[serde(default)]
    pub repetition: RepetitionConfig,
    #[serde(default)]
    pub coaching: CoachingConfig,
    #[serde(default)]
    pub feedback: FeedbackConfig,
    #[serde(default)]
    pub speech: SpeechConfig,
    #[serde(default)]
    pub overlay: OverlayConfig,
}

/// Repetition detection parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepetitionConfig {
    /// Minimum time between a completed rep and the next transition
    pub debounce_ms: u64,
    /// Request AI analysis every N completed reps
    pub analysis_every_n_reps: u32,
}

impl Default for RepetitionConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 1000,
            analysis_every_n_reps: 3,
        }
    }
}

/// Generic tip cadence
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoachingConfig {
    /// Base silence between tips
    pub tip_interval_ms: u64,
    /// Upper bound of the random extra delay added to each interval
    pub tip_jitter_ms: u64,
}

impl Default for CoachingConfig {
    fn default() -> Self {
        Self {
            tip_interval_ms: 15_000,
            tip_jitter_ms: 5_000,
        }
    }
}

/// External text-generation collaborator settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackConfig {
    /// Minimum time between two accepted analysis requests
    pub cooldown_ms: u64,
    /// Base URL of the generative language API
    pub endpoint: String,
    pub model: String,
    /// API key; falls back to the `GEMINI_API_KEY` environment variable
    #[serde(default)]
    pub api_key: Option<String>,
    pub temperature: f32,
    pub max_output_tokens: u32,
}

impl Default for FeedbackConfig {
    fn default() -> Self {
        Self {
            cooldown_ms: 10_000,
            endpoint: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            model: "gemini-pro".to_string(),
            api_key: None,
            temperature: 0.7,
            max_output_tokens: 150,
        }
    }
}

impl FeedbackConfig {
    pub const API_KEY_ENV: &'static str = "GEMINI_API_KEY";

    /// Configured key, else the environment variable. Blank keys count as absent.
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .or_else(|| std::env::var(Self::API_KEY_ENV).ok())
            .filter(|key| !key.trim().is_empty())
    }
}

/// Voice parameters passed with every utterance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeechConfig {
    pub rate: f32,
    pub pitch: f32,
    pub volume: f32,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            rate: 1.0,
            pitch: 1.0,
            volume: 0.8,
        }
    }
}

/// Skeleton overlay settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverlayConfig {
    /// Joints at or below this visibility are not drawn
    pub visibility_threshold: f64,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            visibility_threshold: 0.5,
        }
    }
}

impl AppConfig {
    /// Load configuration from JSON file
    ///
    /// # Arguments
    /// * `path` - Path to JSON config file
    ///
    /// # Returns
    /// The parsed configuration, or defaults if the file is missing, is not
    /// valid JSON, or fails [`AppConfig::validate`].
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Self {
        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(err) => {
                log::warn!(
                    "[Config] Failed to read config file {:?}: {}. Using defaults.",
                    path.as_ref(),
                    err
                );
                return Self::default();
            }
        };

        let config: AppConfig = match serde_json::from_str(&contents) {
            Ok(config) => config,
            Err(err) => {
                log::warn!(
                    "[Config] Failed to parse JSON from {:?}: {}. Using defaults.",
                    path.as_ref(),
                    err
                );
                return Self::default();
            }
        };

        match config.validate() {
            Ok(()) => {
                log::info!("[Config] Loaded configuration from {:?}", path.as_ref());
                config
            }
            Err(err) => {
                log_config_error(&err, "load_from_file");
                Self::default()
            }
        }
    }

    /// Load configuration from the default asset location
    pub fn load() -> Self {
        Self::load_from_file("assets/coach_config.json")
    }

    /// Check threshold ordering and parameter ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.exercises.validate()?;

        if self.repetition.analysis_every_n_reps == 0 {
            return Err(ConfigError::InvalidParameter {
                name: "repetition.analysis_every_n_reps",
                reason: "must be at least 1".to_string(),
            });
        }
        if !(0.0..=2.0).contains(&self.feedback.temperature) {
            return Err(ConfigError::InvalidParameter {
                name: "feedback.temperature",
                reason: format!("{} outside 0.0-2.0", self.feedback.temperature),
            });
        }
        if self.feedback.max_output_tokens == 0 {
            return Err(ConfigError::InvalidParameter {
                name: "feedback.max_output_tokens",
                reason: "must be at least 1".to_string(),
            });
        }
        if !(0.0..=1.0).contains(&self.overlay.visibility_threshold) {
            return Err(ConfigError::InvalidParameter {
                name: "overlay.visibility_threshold",
                reason: format!("{} outside 0.0-1.0", self.overlay.visibility_threshold),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exercise::{ExerciseKind, Thresholds};

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.repetition.debounce_ms, 1000);
        assert_eq!(config.repetition.analysis_every_n_reps, 3);
        assert_eq!(config.coaching.tip_interval_ms, 15_000);
        assert_eq!(config.coaching.tip_jitter_ms, 5_000);
        assert_eq!(config.feedback.cooldown_ms, 10_000);
        assert_eq!(config.feedback.max_output_tokens, 150);
        assert_eq!(config.speech.volume, 0.8);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_json_roundtrip() {
        let config = AppConfig::default();
        let json = serde_json::to_string_pretty(&config).unwrap();
        let parsed: AppConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.exercises, config.exercises);
        assert_eq!(parsed.feedback.model, config.feedback.model);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let parsed: AppConfig =
            serde_json::from_str(r#"{"repetition": {"debounce_ms": 800, "analysis_every_n_reps": 5}}"#)
                .unwrap();
        assert_eq!(parsed.repetition.debounce_ms, 800);
        assert_eq!(parsed.coaching.tip_interval_ms, 15_000);
        assert_eq!(
            parsed.exercises.get(ExerciseKind::Squat),
            Thresholds::Angle {
                min_angle: 80,
                max_angle: 170
            }
        );
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let config = AppConfig::load_from_file("/nonexistent/coach_config.json");
        assert_eq!(config.repetition.debounce_ms, 1000);
    }

    #[test]
    fn test_invalid_file_uses_defaults() {
        let path = std::env::temp_dir().join(format!(
            "rep_coach_invalid_config_{}.json",
            std::process::id()
        ));
        let mut config = AppConfig::default();
        config.exercises.squat = Thresholds::Angle {
            min_angle: 170,
            max_angle: 80,
        };
        config.repetition.debounce_ms = 1;
        fs::write(&path, serde_json::to_string(&config).unwrap()).unwrap();

        let loaded = AppConfig::load_from_file(&path);
        let _ = fs::remove_file(&path);
        assert_eq!(loaded.repetition.debounce_ms, 1000);
        assert_eq!(loaded.exercises.get(ExerciseKind::Squat).bounds(), (80, 170));
    }

    #[test]
    fn test_validation_rejects_bad_parameters() {
        let mut config = AppConfig::default();
        config.repetition.analysis_every_n_reps = 0;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.feedback.temperature = 3.5;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.overlay.visibility_threshold = 1.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_blank_api_key_counts_as_absent() {
        let config = FeedbackConfig {
            api_key: Some("   ".to_string()),
            ..FeedbackConfig::default()
        };
        // Only the environment can supply a key now; a blank one never survives
        if let Some(key) = config.resolve_api_key() {
            assert!(!key.trim().is_empty());
        }
    }
}
