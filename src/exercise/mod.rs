//! Exercise catalogue: kinds, threshold table and coaching copy.

pub mod messages;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Exercise selected by the user for the current set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExerciseKind {
    Squat,
    Pushup,
    #[serde(rename = "bicep")]
    BicepCurl,
    #[serde(rename = "shoulder")]
    ShoulderPress,
}

impl ExerciseKind {
    pub const ALL: [ExerciseKind; 4] = [
        ExerciseKind::Squat,
        ExerciseKind::Pushup,
        ExerciseKind::BicepCurl,
        ExerciseKind::ShoulderPress,
    ];

    /// Short identifier used in config, fixtures and the analysis prompt
    pub fn as_str(&self) -> &'static str {
        match self {
            ExerciseKind::Squat => "squat",
            ExerciseKind::Pushup => "pushup",
            ExerciseKind::BicepCurl => "bicep",
            ExerciseKind::ShoulderPress => "shoulder",
        }
    }

    /// Get human-readable name for display
    pub fn display_name(&self) -> &'static str {
        match self {
            ExerciseKind::Squat => "Squat",
            ExerciseKind::Pushup => "Push-up",
            ExerciseKind::BicepCurl => "Bicep Curl",
            ExerciseKind::ShoulderPress => "Shoulder Press",
        }
    }

    /// Whether the metric for this exercise is a normalized height rather than an angle.
    ///
    /// Height-based exercises are metric-only: no repetition rule is defined for them.
    pub fn is_height_based(&self) -> bool {
        matches!(self, ExerciseKind::ShoulderPress)
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == value)
    }
}

impl std::fmt::Display for ExerciseKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Threshold pair for one exercise.
///
/// Angle thresholds are in whole degrees, height thresholds on the 0-100
/// normalized scale. Either way `min < max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Thresholds {
    Angle { min_angle: u32, max_angle: u32 },
    Height { min_height: u32, max_height: u32 },
}

impl Thresholds {
    /// Lower and upper bound regardless of unit
    pub fn bounds(&self) -> (u32, u32) {
        match *self {
            Thresholds::Angle {
                min_angle,
                max_angle,
            } => (min_angle, max_angle),
            Thresholds::Height {
                min_height,
                max_height,
            } => (min_height, max_height),
        }
    }
}

/// Static lookup table, one entry per [`ExerciseKind`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseTable {
    pub squat: Thresholds,
    pub pushup: Thresholds,
    pub bicep: Thresholds,
    pub shoulder: Thresholds,
}

impl Default for ExerciseTable {
    fn default() -> Self {
        Self {
            squat: Thresholds::Angle {
                min_angle: 80,
                max_angle: 170,
            },
            pushup: Thresholds::Angle {
                min_angle: 80,
                max_angle: 160,
            },
            bicep: Thresholds::Angle {
                min_angle: 30,
                max_angle: 160,
            },
            shoulder: Thresholds::Height {
                min_height: 30,
                max_height: 70,
            },
        }
    }
}

impl ExerciseTable {
    pub fn get(&self, kind: ExerciseKind) -> Thresholds {
        match kind {
            ExerciseKind::Squat => self.squat,
            ExerciseKind::Pushup => self.pushup,
            ExerciseKind::BicepCurl => self.bicep,
            ExerciseKind::ShoulderPress => self.shoulder,
        }
    }

    /// Check `min < max` for every entry and that each entry uses the unit its
    /// exercise measures.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for kind in ExerciseKind::ALL {
            let thresholds = self.get(kind);
            let (min, max) = thresholds.bounds();
            if min >= max {
                return Err(ConfigError::InvalidThresholds {
                    exercise: kind.as_str().to_string(),
                    min,
                    max,
                });
            }

            let height = matches!(thresholds, Thresholds::Height { .. });
            if height != kind.is_height_based() {
                return Err(ConfigError::InvalidParameter {
                    name: "exercises",
                    reason: format!("{} uses the wrong threshold unit", kind.as_str()),
                });
            }
            if height && max > 100 {
                return Err(ConfigError::InvalidParameter {
                    name: "exercises",
                    reason: format!("{} height must stay within 0-100", kind.as_str()),
                });
            }
        }
        Ok(())
    }
}
