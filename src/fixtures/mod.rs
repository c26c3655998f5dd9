//! Pose fixtures for the deterministic CLI harness and tests.
//!
//! A fixture is a JSON file naming the exercise and carrying either full
//! pose frames or compact metric samples that are expanded into synthetic
//! poses. An optional `expect` block lets the harness verify the outcome.

pub mod synthetic;

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::exercise::ExerciseKind;
use crate::pose::PoseFrame;

/// One compact sample; `metric: null` stands for a frame with nobody in it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricSample {
    pub timestamp_ms: u64,
    pub metric: Option<u32>,
}

/// Outcome a fixture is expected to produce
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixtureExpectations {
    pub total_reps: u32,
    #[serde(default)]
    pub notes: Option<String>,
}

impl FixtureExpectations {
    pub fn verify(&self, total_reps: u32) -> std::result::Result<(), String> {
        if total_reps == self.total_reps {
            Ok(())
        } else {
            Err(format!(
                "expected {} reps, counted {}",
                self.total_reps, total_reps
            ))
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixtureFile {
    pub exercise: ExerciseKind,
    #[serde(default)]
    pub frames: Vec<PoseFrame>,
    #[serde(default)]
    pub metrics: Vec<MetricSample>,
    #[serde(default)]
    pub expect: Option<FixtureExpectations>,
}

impl FixtureFile {
    pub fn parse(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("parsing fixture JSON")
    }

    /// All frames in timestamp order: explicit frames plus expanded samples
    pub fn to_frames(&self) -> Vec<PoseFrame> {
        let mut frames = self.frames.clone();
        frames.extend(self.metrics.iter().map(|sample| match sample.metric {
            Some(metric) => synthetic::frame_for_metric(self.exercise, metric, sample.timestamp_ms),
            None => PoseFrame::empty(sample.timestamp_ms),
        }));
        frames.sort_by_key(|frame| frame.timestamp_ms);
        frames
    }
}

pub fn load_fixture<P: AsRef<Path>>(path: P) -> Result<FixtureFile> {
    let path = path.as_ref();
    let contents =
        fs::read_to_string(path).with_context(|| format!("reading fixture {}", path.display()))?;
    FixtureFile::parse(&contents).with_context(|| format!("loading {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::compute_metric;

    const SQUAT_FIXTURE: &str = r#"{
        "exercise": "squat",
        "metrics": [
            {"timestamp_ms": 2300, "metric": 175},
            {"timestamp_ms": 0, "metric": 175},
            {"timestamp_ms": 1100, "metric": 75},
            {"timestamp_ms": 1500, "metric": null}
        ],
        "expect": {"total_reps": 1}
    }"#;

    #[test]
    fn expands_metric_samples_in_order() {
        let fixture = FixtureFile::parse(SQUAT_FIXTURE).unwrap();
        let frames = fixture.to_frames();

        let stamps: Vec<u64> = frames.iter().map(|f| f.timestamp_ms).collect();
        assert_eq!(stamps, vec![0, 1100, 1500, 2300]);
        assert_eq!(compute_metric(ExerciseKind::Squat, &frames[1]), 75);
        assert!(!frames[2].has_person());
    }

    #[test]
    fn expectations_verify_rep_count() {
        let fixture = FixtureFile::parse(SQUAT_FIXTURE).unwrap();
        let expect = fixture.expect.unwrap();
        assert!(expect.verify(1).is_ok());
        assert!(expect.verify(2).is_err());
    }

    #[test]
    fn unknown_exercise_is_an_error() {
        assert!(FixtureFile::parse(r#"{"exercise": "deadlift"}"#).is_err());
    }

    #[test]
    fn missing_file_has_context() {
        let err = load_fixture("/nonexistent/fixture.json").unwrap_err();
        assert!(format!("{:#}", err).contains("reading fixture"));
    }
}
