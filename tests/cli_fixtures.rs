use std::path::PathBuf;
use std::process::Command;

use serde_json::Value;

fn cli() -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_coach_cli"));
    command.current_dir(env!("CARGO_MANIFEST_DIR"));
    command
}

fn fixture_file(name: &str) -> String {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("fixtures")
        .join(name)
        .to_string_lossy()
        .into_owned()
}

fn json_lines(stdout: &[u8]) -> Vec<Value> {
    String::from_utf8(stdout.to_vec())
        .expect("stdout UTF-8")
        .lines()
        .map(|line| serde_json::from_str(line).expect("each stdout line is JSON"))
        .collect()
}

fn count_type(lines: &[Value], event_type: &str) -> usize {
    lines.iter().filter(|line| line["type"] == event_type).count()
}

#[test]
fn replay_fixture_counts_one_rep() {
    let output = cli()
        .args([
            "--seed",
            "1",
            "replay",
            "--fixture",
            &fixture_file("squat_single_rep.json"),
        ])
        .output()
        .expect("failed to run coach_cli replay");
    assert!(
        output.status.success(),
        "CLI exited with {:?}",
        output.status.code()
    );

    let lines = json_lines(&output.stdout);
    assert_eq!(count_type(&lines, "rep_completed"), 1);
    assert_eq!(count_type(&lines, "frame"), 3);
    let report = lines.last().expect("report line");
    assert_eq!(report["report"]["total_reps"], 1);
    assert_eq!(report["report"]["exercise"], "squat");
}

#[test]
fn replay_noisy_fixture_matches_expectation() {
    let output = cli()
        .args(["replay", "--fixture", &fixture_file("squat_noisy.json")])
        .output()
        .expect("failed to run noisy replay");
    assert!(output.status.success());

    let lines = json_lines(&output.stdout);
    let lost_tracking = lines
        .iter()
        .filter(|line| line["type"] == "frame")
        .filter(|line| line["payload"]["tracking"]["level"] == "warning")
        .count();
    assert_eq!(lost_tracking, 1);
}

#[test]
fn replay_detects_mismatch() {
    let output = cli()
        .args([
            "replay",
            "--fixture",
            &fixture_file("squat_wrong_expectation.json"),
        ])
        .output()
        .expect("failed to run mismatch replay");
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8(output.stderr).expect("stderr UTF-8");
    assert!(
        stderr.contains("\"mismatch\""),
        "expected mismatch JSON in stderr, got {stderr}"
    );
}

#[test]
fn simulate_counts_requested_reps() {
    let output = cli()
        .args([
            "--seed",
            "9",
            "--voice-wpm",
            "0",
            "simulate",
            "--exercise",
            "bicep",
            "--reps",
            "4",
        ])
        .output()
        .expect("failed to run simulate");
    assert!(output.status.success());

    let lines = json_lines(&output.stdout);
    assert_eq!(count_type(&lines, "rep_completed"), 4);
    assert_eq!(lines.last().unwrap()["report"]["total_reps"], 4);
}

#[test]
fn simulate_rejects_unknown_exercise() {
    let output = cli()
        .args(["simulate", "--exercise", "deadlift"])
        .output()
        .expect("failed to run simulate");
    assert!(!output.status.success());
}

#[test]
fn dump_config_prints_defaults() {
    let output = cli()
        .arg("dump-config")
        .output()
        .expect("failed to run dump-config");
    assert!(output.status.success());
    let json: Value = serde_json::from_slice(&output.stdout).expect("config JSON");
    assert_eq!(json["repetition"]["debounce_ms"], 1000);
    assert_eq!(json["exercises"]["squat"]["min_angle"], 80);
    assert_eq!(json["feedback"]["model"], "gemini-pro");
}
