//! Basic CLI E2E tests.
//!
//! Tests invoke CLI commands via cargo run and verify outputs.

use std::process::Command;

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(args: &[&str]) -> (String, String, i32) {
    let output = Command::new("cargo")
        .args(["run", "-p", "pomoharvest-cli", "--quiet", "--"])
        .args(args)
        .env("POMOHARVEST_ENV", "dev")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

#[test]
fn test_timer_status_snapshot() {
    let (stdout, _, code) = run_cli(&["timer", "status"]);
    assert_eq!(code, 0, "timer status failed");
    let snapshot: serde_json::Value =
        serde_json::from_str(&stdout).expect("status output is JSON");
    assert_eq!(snapshot["phase"], "idle");
    assert_eq!(snapshot["total_pomodoros"], 0);
}

#[test]
fn test_timer_run_accelerated() {
    let (stdout, _, code) = run_cli(&[
        "timer", "run", "--seconds", "2", "--tick-ms", "10",
    ]);
    assert_eq!(code, 0, "timer run failed");
    assert!(stdout.contains("\"timer_started\""), "missing start event");
    assert!(
        stdout.contains("\"session_completed\""),
        "missing completion event"
    );
    // Exactly one completion per run.
    assert_eq!(stdout.matches("\"session_completed\"").count(), 1);
}

#[test]
fn test_simulate_streak_activation() {
    let (stdout, _, code) = run_cli(&[
        "simulate",
        "--plan",
        "2025-03-01x2,+1x2,+1x2",
    ]);
    assert_eq!(code, 0, "simulate failed");
    assert!(
        stdout.contains("\"streak_active\":true"),
        "day 3 challenge should activate the streak"
    );
    assert!(stdout.contains("\"popup\":\"streak_active\""));
}

#[test]
fn test_simulate_rejects_bad_plan() {
    let (_, stderr, code) = run_cli(&["simulate", "--plan", "+1x2"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("absolute"));
}

#[test]
fn test_config_path() {
    let (stdout, _, code) = run_cli(&["config", "path"]);
    assert_eq!(code, 0, "config path failed");
    assert!(stdout.contains("pomoharvest-dev"));
}
