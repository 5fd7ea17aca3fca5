//! Basic CLI E2E tests.
//!
//! Tests invoke the built binary against a throwaway data directory and
//! verify outputs.

use std::io::Write;
use std::process::{Command, Stdio};

use tempfile::TempDir;

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(dir: &TempDir, args: &[&str]) -> (String, String, i32) {
    run_cli_with_input(dir, args, "")
}

fn run_cli_with_input(dir: &TempDir, args: &[&str], input: &str) -> (String, String, i32) {
    let mut child = Command::new(env!("CARGO_BIN_EXE_pomodoro-cli"))
        .args(args)
        .env("POMODORO_DATA_DIR", dir.path())
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to spawn CLI");

    child
        .stdin
        .take()
        .expect("stdin")
        .write_all(input.as_bytes())
        .expect("Failed to write stdin");

    let output = child.wait_with_output().expect("Failed to wait for CLI");
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

fn data_dir() -> TempDir {
    tempfile::tempdir().expect("tempdir")
}

#[test]
fn test_status_prints_default_snapshot() {
    let dir = data_dir();
    let (stdout, _, code) = run_cli(&dir, &["status"]);
    assert_eq!(code, 0);

    let json: serde_json::Value = serde_json::from_str(&stdout).expect("JSON output");
    assert_eq!(json["type"], "StateSnapshot");
    assert_eq!(json["mode"], "work");
    assert_eq!(json["remaining_secs"], 1500);
    assert_eq!(json["is_running"], false);
    assert_eq!(json["sessions_completed"], 0);
}

#[test]
fn test_config_creates_file_with_defaults() {
    let dir = data_dir();
    let (stdout, _, code) = run_cli(&dir, &["config", "get", "timer.work_minutes"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "25");
    assert!(dir.path().join("config.toml").exists());
}

#[test]
fn test_config_set_changes_starting_length() {
    let dir = data_dir();
    let (_, _, code) = run_cli(&dir, &["config", "set", "timer.work_minutes", "40"]);
    assert_eq!(code, 0);

    let (stdout, _, _) = run_cli(&dir, &["status"]);
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["remaining_secs"], 2400);
}

#[test]
fn test_config_out_of_range_length_is_clamped_when_applied() {
    let dir = data_dir();
    run_cli(&dir, &["config", "set", "timer.work_minutes", "999"]);
    let (stdout, _, _) = run_cli(&dir, &["status"]);
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["remaining_secs"], 3600);
}

#[test]
fn test_config_unknown_key_fails() {
    let dir = data_dir();
    let (_, stderr, code) = run_cli(&dir, &["config", "get", "timer.nope"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("unknown key"));

    let (_, _, code) = run_cli(&dir, &["config", "set", "timer.nope", "1"]);
    assert_eq!(code, 1);
}

#[test]
fn test_theme_set_and_show() {
    let dir = data_dir();
    let (stdout, _, code) = run_cli(&dir, &["theme", "set", "blue"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("Ocean Blue"));

    let (stdout, _, _) = run_cli(&dir, &["theme", "show"]);
    assert!(stdout.contains("Ocean Blue (blue)"));

    let (stdout, _, _) = run_cli(&dir, &["config", "get", "ui.theme"]);
    assert_eq!(stdout.trim(), "blue");
}

#[test]
fn test_theme_set_unknown_fails() {
    let dir = data_dir();
    let (_, stderr, code) = run_cli(&dir, &["theme", "set", "mauve"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("Unknown theme"));

    let (stdout, _, _) = run_cli(&dir, &["theme", "show"]);
    assert!(stdout.contains("Classic Red"));
}

#[test]
fn test_theme_list_marks_current() {
    let dir = data_dir();
    let (stdout, _, code) = run_cli(&dir, &["theme", "list"]);
    assert_eq!(code, 0);
    assert!(stdout.lines().any(|l| l.starts_with("* red")));
    assert_eq!(stdout.lines().count(), 5);
}

#[test]
fn test_run_skip_shows_banner_and_break() {
    let dir = data_dir();
    let (stdout, _, code) = run_cli_with_input(&dir, &["run"], "k\nq\n");
    assert_eq!(code, 0);
    assert!(stdout.contains("Work session complete! Time for a short break."));
    assert!(stdout.contains("05:00"));
    assert!(stdout.contains("sessions 1"));
}

#[test]
fn test_run_length_change_is_clamped() {
    let dir = data_dir();
    let (stdout, _, code) = run_cli_with_input(&dir, &["run"], "w 0\nl 1\nq\n");
    assert_eq!(code, 0);
    assert!(stdout.contains("01:00"));
}

#[test]
fn test_run_rejects_bad_input_and_exits_on_eof() {
    let dir = data_dir();
    let (stdout, stderr, code) = run_cli_with_input(&dir, &["run"], "w ten\nbogus\n");
    assert_eq!(code, 0);
    assert!(stderr.contains("invalid minutes"));
    assert!(stderr.contains("unknown command"));
    assert!(stdout.contains("25:00"));
}

#[test]
fn test_run_with_overrides() {
    let dir = data_dir();
    let (stdout, _, code) =
        run_cli_with_input(&dir, &["run", "--work", "10", "--theme", "green"], "q\n");
    assert_eq!(code, 0);
    assert!(stdout.contains("10:00"));
}

#[test]
fn test_completions_generate() {
    let dir = data_dir();
    let (stdout, _, code) = run_cli(&dir, &["completions", "bash"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("pomodoro-cli"));
}
