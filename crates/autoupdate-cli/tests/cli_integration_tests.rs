//! CLI integration tests
//!
//! Run the `autoupdate` binary against snapshot files in a temp dir.

use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};

use serde_json::Value;
use tempfile::TempDir;

fn write_snapshot(temp_dir: &TempDir, name: &str, json: &str) -> PathBuf {
    let path = temp_dir.path().join(name);
    fs::write(&path, json).unwrap();
    path
}

fn run_cli(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_autoupdate"))
        .args(args)
        .output()
        .expect("Failed to execute CLI")
}

fn setup_pair(temp_dir: &TempDir) -> (PathBuf, PathBuf) {
    let old = write_snapshot(
        temp_dir,
        "old.json",
        r#"{"sections":[{"id":"a","rows":[{"id":"r1","content":1},{"id":"r2","content":1},{"id":"r3","content":{"k":"v"}}]}]}"#,
    );
    let new = write_snapshot(
        temp_dir,
        "new.json",
        r#"{"sections":[{"id":"a","rows":[{"id":"r1","content":1},{"id":"r3","content":{"k":"w"}}]},{"id":"b","rows":[{"id":"r9","content":null}]}]}"#,
    );
    (old, new)
}

#[test]
fn test_cli_diff_prints_sorted_commands() {
    // GIVEN old/new snapshot files
    let temp_dir = TempDir::new().unwrap();
    let (old, new) = setup_pair(&temp_dir);

    // WHEN diffing
    let output = run_cli(&[
        "diff",
        "--old",
        old.to_str().unwrap(),
        "--new",
        new.to_str().unwrap(),
    ]);

    // THEN stdout holds the commands in delete-friendly order
    assert!(
        output.status.success(),
        "CLI command should succeed. Stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let commands: Vec<Value> = serde_json::from_slice(&output.stdout).unwrap();
    let kinds: Vec<&str> = commands
        .iter()
        .map(|c| c["command_type"]["kind"].as_str().unwrap())
        .collect();
    assert_eq!(kinds, vec!["add_section", "add_row", "update_row", "remove_row"]);
    assert!(commands.iter().all(|c| c.get("resolved_index_path").is_none()));
}

#[test]
fn test_cli_replay_prints_resolved_commands_and_layout() {
    let temp_dir = TempDir::new().unwrap();
    let (old, new) = setup_pair(&temp_dir);

    let output = run_cli(&[
        "replay",
        "--old",
        old.to_str().unwrap(),
        "--new",
        new.to_str().unwrap(),
    ]);

    assert!(
        output.status.success(),
        "CLI command should succeed. Stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let report: Value = serde_json::from_slice(&output.stdout).unwrap();

    let commands = report["commands"].as_array().unwrap();
    assert_eq!(commands.len(), 4);
    assert!(commands
        .iter()
        .all(|c| c.get("resolved_index_path").is_some()));

    let calls: Vec<&str> = report["calls"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c.as_str().unwrap())
        .collect();
    assert_eq!(calls.first(), Some(&"begin_updates"));
    assert_eq!(calls.last(), Some(&"end_updates"));
    assert!(calls.contains(&"remove_rows (0, 1)"));

    assert_eq!(
        report["layout"],
        serde_json::json!({
            "sections": [
                {"id": "a", "rows": ["r1", "r3"]},
                {"id": "b", "rows": ["r9"]}
            ]
        })
    );
}

#[test]
fn test_cli_duplicate_identifier_exits_with_code() {
    let temp_dir = TempDir::new().unwrap();
    let old = write_snapshot(
        &temp_dir,
        "old.json",
        r#"{"sections":[{"id":"a"},{"id":"a"}]}"#,
    );
    let new = write_snapshot(&temp_dir, "new.json", r#"{"sections":[]}"#);

    let output = run_cli(&[
        "diff",
        "--old",
        old.to_str().unwrap(),
        "--new",
        new.to_str().unwrap(),
    ]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ERR_IDENTITY_VIOLATION"), "stderr: {}", stderr);
}

#[test]
fn test_cli_missing_file_is_io_error() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("nope.json");
    let new = write_snapshot(&temp_dir, "new.json", r#"{"sections":[]}"#);

    let output = run_cli(&[
        "replay",
        "--old",
        missing.to_str().unwrap(),
        "--new",
        new.to_str().unwrap(),
    ]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("ERR_IO"));
}

#[test]
fn test_cli_log_flag_keeps_stdout_clean() {
    // Logs go to stderr, so stdout still parses as JSON
    let temp_dir = TempDir::new().unwrap();
    let (old, new) = setup_pair(&temp_dir);

    let output = run_cli(&[
        "--log",
        "json",
        "diff",
        "--old",
        old.to_str().unwrap(),
        "--new",
        new.to_str().unwrap(),
    ]);

    assert!(output.status.success());
    let commands: Vec<Value> = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(commands.len(), 4);
}
