//! Runs the `unitils` binary end to end and checks exit codes and output.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

fn unitils(args: &[&str], dir: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_unitils"))
        .args(args)
        .current_dir(dir)
        .env("NO_COLOR", "1")
        .env_remove("UNITILS_CONFIG")
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

fn workspace(expected: &str, actual: &str) -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("expected.json"), expected).unwrap();
    fs::write(dir.path().join("actual.json"), actual).unwrap();
    dir
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn equal_documents_exit_zero() {
    let dir = workspace(r#"{"id": 1, "tags": ["a", "b"]}"#, r#"{"tags": ["a", "b"], "id": 1}"#);
    let output = unitils(&["compare", "expected.json", "actual.json"], dir.path());
    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("are equal (STRICT)"));
}

#[test]
fn different_documents_exit_one_with_report() {
    let dir = workspace(r#"{"tags": ["a", "b"]}"#, r#"{"tags": ["b", "a"]}"#);
    let output = unitils(&["compare", "expected.json", "actual.json"], dir.path());
    assert_eq!(output.status.code(), Some(1));
    let out = stdout(&output);
    assert!(out.starts_with("Expected: {\"tags\"=[\"a\", \"b\"]}\n"));
    assert!(out.contains("Field: [\"tags\"][0]"));
    assert!(out.contains("documents differ (STRICT)"));

    let output = unitils(&["compare", "--lenient-order", "expected.json", "actual.json"], dir.path());
    assert_eq!(output.status.code(), Some(0));
}

#[test]
fn bad_input_exits_two() {
    let dir = workspace("[1, 2", "[1, 2]");
    let output = unitils(&["compare", "expected.json", "actual.json"], dir.path());
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("expected.json is not valid JSON"));

    let output = unitils(&["compare", "missing.json", "actual.json"], dir.path());
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn json_output() {
    let dir = workspace("[1, 2, 3]", "[3, 2, 1]");
    let output = unitils(&["--format", "json", "compare", "--lenient", "expected.json", "actual.json"], dir.path());
    assert_eq!(output.status.code(), Some(0));
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["equal"], true);
    assert_eq!(value["modes"], serde_json::json!(["IGNORE_DEFAULTS", "LENIENT_ORDER"]));
    assert!(value["report"].is_null());
}

#[test]
fn config_file_drives_style_and_lenient_modes() {
    let dir = workspace(r#"{"when": null, "n": [1, 2]}"#, r#"{"when": "x", "n": [2, 1]}"#);
    fs::write(
        dir.path().join("unitils.toml"),
        "[formatter]\nstyle = \"tree\"\n\n[assert]\nlenient_modes = [\"IGNORE_DEFAULTS\"]\n",
    )
    .unwrap();

    let output = unitils(
        &["compare", "--config", "unitils.toml", "--lenient", "expected.json", "actual.json"],
        dir.path(),
    );
    assert_eq!(output.status.code(), Some(1));
    let out = stdout(&output);
    assert!(out.contains("[L] 1"));
    assert!(out.contains("documents differ (IGNORE_DEFAULTS)"));

    let output = unitils(&["config", "--config", "unitils.toml"], dir.path());
    assert_eq!(output.status.code(), Some(0));
    let out = stdout(&output);
    assert!(out.contains("style = \"tree\""));
    assert!(out.contains("IGNORE_DEFAULTS"));
    assert!(!out.contains("LENIENT_ORDER"));
}
