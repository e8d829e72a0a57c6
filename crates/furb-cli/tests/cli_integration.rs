//! Integration tests for the `furb` binary.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

const LIST_CALL: &str = r#"{
    "fullname": "app",
    "path": "app.py",
    "defs": [{
        "kind": "ExpressionStmt",
        "pos": {"line": 3, "column": 4},
        "expr": {
            "kind": "CallExpr",
            "pos": {"line": 3, "column": 4},
            "callee": {"kind": "NameExpr", "pos": {"line": 3, "column": 4}, "name": "list", "fullname": "builtins.list"}
        }
    }]
}"#;

fn furb(cwd: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_furb"))
        .args(args)
        .current_dir(cwd)
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run furb")
}

fn project() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir_all(dir.path().join("trees")).unwrap();
    fs::write(dir.path().join("trees/app.json"), LIST_CALL).unwrap();
    dir
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

// ────────────────────────────────────────────────────────────────────────────
// check
// ────────────────────────────────────────────────────────────────────────────

#[test]
fn test_check_reports_text() {
    let dir = project();
    let output = furb(dir.path(), &["check", "trees"]);

    assert_eq!(output.status.code(), Some(1));
    let text = stdout(&output);
    let expected = format!(
        "{}:3:5 [FURB112]: Use `[]` instead of `list()`",
        Path::new("trees").join("app.json").display()
    );
    assert!(text.contains(&expected), "got: {}", text);
    assert!(text.contains("Run `furb explain ERR` to further explain an error."));
}

#[test]
fn test_check_json_output() {
    let dir = project();
    let output = furb(dir.path(), &["check", "trees", "--format", "json", "--quiet"]);

    assert_eq!(output.status.code(), Some(1));
    let value: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    let entries = value.as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["code"], "FURB112");
    assert_eq!(entries[0]["line"], 3);
    assert_eq!(entries[0]["column"], 5);
}

#[test]
fn test_check_ignore_flag_passes() {
    let dir = project();
    let output = furb(dir.path(), &["check", "trees", "--ignore", "FURB112"]);
    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).is_empty());
}

#[test]
fn test_check_reads_settings_file() {
    let dir = project();
    fs::write(dir.path().join("furb.toml"), "disable = [112]\n").unwrap();
    let output = furb(dir.path(), &["check", "trees"]);
    assert_eq!(output.status.code(), Some(0));
}

#[test]
fn test_check_invalid_tree_fails() {
    let dir = project();
    fs::write(dir.path().join("trees/broken.json"), "[1, 2").unwrap();
    let output = furb(dir.path(), &["check", "trees", "--ignore", "112"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("broken.json"));
}

// ────────────────────────────────────────────────────────────────────────────
// explain / list
// ────────────────────────────────────────────────────────────────────────────

#[test]
fn test_explain_known_code() {
    let dir = tempfile::tempdir().unwrap();
    let output = furb(dir.path(), &["explain", "FURB101"]);
    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.starts_with("FURB101"));
    assert!(text.contains("Bad:") && text.contains("Good:"));
}

#[test]
fn test_explain_unknown_code() {
    let dir = tempfile::tempdir().unwrap();
    let output = furb(dir.path(), &["explain", "999"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Error code FURB999 not found"));
}

#[test]
fn test_list_shows_checks() {
    let dir = tempfile::tempdir().unwrap();
    let output = furb(dir.path(), &["list"]);
    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("FURB101"));
    assert!(text.contains("WithStmt"));
    assert!(text.contains("furb_engine::checks::readability::use_literal"));
}
