//! End-to-end tests for the `aria` binary.

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

#[allow(deprecated)]
fn aria() -> Command {
    Command::cargo_bin("aria").expect("aria binary not found")
}

fn write_policy(dir: &TempDir, name: &str, body: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, body).expect("write policy fixture");
    path
}

fn arg(path: &Path) -> &str {
    path.to_str().expect("utf-8 temp path")
}

const VALID_POLICY: &str = r#"
name: Web App
description: Assistant policy for the web app
version: "1.0.0"
model: assistant
defaults:
  allow: [review, suggest]
  require: [human_review]
paths:
  "src/**":
    allow: [suggest]
    require: [tests]
"#;

#[test]
fn help_mentions_product_name() {
    aria()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("ARIA - AI Participation Manager"));
}

#[test]
fn validate_accepts_valid_policy() {
    let dir = TempDir::new().unwrap();
    let policy = write_policy(&dir, "aria.yml", VALID_POLICY);

    aria()
        .args(["validate", arg(&policy)])
        .assert()
        .success()
        .stdout(predicate::str::contains("Policy is valid"));
}

#[test]
fn validate_rejects_disallowed_action() {
    let dir = TempDir::new().unwrap();
    let policy = write_policy(
        &dir,
        "aria.yml",
        "version: '1.0'\nmodel: guardian\ndefaults:\n  allow: [review]\n",
    );

    aria()
        .args(["validate", arg(&policy)])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Action 'review' not allowed for model guardian in defaults",
        ))
        .stderr(predicate::str::contains("Policy validation failed"));
}

#[test]
fn validate_missing_file_fails() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nope.yml");

    aria()
        .args(["validate", arg(&missing)])
        .assert()
        .failure()
        .stderr(predicate::str::contains("resource not found"));
}

#[test]
fn validate_json_output_has_result_shape() {
    let dir = TempDir::new().unwrap();
    let policy = write_policy(
        &dir,
        "aria.yml",
        "version: '1'\nmodel: observer\npaths:\n  '**': {}\n",
    );

    let output = aria()
        .args(["validate", arg(&policy), "--strict", "--format", "json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let report: serde_json::Value = serde_json::from_slice(&output).expect("json report");
    assert_eq!(report["valid"], true);
    assert_eq!(report["errors"].as_array().unwrap().len(), 0);
    assert_eq!(report["warnings"].as_array().unwrap().len(), 2);
}

#[test]
fn validate_honours_input_format_override() {
    let dir = TempDir::new().unwrap();
    let policy = write_policy(
        &dir,
        "policy.conf",
        "version = \"1.0.0\"\nmodel = \"partner\"\n\n[defaults]\nallow = [\"execute\"]\n",
    );

    aria()
        .args(["validate", arg(&policy), "--input-format", "toml"])
        .assert()
        .success();
}

#[test]
fn models_lists_every_model() {
    let assert = aria().arg("models").assert().success();
    let stdout = String::from_utf8_lossy(&assert.get_output().stdout).to_string();
    for model in ["guardian", "observer", "assistant", "collaborator", "partner"] {
        assert!(stdout.contains(model), "missing {model} in:\n{stdout}");
    }
}

#[test]
fn ide_rules_writes_cursor_file() {
    let dir = TempDir::new().unwrap();
    let policy = write_policy(&dir, "aria.yml", VALID_POLICY);
    let target = dir.path().join(".cursorrules");
    std::fs::write(&target, "# Team conventions\nUse tabs.\n").unwrap();

    aria()
        .args(["ide-rules", arg(&policy), "--ide", "cursor", "--output", arg(&target)])
        .assert()
        .success()
        .stdout(predicate::str::contains("Rules updated in"));

    let content = std::fs::read_to_string(&target).unwrap();
    assert!(content.starts_with("# Team conventions\nUse tabs.\n"));
    assert!(content.contains("# ARIA Policy: Web App"));
    assert!(content.contains("AI assistants may suggest files in src/**"));
}

#[test]
fn ide_rules_refuses_invalid_policy() {
    let dir = TempDir::new().unwrap();
    let policy = write_policy(&dir, "aria.yml", "version: '1.0'\nmodel: nobody\n");
    let target = dir.path().join(".windsurfrules");

    aria()
        .args(["ide-rules", arg(&policy), "--output", arg(&target)])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid model: nobody"));

    assert!(!target.exists());
}

#[test]
fn ide_rules_honours_input_format_override() {
    let dir = TempDir::new().unwrap();
    let policy = write_policy(
        &dir,
        "policy.conf",
        "name = \"Ops\"\nversion = \"1.0.0\"\nmodel = \"observer\"\n\n[defaults]\nallow = [\"review\"]\n",
    );
    let target = dir.path().join(".windsurfrules");

    aria()
        .args(["ide-rules", arg(&policy), "--input-format", "toml", "--output", arg(&target)])
        .assert()
        .success();

    let content = std::fs::read_to_string(&target).unwrap();
    assert!(content.contains("# ARIA Policy: Ops"));
    assert!(content.contains("AI assistants may review by default"));
}

#[test]
fn ignore_replaces_previous_block_in_default_file() {
    let dir = TempDir::new().unwrap();
    let policy = write_policy(
        &dir,
        "aria.yml",
        "version: '1.0.0'\nmodel: assistant\npaths:\n  'secrets/':\n    effect: deny\n",
    );
    let target = dir.path().join(".cursorignore");
    std::fs::write(
        &target,
        "*.log\n\n# BEGIN ARIA POLICY\n*.old\n# END ARIA POLICY\n\n*.tmp\n",
    )
    .unwrap();

    aria()
        .current_dir(dir.path())
        .args(["ignore", arg(&policy), "--ide", "cursor"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Ignore patterns updated in"));

    let content = std::fs::read_to_string(&target).unwrap();
    assert!(content.starts_with("*.log\n\n# BEGIN ARIA POLICY\n"));
    assert!(content.ends_with("# END ARIA POLICY\n\n*.tmp\n"));
    assert!(!content.contains("*.old"));
    assert!(content.contains("\nsecrets/\n"));
    assert!(content.contains("\n*.pem\n"));
}

#[test]
fn ignore_refuses_invalid_policy() {
    let dir = TempDir::new().unwrap();
    let policy = write_policy(&dir, "aria.yml", "version: '1.0'\nmodel: guardian\ndefaults:\n  allow: [execute]\n");
    let target = dir.path().join(".codeiumignore");

    aria()
        .args(["ignore", arg(&policy), "--output", arg(&target)])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Action 'execute' not allowed for model guardian"));

    assert!(!target.exists());
}
