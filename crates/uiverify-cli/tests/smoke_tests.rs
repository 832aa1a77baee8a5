//! Smoke tests for the uiverify binary
//!
//! None of these launch a browser: runs are stopped by the readiness wait
//! or by argument validation before a session is opened.

#![allow(deprecated)] // Command::cargo_bin
#![allow(clippy::expect_used, clippy::unwrap_used)]

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::net::TcpListener;
use tempfile::TempDir;

fn uiverify() -> Command {
    let mut cmd = Command::cargo_bin("uiverify").expect("uiverify binary should exist");
    cmd.env_remove("UIVERIFY_BASE_URL")
        .env_remove("UIVERIFY_CONFIG")
        .env_remove("RUST_LOG");
    cmd
}

/// A local URL nothing is listening on
fn closed_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

const VALID: &str = r#"version: "1.0"
name: login smoke
vars:
  username:
    prefix: testuser_
steps:
  - type: navigate
    url: /
  - type: fill
    label: Username
    value: "{username}"
  - type: click
    role: button
    name: Sign In
  - type: assert_visible
    text: User not found
"#;

#[test]
fn test_version_flag() {
    uiverify()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("0.1.0"));
}

#[test]
fn test_help_lists_subcommands() {
    uiverify()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("run"))
        .stdout(predicate::str::contains("list"))
        .stdout(predicate::str::contains("validate"));
}

#[test]
fn test_no_args_fails() {
    uiverify().assert().failure();
}

#[test]
fn test_run_help_mentions_env() {
    uiverify()
        .args(["run", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("UIVERIFY_BASE_URL"))
        .stdout(predicate::str::contains("--ready-timeout-ms"));
}

#[test]
fn test_list_shows_builtins() {
    uiverify()
        .args(["--color", "never", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("signup-login-filters"))
        .stdout(predicate::str::contains("error-messages"))
        .stdout(predicate::str::contains("new-ui"));
}

#[test]
fn test_validate_good_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("login.yaml");
    fs::write(&path, VALID).unwrap();

    uiverify()
        .args(["--color", "never", "validate"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("login smoke"));
}

#[test]
fn test_validate_undeclared_variable_fails() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.yaml");
    fs::write(&path, VALID.replace("{username}", "{nobody}")).unwrap();

    uiverify()
        .args(["--color", "never", "validate"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("bad.yaml"))
        .stderr(predicate::str::contains("failed validation"));
}

#[test]
fn test_validate_missing_file_fails() {
    uiverify()
        .args(["validate", "/nonexistent/scenario.yaml"])
        .assert()
        .failure();
}

#[test]
fn test_run_unknown_scenario_fails() {
    uiverify()
        .args(["run", "no-such-flow"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no-such-flow"));
}

#[test]
fn test_run_rejects_non_http_base_url() {
    uiverify()
        .args(["run", "new-ui", "--base-url", "ftp://example.com"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration error"));
}

#[test]
fn test_run_fails_when_target_never_ready() {
    uiverify()
        .args(["-q", "run", "new-ui", "--ready-timeout-ms", "300", "--base-url"])
        .arg(closed_url())
        .assert()
        .failure()
        .stderr(predicate::str::contains("not ready after 300ms"));
}

#[test]
fn test_base_url_from_environment() {
    uiverify()
        .env("UIVERIFY_BASE_URL", closed_url())
        .args(["-q", "run", "error-messages", "--ready-timeout-ms", "200"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not ready after 200ms"));
}
