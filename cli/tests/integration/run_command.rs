//! Integration tests for `netdiag run` using probes that never touch the
//! network (unknown names, empty scripts).

#![allow(clippy::expect_used)]

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const INPUT_VARS: &[&str] = &[
    "NETDIAG_TARGET",
    "NETDIAG_TOOLS",
    "NETDIAG_CAPTURE_NETWORK_TRACE",
    "NETDIAG_CUSTOM_SCRIPT",
    "NETDIAG_SANITIZE_OUTPUTS",
    "NETDIAG_ARCHIVE_ARTIFACTS",
    "NETDIAG_SAVE_ARTIFACTS",
    "NETDIAG_ARTIFACT_NAME",
    "NETDIAG_TIMEOUT_SECONDS",
    "NETDIAG_RETRIES",
    "NETDIAG_OUTPUT_DIR",
    "NETDIAG_STAGING_DIR",
];

fn netdiag(dir: &TempDir) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("netdiag"));
    cmd.env("NO_COLOR", "1");
    for var in INPUT_VARS {
        cmd.env_remove(var);
    }
    cmd.arg("run")
        .arg("--output-dir")
        .arg(dir.path().join("out"))
        .arg("--staging-dir")
        .arg(dir.path().join("stage"))
        .args(["--archive-artifacts", "false"]);
    cmd
}

fn report(dir: &TempDir) -> serde_json::Value {
    let text = std::fs::read_to_string(dir.path().join("out").join("report.json"))
        .expect("report.json");
    serde_json::from_str(&text).expect("json")
}

fn exists(dir: &TempDir, rel: &str) -> bool {
    dir.path().join(rel).exists()
}

#[test]
fn test_missing_target_fails_with_task_failed() {
    let dir = TempDir::new().expect("tempdir");
    netdiag(&dir)
        .args(["--tools", "ping"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Task failed: Input required: target"));
    assert!(!exists(&dir, "out"));
}

#[test]
fn test_missing_target_json_error_object() {
    let dir = TempDir::new().expect("tempdir");
    let output = netdiag(&dir).arg("--json").output().expect("run");
    assert_eq!(output.status.code(), Some(1));
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(value["error"], true);
    assert_eq!(value["message"], "Input required: target");
}

#[test]
fn test_unknown_tool_still_completes() {
    let dir = TempDir::new().expect("tempdir");
    netdiag(&dir)
        .args(["--target", "example.com", "--tools", "unknowntool"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Network troubleshooting completed"));

    let value = report(&dir);
    assert_eq!(value["target"], "example.com");
    assert_eq!(value["results"][0]["tool"], "unknowntool");
    assert_eq!(value["results"][0]["status"], "unknown_tool");
    assert_eq!(value["results"][0]["error"], "Unknown tool: unknowntool");
    let summary =
        std::fs::read_to_string(dir.path().join("out").join("summary.txt")).expect("summary");
    assert!(summary.contains("- unknowntool: ERROR: Unknown tool: unknowntool"));
    assert!(exists(&dir, "out/unknowntool.log"));
}

#[test]
fn test_inputs_from_environment() {
    let dir = TempDir::new().expect("tempdir");
    netdiag(&dir)
        .env("NETDIAG_TARGET", "env.example")
        .env("NETDIAG_TOOLS", "first\nsecond")
        .assert()
        .success();

    let value = report(&dir);
    assert_eq!(value["target"], "env.example");
    let tools: Vec<&str> = value["results"]
        .as_array()
        .expect("results")
        .iter()
        .filter_map(|r| r["tool"].as_str())
        .collect();
    assert_eq!(tools, ["first", "second"]);
}

#[test]
fn test_repeated_tool_flags_append_in_order() {
    let dir = TempDir::new().expect("tempdir");
    netdiag(&dir)
        .args(["--target", "example.com", "--tools", "alpha"])
        .args(["--tool", "beta", "--tool", "gamma"])
        .assert()
        .success();

    let tools: Vec<String> = report(&dir)["results"]
        .as_array()
        .expect("results")
        .iter()
        .filter_map(|r| r["tool"].as_str().map(str::to_string))
        .collect();
    assert_eq!(tools, ["alpha", "beta", "gamma"]);
}

#[test]
fn test_empty_custom_script_is_config_error() {
    let dir = TempDir::new().expect("tempdir");
    netdiag(&dir)
        .args(["--target", "example.com", "--tools", "script"])
        .assert()
        .success();

    let value = report(&dir);
    assert_eq!(value["results"][0]["status"], "config_error");
    assert_eq!(value["results"][0]["error"], "No custom script provided");
}

#[test]
fn test_json_run_prints_report() {
    let dir = TempDir::new().expect("tempdir");
    let output = netdiag(&dir)
        .args(["--target", "example.com", "--tools", "nope", "--json"])
        .output()
        .expect("run");
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(value["target"], "example.com");
    assert_eq!(value["results"][0]["status"], "unknown_tool");
}

#[test]
fn test_save_artifacts_copies_to_staging() {
    let dir = TempDir::new().expect("tempdir");
    netdiag(&dir)
        .args(["--target", "example.com", "--tools", "nope"])
        .args(["--save-artifacts", "--artifact-name", "bundle"])
        .assert()
        .success();

    assert!(exists(&dir, "stage/bundle/report.json"));
    assert!(exists(&dir, "stage/bundle/summary.txt"));
}

#[cfg(unix)]
#[test]
fn test_custom_script_runs_and_output_is_logged() {
    let dir = TempDir::new().expect("tempdir");
    netdiag(&dir)
        .args(["--target", "example.com", "--tools", "script"])
        .args(["--custom-script", "#!/bin/sh\necho from-script"])
        .assert()
        .success();

    let log = std::fs::read_to_string(dir.path().join("out").join("script.log")).expect("log");
    assert_eq!(log, "from-script\n");
    assert!(exists(&dir, "out/custom-script.sh"));
}

#[cfg(unix)]
#[test]
fn test_sanitized_script_output() {
    let dir = TempDir::new().expect("tempdir");
    netdiag(&dir)
        .args(["--target", "example.com", "--tools", "script", "--sanitize-outputs"])
        .args([
            "--custom-script",
            "#!/bin/sh\necho 'Authorization: Bearer s3cr3t'; echo key=ABCDEFGHIJKLMNOPQRSTUVWXYZ",
        ])
        .assert()
        .success();

    let log = std::fs::read_to_string(dir.path().join("out").join("script.log")).expect("log");
    assert!(log.contains("Authorization: <<REDACTED>>"), "{log}");
    assert!(log.contains("key=<<REDACTED>>"), "{log}");
    assert!(!log.contains("s3cr3t"));
}
