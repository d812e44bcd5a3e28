//! Integration tests for the netdiag CLI skeleton: help, version and
//! argument parsing.

#![allow(clippy::expect_used)]

use assert_cmd::Command;
use predicates::prelude::*;

fn netdiag() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("netdiag"));
    cmd.env("NO_COLOR", "1");
    cmd
}

// --- Help and version tests ---

#[test]
fn test_cli_no_args_shows_help_and_exits_two() {
    // clap with arg_required_else_help shows help on stderr and exits 2
    netdiag().assert().code(2).stderr(predicate::str::contains(
        "Network diagnostics against a single target",
    ));
}

#[test]
fn test_cli_help_flag_lists_commands() {
    netdiag()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("run"))
        .stdout(predicate::str::contains("probes"))
        .stdout(predicate::str::contains("version"));
}

#[test]
fn test_run_help_lists_inputs_and_env_vars() {
    netdiag()
        .args(["run", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--target"))
        .stdout(predicate::str::contains("NETDIAG_TARGET"))
        .stdout(predicate::str::contains("--archive-artifacts"))
        .stdout(predicate::str::contains("--timeout-seconds"));
}

#[test]
fn test_cli_version_flag_shows_version() {
    netdiag()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("netdiag"));
}

#[test]
fn test_version_command_shows_version() {
    netdiag()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains(concat!(
            "netdiag ",
            env!("CARGO_PKG_VERSION")
        )));
}

#[test]
fn test_version_command_json_outputs_valid_json() {
    let output = netdiag()
        .args(["version", "--json"])
        .output()
        .expect("run");
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(value["version"], env!("CARGO_PKG_VERSION"));
}

#[test]
fn test_unknown_subcommand_fails() {
    netdiag()
        .arg("frobnicate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unrecognized subcommand"));
}

#[test]
fn test_probes_json_lists_registered_probes() {
    let output = netdiag()
        .args(["probes", "--json"])
        .output()
        .expect("run");
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json");
    let names: Vec<&str> = value["probes"]
        .as_array()
        .expect("array")
        .iter()
        .filter_map(|p| p["name"].as_str())
        .collect();
    assert_eq!(
        names,
        ["ping", "dns", "traceroute", "https", "netstat", "ifconfig", "script"]
    );
}

#[test]
fn test_probes_human_output() {
    netdiag()
        .arg("probes")
        .assert()
        .success()
        .stdout(predicate::str::contains("Registered probes"))
        .stdout(predicate::str::contains("traceroute"));
}
