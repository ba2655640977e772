//! CLI structure, global flags and early validation.

#![allow(clippy::expect_used)]

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

pub fn afs() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("afs"));
    cmd.env("NO_COLOR", "1")
        .env_remove("AFS_LOG")
        .env_remove("DOCKER_USERNAME")
        .env_remove("DOCKER_PUSH");
    cmd
}

/// `afs` with its config file redirected into `dir`.
pub fn afs_in(dir: &TempDir) -> Command {
    let mut cmd = afs();
    cmd.env("AFS_CONFIG", dir.path().join("config.yaml"));
    cmd
}

// --- Help and version ---

#[test]
fn test_cli_no_args_shows_help() {
    afs().assert().code(2).stderr(predicate::str::contains(
        "Scaffold, build, run and call containerized actor environments",
    ));
}

#[test]
fn test_cli_help_lists_commands() {
    let output = afs().arg("--help").output().expect("spawn afs");
    assert!(output.status.success());
    let help = String::from_utf8_lossy(&output.stdout);
    for command in ["init", "build", "run", "call", "stop", "ps", "publish", "templates", "config"] {
        assert!(help.contains(command), "help is missing {command}:\n{help}");
    }
}

#[test]
fn test_cli_version_flag_shows_version() {
    afs()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("afs 0.1.0"));
}

#[test]
fn test_version_command_shows_version() {
    afs()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("afs 0.1.0"));
}

#[test]
fn test_version_command_json_is_valid() {
    let output = afs()
        .args(["version", "--json"])
        .output()
        .expect("spawn afs");
    assert!(output.status.success());
    let value: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout is JSON");
    assert_eq!(value["version"], "0.1.0");
    assert!(value.get("docker").is_some());
}

#[test]
fn test_unknown_command_fails() {
    afs()
        .arg("deploy")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("unrecognized subcommand"));
}

// --- Validation before any docker call ---

#[test]
fn test_call_rejects_malformed_argument() {
    afs()
        .args(["call", "calc-demo", "add", "--arg", "oops"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid argument 'oops'"));
}

#[test]
fn test_call_rejects_invalid_method_name() {
    afs()
        .args(["call", "calc-demo", "not-a-method"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid method name"));
}

#[test]
fn test_call_to_closed_endpoint_fails() {
    let dir = TempDir::new().expect("tempdir");
    afs_in(&dir)
        .args([
            "call",
            "calc-demo",
            "add",
            "--arg",
            "a=1",
            "--endpoint",
            "http://127.0.0.1:1",
            "--timeout",
            "2",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("calling calc-demo.add"));
}

#[test]
fn test_call_failure_in_json_mode_prints_error_object() {
    let output = afs()
        .args(["call", "calc-demo", "add", "--arg", "oops", "--json"])
        .output()
        .expect("spawn afs");
    assert!(!output.status.success());
    let value: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout is JSON");
    assert_eq!(value["error"], true);
    assert_eq!(value["code"], "COMMAND_FAILED");
}

#[test]
fn test_call_timeout_out_of_range_rejected() {
    afs()
        .args(["call", "calc-demo", "add", "--timeout", "0"])
        .assert()
        .code(2);
}

#[test]
fn test_run_rejects_invalid_env_pair() {
    let dir = TempDir::new().expect("tempdir");
    afs_in(&dir)
        .args(["run", "calc:latest", "--name", "calc-demo", "--env", "NOT-VALID"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid environment variable 'NOT-VALID'"));
}

#[test]
fn test_run_requires_name() {
    afs()
        .args(["run", "calc:latest"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--name"));
}

#[test]
fn test_build_requires_dockerfile() {
    let dir = TempDir::new().expect("tempdir");
    afs_in(&dir)
        .arg("build")
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("No Dockerfile found"));
}

#[test]
fn test_stop_rejects_invalid_name() {
    afs()
        .args(["stop", "bad name!"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid container name"));
}

#[test]
fn test_publish_without_registry_prints_instructions() {
    let dir = TempDir::new().expect("tempdir");
    afs_in(&dir)
        .args(["publish", "calc:latest"])
        .assert()
        .success()
        .stdout(predicate::str::contains("docker login"))
        .stdout(predicate::str::contains("docker push <username>/calc:latest"));
}
