//! Integration tests for `afs call` against a live endpoint.

#![allow(clippy::expect_used)]

use httpmock::prelude::*;
use serde_json::json;

use crate::cli_tests::afs;

fn afs_local() -> assert_cmd::Command {
    let mut cmd = afs();
    cmd.env("NO_PROXY", "127.0.0.1,localhost");
    cmd
}

fn call(server: &MockServer, method: &str, args: &[&str]) -> std::process::Output {
    let mut cmd = afs_local();
    cmd.args(["call", "calc-demo", method, "--endpoint", &server.base_url(), "--timeout", "5"]);
    for arg in args {
        cmd.args(["--arg", arg]);
    }
    cmd.output().expect("spawn afs")
}

#[test]
fn test_call_prints_result_and_exits_zero() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/call")
            .json_body(json!({"method": "add", "kwargs": {"a": 10, "b": 5}}));
        then.status(200).json_body(json!({"status": "ok", "result": 15}));
    });

    let output = call(&server, "add", &["a=10", "b=5"]);

    mock.assert();
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "15");
}

#[test]
fn test_call_error_response_exits_one_without_error_line() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/call");
        then.status(200).json_body(json!({
            "status": "error",
            "error": "division by zero",
            "error_type": "ZeroDivisionError"
        }));
    });

    let output = call(&server, "divide", &["a=1", "b=0"]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("divide() raised ZeroDivisionError: division by zero"),
        "got: {stderr}"
    );
    assert!(
        !stderr.lines().any(|l| l.trim_start().starts_with("Error:")),
        "unexpected error line: {stderr}"
    );
    assert!(output.stdout.is_empty());
}

#[test]
fn test_call_error_response_in_json_mode_prints_full_reply() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/call");
        then.status(200).json_body(json!({
            "status": "error",
            "error": "division by zero",
            "error_type": "ZeroDivisionError"
        }));
    });

    let output = afs_local()
        .args(["call", "calc-demo", "divide", "--json", "--timeout", "5", "--endpoint", &server.base_url()])
        .args(["--arg", "a=1", "--arg", "b=0"])
        .output()
        .expect("spawn afs");

    assert_eq!(output.status.code(), Some(1));
    let value: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout is JSON");
    assert_eq!(value["status"], "error");
    assert_eq!(value["error_type"], "ZeroDivisionError");
}
