//! Tests for the call use-case.

#![allow(clippy::expect_used)]

use std::time::Duration;

use afs_cli::application::services::call::{CallOptions, call_method};
use afs_cli::domain::{CallError, ContainerError};
use afs_common::CallResponse;
use serde_json::json;

use crate::helpers::{CannedTransport, ScriptedRunner, inspect_json, inspect_missing, ok_output};

fn opts<'a>(args: &'a [String]) -> CallOptions<'a> {
    CallOptions {
        container: "calc-demo",
        method: "add",
        args,
        endpoint: None,
        timeout: Duration::from_secs(60),
    }
}

fn ok_result(value: serde_json::Value) -> CallResponse {
    CallResponse::Ok { result: value }
}

fn args(raw: &[&str]) -> Vec<String> {
    raw.iter().map(|s| (*s).to_string()).collect()
}

#[tokio::test]
async fn resolves_endpoint_from_inspect_and_sends_kwargs() {
    let runner = ScriptedRunner::new().on(
        "inspect",
        ok_output(&inspect_json("calc-demo", "running", Some(49153))),
    );
    let transport = CannedTransport::responding(ok_result(json!({"value": 15})));
    let raw = args(&["a=10", "b=5"]);

    let outcome = call_method(&runner.engine(), &transport, &opts(&raw))
        .await
        .expect("call");

    assert_eq!(outcome.endpoint, "http://127.0.0.1:49153");
    assert_eq!(outcome.response, ok_result(json!({"value": 15})));
    let requests = transport.requests.borrow();
    let (endpoint, request, timeout) = &requests[0];
    assert_eq!(endpoint, "http://127.0.0.1:49153");
    assert_eq!(request.method, "add");
    assert_eq!(
        serde_json::to_value(&request.kwargs).expect("kwargs"),
        json!({"a": 10, "b": 5})
    );
    assert_eq!(*timeout, Duration::from_secs(60));
}

#[tokio::test]
async fn explicit_endpoint_skips_docker() {
    let runner = ScriptedRunner::new();
    let transport = CannedTransport::responding(ok_result(json!([])));
    let outcome = call_method(
        &runner.engine(),
        &transport,
        &CallOptions {
            method: "get_history",
            endpoint: Some("http://localhost:9000/"),
            ..opts(&[])
        },
    )
    .await
    .expect("call");
    assert_eq!(outcome.endpoint, "http://localhost:9000");
    assert!(runner.calls().is_empty());
}

#[tokio::test]
async fn error_response_is_not_an_err() {
    let runner = ScriptedRunner::new().on(
        "inspect",
        ok_output(&inspect_json("calc-demo", "running", Some(49153))),
    );
    let transport = CannedTransport::responding(CallResponse::Error {
        error: "division by zero".to_string(),
        error_type: Some("ZeroDivisionError".to_string()),
    });
    let raw = args(&["a=1", "b=0"]);
    let outcome = call_method(
        &runner.engine(),
        &transport,
        &CallOptions {
            method: "divide",
            ..opts(&raw)
        },
    )
    .await
    .expect("round trip succeeded");
    assert!(!outcome.response.is_ok());
}

#[tokio::test]
async fn missing_container_is_not_found() {
    let runner = ScriptedRunner::new().on("inspect", inspect_missing("calc-demo"));
    let err = call_method(
        &runner.engine(),
        &CannedTransport::responding(ok_result(json!(null))),
        &opts(&[]),
    )
    .await
    .expect_err("missing");
    assert!(matches!(
        err.downcast_ref::<ContainerError>(),
        Some(ContainerError::NotFound(_))
    ));
}

#[tokio::test]
async fn stopped_container_is_not_running() {
    let runner = ScriptedRunner::new().on(
        "inspect",
        ok_output(&inspect_json("calc-demo", "exited", None)),
    );
    let err = call_method(
        &runner.engine(),
        &CannedTransport::responding(ok_result(json!(null))),
        &opts(&[]),
    )
    .await
    .expect_err("not running");
    match err.downcast_ref::<ContainerError>() {
        Some(ContainerError::NotRunning { state, .. }) => assert_eq!(state, "exited"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn running_container_without_port_is_rejected() {
    let runner = ScriptedRunner::new().on(
        "inspect",
        ok_output(&inspect_json("calc-demo", "running", None)),
    );
    let err = call_method(
        &runner.engine(),
        &CannedTransport::responding(ok_result(json!(null))),
        &opts(&[]),
    )
    .await
    .expect_err("no port");
    assert!(matches!(
        err.downcast_ref::<ContainerError>(),
        Some(ContainerError::NoPublishedPort(_))
    ));
}

#[tokio::test]
async fn malformed_argument_fails_before_any_io() {
    let runner = ScriptedRunner::new();
    let transport = CannedTransport::responding(ok_result(json!(null)));
    let raw = args(&["a=1", "oops"]);
    let err = call_method(&runner.engine(), &transport, &opts(&raw))
        .await
        .expect_err("bad arg");
    assert!(matches!(
        err.downcast_ref::<CallError>(),
        Some(CallError::InvalidArg(_))
    ));
    assert!(runner.calls().is_empty());
    assert!(transport.requests.borrow().is_empty());
}

#[tokio::test]
async fn transport_failure_names_the_call() {
    let transport = CannedTransport::healthy();
    let err = call_method(
        &ScriptedRunner::new().engine(),
        &transport,
        &CallOptions {
            endpoint: Some("http://127.0.0.1:1"),
            ..opts(&[])
        },
    )
    .await
    .expect_err("refused");
    let chain = format!("{err:#}");
    assert!(chain.contains("calling calc-demo.add"), "got: {chain}");
    assert!(chain.contains("connection refused"), "got: {chain}");
}
