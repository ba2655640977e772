//! Tests for the run use-case and readiness polling.

#![allow(clippy::expect_used)]

use std::time::Duration;

use afs_cli::application::services::run::{ReadyPolicy, RunOptions, run_environment};
use afs_cli::domain::{ContainerError, EnvError};

use crate::helpers::{
    CannedTransport, RecordingReporter, ScriptedRunner, err_output, health_ok, inspect_json,
    inspect_missing, ok_output,
};

const FAST: ReadyPolicy = ReadyPolicy {
    timeout: Duration::from_secs(2),
    interval: Duration::from_millis(1),
};

fn opts<'a>(envs: &'a [String]) -> RunOptions<'a> {
    RunOptions {
        image: "calc:latest",
        name: "calc-demo",
        envs,
        pull: false,
        host_port: None,
        wait: Some(FAST),
    }
}

fn fresh_runner() -> ScriptedRunner {
    ScriptedRunner::new()
        .on("inspect", inspect_missing("calc-demo"))
        .on("inspect", ok_output(&inspect_json("calc-demo", "running", Some(49153))))
        .on("run", ok_output(b"4f1c0ffee\n"))
}

#[tokio::test]
async fn starts_container_and_waits_for_health() {
    let runner = fresh_runner();
    let transport = CannedTransport::healthy();
    let envs = vec!["MODE=fast".to_string()];

    let outcome = run_environment(&runner.engine(), &transport, &RecordingReporter::default(), &opts(&envs))
        .await
        .expect("run");

    assert_eq!(outcome.name, "calc-demo");
    assert_eq!(outcome.image, "calc:latest");
    assert_eq!(outcome.endpoint, "http://127.0.0.1:49153");
    assert_eq!(outcome.health, Some(health_ok()));
    assert_eq!(runner.subcommands(), vec!["inspect", "run", "inspect"]);
    assert!(
        runner.command_lines()[1].contains("-e MODE=fast calc:latest"),
        "got: {:?}",
        runner.command_lines()
    );
    assert_eq!(*transport.probes.borrow(), 1);
}

#[tokio::test]
async fn existing_container_is_refused() {
    let runner = ScriptedRunner::new().on(
        "inspect",
        ok_output(&inspect_json("calc-demo", "exited", None)),
    );
    let err = run_environment(
        &runner.engine(),
        &CannedTransport::healthy(),
        &RecordingReporter::default(),
        &opts(&[]),
    )
    .await
    .expect_err("already exists");
    assert!(matches!(
        err.downcast_ref::<ContainerError>(),
        Some(ContainerError::AlreadyExists(_))
    ));
    assert!(err.to_string().contains("afs stop calc-demo"));
    assert_eq!(runner.subcommands(), vec!["inspect"]);
}

#[tokio::test]
async fn pull_runs_before_start() {
    let runner = fresh_runner().on("pull", ok_output(b""));
    run_environment(
        &runner.engine(),
        &CannedTransport::healthy(),
        &RecordingReporter::default(),
        &RunOptions {
            pull: true,
            ..opts(&[])
        },
    )
    .await
    .expect("run");
    assert_eq!(runner.subcommands(), vec!["inspect", "pull", "run", "inspect"]);
    assert_eq!(runner.command_lines()[1], "docker pull calc:latest");
}

#[tokio::test]
async fn start_failure_carries_stderr() {
    let runner = ScriptedRunner::new()
        .on("inspect", inspect_missing("calc-demo"))
        .on(
            "run",
            err_output(125, b"Unable to find image 'calc:latest' locally\n"),
        );
    let err = run_environment(
        &runner.engine(),
        &CannedTransport::healthy(),
        &RecordingReporter::default(),
        &opts(&[]),
    )
    .await
    .expect_err("start fails");
    match err.downcast_ref::<ContainerError>() {
        Some(ContainerError::StartFailed { name, stderr }) => {
            assert_eq!(name, "calc-demo");
            assert_eq!(stderr, "Unable to find image 'calc:latest' locally");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn polls_until_healthy() {
    let runner = fresh_runner();
    let transport = CannedTransport::with_health(vec![
        Err("connection refused".to_string()),
        Err("connection reset".to_string()),
        Ok(health_ok()),
    ]);
    run_environment(&runner.engine(), &transport, &RecordingReporter::default(), &opts(&[]))
        .await
        .expect("eventually ready");
    assert_eq!(*transport.probes.borrow(), 3);
}

#[tokio::test]
async fn times_out_when_never_ready() {
    let runner = fresh_runner();
    let transport = CannedTransport::with_health(vec![Err("connection refused".to_string())]);
    let err = run_environment(
        &runner.engine(),
        &transport,
        &RecordingReporter::default(),
        &RunOptions {
            wait: Some(ReadyPolicy {
                timeout: Duration::from_millis(30),
                interval: Duration::from_millis(5),
            }),
            ..opts(&[])
        },
    )
    .await
    .expect_err("not ready");
    assert!(matches!(
        err.downcast_ref::<ContainerError>(),
        Some(ContainerError::NotReady { .. })
    ));
    assert!(err.to_string().contains("afs stop calc-demo"));
    assert!(!runner.subcommands().contains(&"rm".to_string()));
}

#[tokio::test]
async fn container_exiting_during_startup_stops_polling() {
    let runner = fresh_runner().on(
        "inspect",
        ok_output(&inspect_json("calc-demo", "exited", Some(49153))),
    );
    let transport = CannedTransport::with_health(vec![Err("connection refused".to_string())]);
    let err = run_environment(&runner.engine(), &transport, &RecordingReporter::default(), &opts(&[]))
        .await
        .expect_err("exited");
    assert!(matches!(
        err.downcast_ref::<ContainerError>(),
        Some(ContainerError::ExitedDuringStartup(_))
    ));
    assert_eq!(*transport.probes.borrow(), 1);
}

#[tokio::test]
async fn no_wait_skips_health_probe() {
    let runner = fresh_runner();
    let transport = CannedTransport::healthy();
    let outcome = run_environment(
        &runner.engine(),
        &transport,
        &RecordingReporter::default(),
        &RunOptions {
            wait: None,
            ..opts(&[])
        },
    )
    .await
    .expect("run");
    assert_eq!(outcome.health, None);
    assert_eq!(*transport.probes.borrow(), 0);
}

#[tokio::test]
async fn invalid_env_pair_fails_before_docker() {
    let runner = ScriptedRunner::new();
    let envs = vec!["NOT-VALID".to_string()];
    let err = run_environment(
        &runner.engine(),
        &CannedTransport::healthy(),
        &RecordingReporter::default(),
        &opts(&envs),
    )
    .await
    .expect_err("bad env");
    assert!(matches!(
        err.downcast_ref::<EnvError>(),
        Some(EnvError::InvalidEnvVar(_))
    ));
    assert!(runner.calls().is_empty());
}

#[tokio::test]
async fn container_crashing_right_after_start_points_at_logs() {
    let runner = ScriptedRunner::new()
        .on("inspect", inspect_missing("calc-demo"))
        .on("inspect", ok_output(&inspect_json("calc-demo", "exited", None)))
        .on("run", ok_output(b"4f1c0ffee\n"));
    let transport = CannedTransport::healthy();
    let err = run_environment(&runner.engine(), &transport, &RecordingReporter::default(), &opts(&[]))
        .await
        .expect_err("crashed");
    assert!(matches!(
        err.downcast_ref::<ContainerError>(),
        Some(ContainerError::ExitedDuringStartup(_))
    ));
    assert!(err.to_string().contains("docker logs calc-demo"), "got: {err}");
    assert_eq!(*transport.probes.borrow(), 0);
}
