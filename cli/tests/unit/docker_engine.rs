//! Argument construction tests for `DockerEngine`.
//!
//! Every docker invocation afs makes is asserted verbatim here.

#![allow(clippy::expect_used)]

use afs_cli::application::ports::{
    BuildSpec, ContainerInspector, ContainerLifecycle, ImageBuilder, RunSpec,
};
use afs_cli::domain::env::parse_env_vars;
use afs_cli::infra::docker::{build_args, run_args};

use crate::helpers::{ScriptedRunner, ok_output};

fn line(parts: &[&str]) -> String {
    parts.join(" ")
}

#[tokio::test]
async fn build_passes_tag_label_and_context() {
    let runner = ScriptedRunner::new().on("build", ok_output(b""));
    runner
        .engine()
        .build(&BuildSpec {
            context: "/work/calc",
            tag: "calc:latest",
            env_name: "calc",
            no_cache: false,
        })
        .await
        .expect("build");
    assert_eq!(
        runner.command_lines(),
        vec![line(&["docker", "build", "-t", "calc:latest", "--label", "afs.env=calc", "/work/calc"])]
    );
}

#[test]
fn build_args_with_no_cache() {
    let args = build_args(&BuildSpec {
        context: ".",
        tag: "docker.io/alice/calc:v1",
        env_name: "calc",
        no_cache: true,
    });
    assert_eq!(
        args,
        vec!["build", "-t", "docker.io/alice/calc:v1", "--no-cache", "--label", "afs.env=calc", "."]
    );
}

#[tokio::test]
async fn run_publishes_actor_port_and_passes_envs_in_order() {
    let envs = parse_env_vars(&["MODE=fast".to_string(), "EMPTY=".to_string()]).expect("envs");
    let runner = ScriptedRunner::new().on("run", ok_output(b"abc123\n"));
    runner
        .engine()
        .run(&RunSpec {
            image: "calc:latest",
            name: "calc-demo",
            envs: &envs,
            host_port: None,
        })
        .await
        .expect("run");
    assert_eq!(
        runner.command_lines(),
        vec![line(&[
            "docker", "run", "-d", "--name", "calc-demo", "--label", "afs.managed=true", "-p",
            "8000", "-e", "MODE=fast", "-e", "EMPTY=", "calc:latest",
        ])]
    );
}

#[test]
fn run_args_with_fixed_host_port() {
    let args = run_args(&RunSpec {
        image: "calc:latest",
        name: "calc",
        envs: &[],
        host_port: Some(8080),
    });
    let publish = args.iter().position(|a| a == "-p").expect("-p present");
    assert_eq!(args[publish + 1], "8080:8000");
    assert_eq!(args.last().map(String::as_str), Some("calc:latest"));
}

#[tokio::test]
async fn lifecycle_and_image_commands() {
    let runner = ScriptedRunner::new()
        .on("stop", ok_output(b""))
        .on("rm", ok_output(b""))
        .on("tag", ok_output(b""))
        .on("push", ok_output(b""))
        .on("pull", ok_output(b""));
    let engine = runner.engine();
    engine.stop("calc").await.expect("stop");
    engine.remove("calc").await.expect("rm");
    engine
        .tag("calc:latest", "docker.io/alice/calc:latest")
        .await
        .expect("tag");
    engine.push("docker.io/alice/calc:latest").await.expect("push");
    engine.pull("python:3.12-slim").await.expect("pull");
    assert_eq!(
        runner.command_lines(),
        vec![
            "docker stop calc",
            "docker rm calc",
            "docker tag calc:latest docker.io/alice/calc:latest",
            "docker push docker.io/alice/calc:latest",
            "docker pull python:3.12-slim",
        ]
    );
}

#[tokio::test]
async fn inspection_commands() {
    let runner = ScriptedRunner::new()
        .on("inspect", ok_output(b"[]"))
        .on("ps", ok_output(b""))
        .on("version", ok_output(b"27.1.1\n"));
    let engine = runner.engine();
    engine.inspect("calc").await.expect("inspect");
    engine.list_managed().await.expect("ps");
    engine.version().await.expect("version");
    assert_eq!(
        runner.command_lines(),
        vec![
            "docker inspect --type container calc",
            "docker ps -a --filter label=afs.managed=true --format {{json .}}",
            "docker version --format {{.Client.Version}}",
        ]
    );
}

#[tokio::test]
async fn runner_errors_carry_command_context() {
    let runner = ScriptedRunner::new();
    let err = runner.engine().stop("calc").await.expect_err("unscripted");
    assert!(format!("{err:#}").contains("docker stop"), "got: {err:#}");
}
