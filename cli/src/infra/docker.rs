//! Infrastructure implementation of the container engine port traits.
//!
//! `DockerEngine<R>` routes every docker CLI call through a `CommandRunner`.
//! Commands that move image layers get `LONG_CMD_TIMEOUT`; everything else
//! uses the runner's default.

use std::process::Output;

use afs_common::{ACTOR_PORT, LABEL_ENV, labels};
use anyhow::{Context, Result};

use crate::application::ports::{
    BuildSpec, CommandRunner, ContainerInspector, ContainerLifecycle, ImageBuilder, RunSpec,
};
use crate::infra::command_runner::{LONG_CMD_TIMEOUT, TokioCommandRunner};

const DOCKER: &str = "docker";

/// Infrastructure adapter that routes all docker CLI calls through a `CommandRunner`.
///
/// Generic over `R: CommandRunner` so that tests can inject a mock runner
/// without spawning real processes.
pub struct DockerEngine<R: CommandRunner> {
    runner: R,
}

impl<R: CommandRunner> DockerEngine<R> {
    pub fn new(runner: R) -> Self {
        Self { runner }
    }
}

impl DockerEngine<TokioCommandRunner> {
    /// Convenience constructor for production use.
    #[must_use]
    pub fn default_runner() -> Self {
        Self::new(TokioCommandRunner::default())
    }
}

/// Argument vector for `docker build`.
#[must_use]
pub fn build_args(spec: &BuildSpec<'_>) -> Vec<String> {
    let mut args = vec!["build".to_string(), "-t".to_string(), spec.tag.to_string()];
    if spec.no_cache {
        args.push("--no-cache".to_string());
    }
    args.push("--label".to_string());
    args.push(format!("{LABEL_ENV}={}", spec.env_name));
    args.push(spec.context.to_string());
    args
}

/// Argument vector for `docker run`.
#[must_use]
pub fn run_args(spec: &RunSpec<'_>) -> Vec<String> {
    let publish = match spec.host_port {
        Some(port) => format!("{port}:{ACTOR_PORT}"),
        None => ACTOR_PORT.to_string(),
    };
    let mut args = vec![
        "run".to_string(),
        "-d".to_string(),
        "--name".to_string(),
        spec.name.to_string(),
        "--label".to_string(),
        labels::managed_label(),
        "-p".to_string(),
        publish,
    ];
    for env in spec.envs {
        args.push("-e".to_string());
        args.push(env.to_arg());
    }
    args.push(spec.image.to_string());
    args
}

fn as_strs(args: &[String]) -> Vec<&str> {
    args.iter().map(String::as_str).collect()
}

impl<R: CommandRunner> ImageBuilder for DockerEngine<R> {
    async fn build(&self, spec: &BuildSpec<'_>) -> Result<Output> {
        let args = build_args(spec);
        self.runner
            .run_with_timeout(DOCKER, &as_strs(&args), LONG_CMD_TIMEOUT)
            .await
            .context("docker build")
    }

    async fn tag(&self, source: &str, target: &str) -> Result<Output> {
        self.runner
            .run(DOCKER, &["tag", source, target])
            .await
            .context("docker tag")
    }

    async fn push(&self, image: &str) -> Result<Output> {
        self.runner
            .run_with_timeout(DOCKER, &["push", image], LONG_CMD_TIMEOUT)
            .await
            .context("docker push")
    }

    async fn pull(&self, image: &str) -> Result<Output> {
        self.runner
            .run_with_timeout(DOCKER, &["pull", image], LONG_CMD_TIMEOUT)
            .await
            .context("docker pull")
    }
}

impl<R: CommandRunner> ContainerLifecycle for DockerEngine<R> {
    async fn run(&self, spec: &RunSpec<'_>) -> Result<Output> {
        let args = run_args(spec);
        self.runner
            .run(DOCKER, &as_strs(&args))
            .await
            .context("docker run")
    }

    async fn stop(&self, name: &str) -> Result<Output> {
        self.runner
            .run(DOCKER, &["stop", name])
            .await
            .context("docker stop")
    }

    async fn remove(&self, name: &str) -> Result<Output> {
        self.runner
            .run(DOCKER, &["rm", name])
            .await
            .context("docker rm")
    }
}

impl<R: CommandRunner> ContainerInspector for DockerEngine<R> {
    async fn inspect(&self, name: &str) -> Result<Output> {
        self.runner
            .run(DOCKER, &["inspect", "--type", "container", name])
            .await
            .context("docker inspect")
    }

    async fn list_managed(&self) -> Result<Output> {
        let filter = labels::managed_filter();
        self.runner
            .run(
                DOCKER,
                &["ps", "-a", "--filter", &filter, "--format", "{{json .}}"],
            )
            .await
            .context("docker ps")
    }

    async fn version(&self) -> Result<Output> {
        self.runner
            .run(DOCKER, &["version", "--format", "{{.Client.Version}}"])
            .await
            .context("docker version")
    }
}
