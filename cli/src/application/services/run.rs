//! Application service: start an environment container and wait for it.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.

use std::time::Duration;

use afs_common::HealthStatus;
use anyhow::{Context, Result};

use crate::application::ports::{
    CallTransport, ContainerEngine, ContainerInspector, ContainerLifecycle, ImageBuilder,
    ProgressReporter, RunSpec,
};
use crate::application::services::container::{self, stderr_text};
use crate::domain::call::local_endpoint;
use crate::domain::container::ContainerState;
use crate::domain::env::{parse_env_vars, validate_container_name};
use crate::domain::error::ContainerError;
use crate::domain::image::ImageRef;

/// Polling policy for the readiness probe.
#[derive(Debug, Clone, Copy)]
pub struct ReadyPolicy {
    /// Give up after this long.
    pub timeout: Duration,
    /// Delay between probes.
    pub interval: Duration,
}

impl ReadyPolicy {
    #[must_use]
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            timeout,
            interval: Duration::from_millis(500),
        }
    }
}

/// Inputs of `afs run`.
pub struct RunOptions<'a> {
    pub image: &'a str,
    pub name: &'a str,
    /// Raw `KEY=VALUE` pairs.
    pub envs: &'a [String],
    /// `docker pull` before running.
    pub pull: bool,
    /// Host port for the actor port; `None` lets Docker choose.
    pub host_port: Option<u16>,
    /// Wait for the health endpoint; `None` returns right after start.
    pub wait: Option<ReadyPolicy>,
}

/// What `run_environment` produced.
#[derive(Debug, PartialEq, Eq)]
pub struct RunOutcome {
    pub name: String,
    pub image: String,
    /// Call endpoint on the host.
    pub endpoint: String,
    /// Health reported by the runtime, when readiness was awaited.
    pub health: Option<HealthStatus>,
}

/// Start a detached container for `opts.image` named `opts.name`.
///
/// # Errors
///
/// Returns an error for invalid names or env pairs, an existing container
/// with the same name, a failing pull/run, or a readiness timeout.
pub async fn run_environment(
    engine: &impl ContainerEngine,
    transport: &impl CallTransport,
    reporter: &impl ProgressReporter,
    opts: &RunOptions<'_>,
) -> Result<RunOutcome> {
    validate_container_name(opts.name)?;
    let image = ImageRef::parse(opts.image)?.to_string();
    let envs = parse_env_vars(opts.envs)?;

    if container::state(engine, opts.name).await? != ContainerState::NotFound {
        return Err(ContainerError::AlreadyExists(opts.name.to_string()).into());
    }

    if opts.pull {
        reporter.step(&format!("pulling {image}..."));
        let output = engine.pull(&image).await?;
        anyhow::ensure!(
            output.status.success(),
            "docker pull {image} failed: {}",
            stderr_text(&output)
        );
    }

    reporter.step(&format!("starting {}...", opts.name));
    let output = engine
        .run(&RunSpec {
            image: &image,
            name: opts.name,
            envs: &envs,
            host_port: opts.host_port,
        })
        .await?;
    if !output.status.success() {
        return Err(ContainerError::StartFailed {
            name: opts.name.to_string(),
            stderr: stderr_text(&output),
        }
        .into());
    }

    let endpoint = started_endpoint(engine, opts.name).await?;
    tracing::debug!(container = opts.name, %endpoint, "container started");

    let health = match opts.wait {
        Some(policy) => {
            reporter.step("waiting for the environment to become ready...");
            Some(wait_ready(engine, transport, opts.name, &endpoint, policy).await?)
        }
        None => None,
    };

    reporter.success(&format!("{} running at {endpoint}", opts.name));
    Ok(RunOutcome {
        name: opts.name.to_string(),
        image,
        endpoint,
        health,
    })
}

/// Endpoint of a container that `docker run -d` just started. A container
/// that is already gone or stopped crashed on startup.
async fn started_endpoint(engine: &impl ContainerInspector, name: &str) -> Result<String> {
    match container::info(engine, name).await? {
        Some(info) if info.state == ContainerState::Running => info
            .host_port
            .map(local_endpoint)
            .ok_or_else(|| ContainerError::NoPublishedPort(name.to_string()).into()),
        _ => Err(ContainerError::ExitedDuringStartup(name.to_string()).into()),
    }
}

/// Poll the health endpoint until it reports ok, the container dies, or
/// `policy.timeout` elapses.
///
/// # Errors
///
/// Returns [`ContainerError::ExitedDuringStartup`] or
/// [`ContainerError::NotReady`].
pub async fn wait_ready(
    engine: &impl ContainerInspector,
    transport: &impl CallTransport,
    name: &str,
    endpoint: &str,
    policy: ReadyPolicy,
) -> Result<HealthStatus> {
    let deadline = tokio::time::Instant::now() + policy.timeout;
    loop {
        match transport.health(endpoint).await {
            Ok(health) if health.is_ok() => return Ok(health),
            Ok(health) => tracing::debug!(status = %health.status, "runtime not ready"),
            Err(e) => tracing::debug!(error = %e, "health probe failed"),
        }

        let state = container::state(engine, name)
            .await
            .context("checking container state")?;
        if state != ContainerState::Running {
            return Err(ContainerError::ExitedDuringStartup(name.to_string()).into());
        }

        if tokio::time::Instant::now() + policy.interval > deadline {
            return Err(ContainerError::NotReady {
                name: name.to_string(),
                secs: policy.timeout.as_secs(),
            }
            .into());
        }
        tokio::time::sleep(policy.interval).await;
    }
}
