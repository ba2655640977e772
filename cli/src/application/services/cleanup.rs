//! Application service: stop, remove and list environment containers.

use afs_common::ContainerSummary;
use anyhow::Result;

use crate::application::ports::{ContainerInspector, ContainerLifecycle, ProgressReporter};
use crate::application::services::container::{self, stderr_text};
use crate::domain::container::{ContainerState, parse_ps};
use crate::domain::env::validate_container_name;

/// What `stop_environment` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopOutcome {
    /// No container with that name exists.
    Missing,
    /// Stopped and left in place (`--keep`).
    Stopped,
    /// Stopped (if it was running) and removed.
    Removed,
}

/// Stop a container and, unless `keep` is set, remove it.
///
/// # Errors
///
/// Returns an error if the name is invalid or a Docker command fails.
pub async fn stop_environment(
    engine: &(impl ContainerLifecycle + ContainerInspector),
    reporter: &impl ProgressReporter,
    name: &str,
    keep: bool,
) -> Result<StopOutcome> {
    validate_container_name(name)?;
    let state = container::state(engine, name).await?;
    if state == ContainerState::NotFound {
        return Ok(StopOutcome::Missing);
    }

    if matches!(
        state,
        ContainerState::Running | ContainerState::Paused | ContainerState::Restarting
    ) {
        reporter.step(&format!("stopping {name}..."));
        let output = engine.stop(name).await?;
        anyhow::ensure!(
            output.status.success(),
            "docker stop {name} failed: {}",
            stderr_text(&output)
        );
    }
    if keep {
        reporter.success(&format!("{name} stopped"));
        return Ok(StopOutcome::Stopped);
    }

    reporter.step(&format!("removing {name}..."));
    let output = engine.remove(name).await?;
    anyhow::ensure!(
        output.status.success(),
        "docker rm {name} failed: {}",
        stderr_text(&output)
    );
    reporter.success(&format!("{name} removed"));
    Ok(StopOutcome::Removed)
}

/// Every container started by `afs run`, running or not.
///
/// # Errors
///
/// Returns an error if `docker ps` fails or prints something unparseable.
pub async fn list_environments(engine: &impl ContainerInspector) -> Result<Vec<ContainerSummary>> {
    let output = engine.list_managed().await?;
    anyhow::ensure!(
        output.status.success(),
        "docker ps failed: {}",
        stderr_text(&output)
    );
    parse_ps(&output.stdout)
}
