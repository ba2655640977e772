//! Container queries shared by the run, call and cleanup use-cases.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.

use std::process::Output;

use anyhow::{Context, Result};

use crate::application::ports::ContainerInspector;
use crate::domain::call::local_endpoint;
use crate::domain::container::{self, ContainerInfo, ContainerState};
use crate::domain::error::ContainerError;

/// Trimmed stderr of a finished command, for error messages.
pub(crate) fn stderr_text(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).trim().to_string()
}

fn is_missing(output: &Output) -> bool {
    let stderr = stderr_text(output);
    stderr.contains("No such object") || stderr.contains("No such container")
}

/// Inspect a container, returning `None` when it does not exist.
///
/// # Errors
///
/// Returns an error if the engine cannot be reached or its output cannot be
/// parsed.
pub async fn info(engine: &impl ContainerInspector, name: &str) -> Result<Option<ContainerInfo>> {
    let output = engine.inspect(name).await?;
    if !output.status.success() {
        if is_missing(&output) {
            return Ok(None);
        }
        anyhow::bail!("docker inspect {name} failed: {}", stderr_text(&output));
    }
    container::parse_inspect(&output.stdout)
}

/// Current state of a container.
///
/// # Errors
///
/// Same as [`info`].
pub async fn state(engine: &impl ContainerInspector, name: &str) -> Result<ContainerState> {
    Ok(info(engine, name)
        .await?
        .map_or(ContainerState::NotFound, |i| i.state))
}

/// HTTP endpoint of a running container's actor runtime.
///
/// # Errors
///
/// Returns [`ContainerError::NotFound`], [`ContainerError::NotRunning`] or
/// [`ContainerError::NoPublishedPort`].
pub async fn endpoint(engine: &impl ContainerInspector, name: &str) -> Result<String> {
    let info = info(engine, name)
        .await
        .with_context(|| format!("resolving endpoint of {name}"))?
        .ok_or_else(|| ContainerError::NotFound(name.to_string()))?;
    if info.state != ContainerState::Running {
        return Err(ContainerError::NotRunning {
            name: name.to_string(),
            state: info.state.to_string(),
        }
        .into());
    }
    let port = info
        .host_port
        .ok_or_else(|| ContainerError::NoPublishedPort(name.to_string()))?;
    Ok(local_endpoint(port))
}
