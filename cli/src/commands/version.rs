//! Version command

use std::process::ExitCode;

use anyhow::Result;

use crate::app::AppContext;
use crate::application::ports::ContainerInspector as _;

/// Run the version command. A missing docker CLI is reported, not fatal.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub async fn run(app: &AppContext) -> Result<ExitCode> {
    let version = env!("CARGO_PKG_VERSION");
    let docker = match app.engine.version().await {
        Ok(output) if output.status.success() => {
            Some(String::from_utf8_lossy(&output.stdout).trim().to_string())
        }
        Ok(_) => None,
        Err(e) => {
            tracing::debug!(error = %e, "docker version unavailable");
            None
        }
    };
    app.renderer().render_version(version, docker.as_deref())?;
    Ok(ExitCode::SUCCESS)
}
