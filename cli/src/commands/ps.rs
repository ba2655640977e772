//! `afs ps`: list environment containers.

use std::process::ExitCode;

use anyhow::Result;

use crate::app::AppContext;
use crate::application::services::cleanup;

/// Run `afs ps`.
///
/// # Errors
///
/// Returns an error if `docker ps` fails.
pub async fn run(app: &AppContext) -> Result<ExitCode> {
    let containers = cleanup::list_environments(&app.engine).await?;
    app.renderer().render_ps(&containers)?;
    Ok(ExitCode::SUCCESS)
}
