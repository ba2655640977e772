//! `afs stop`: stop and remove an environment container.

use std::process::ExitCode;

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::application::services::cleanup;

/// Arguments for the stop command.
#[derive(Args)]
pub struct StopArgs {
    /// Container to stop
    pub name: String,

    /// Stop only; keep the container for inspection
    #[arg(long)]
    pub keep: bool,
}

/// Run `afs stop`. A missing container is not an error.
///
/// # Errors
///
/// Returns an error if docker fails.
pub async fn run(args: &StopArgs, app: &AppContext) -> Result<ExitCode> {
    let reporter = app.reporter();
    let outcome = cleanup::stop_environment(&app.engine, &reporter, &args.name, args.keep).await?;
    drop(reporter);
    app.renderer().render_stop(&args.name, outcome)?;
    Ok(ExitCode::SUCCESS)
}
