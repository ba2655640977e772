//! `afs run`: start an environment container and wait until it is ready.

use std::process::ExitCode;
use std::time::Duration;

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::application::services::config_service;
use crate::application::services::run::{self as service, ReadyPolicy, RunOptions};

/// Arguments for the run command.
#[derive(Args)]
pub struct RunArgs {
    /// Image to run
    pub image: String,

    /// Container name
    #[arg(long)]
    pub name: String,

    /// Environment variable for the container (repeatable)
    #[arg(long = "env", short = 'e', value_name = "KEY=VALUE")]
    pub envs: Vec<String>,

    /// Pull the image before running
    #[arg(long)]
    pub pull: bool,

    /// Host port for the call endpoint [default: chosen by Docker]
    #[arg(long, short)]
    pub port: Option<u16>,

    /// Return as soon as the container has started
    #[arg(long)]
    pub no_wait: bool,
}

/// Run `afs run`.
///
/// # Errors
///
/// Returns an error if validation fails, the container already exists,
/// docker fails, or the runtime does not become ready in time.
pub async fn run(args: &RunArgs, app: &AppContext) -> Result<ExitCode> {
    let config = config_service::load_config(&app.config_store)?;
    let wait = (!args.no_wait).then(|| {
        ReadyPolicy::with_timeout(Duration::from_secs(config.runtime.ready_timeout_secs))
    });

    let reporter = app.reporter();
    let outcome = service::run_environment(
        &app.engine,
        &app.transport,
        &reporter,
        &RunOptions {
            image: &args.image,
            name: &args.name,
            envs: &args.envs,
            pull: args.pull,
            host_port: args.port,
            wait,
        },
    )
    .await?;
    drop(reporter);

    app.renderer().render_run(&outcome)?;
    Ok(ExitCode::SUCCESS)
}
