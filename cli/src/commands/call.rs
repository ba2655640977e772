//! `afs call`: invoke an actor method in a running environment.

use std::process::ExitCode;
use std::time::Duration;

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::application::services::call::{self as service, CallOptions};
use crate::application::services::config_service;

/// Arguments for the call command.
#[derive(Args)]
pub struct CallArgs {
    /// Container running the environment
    pub container: String,

    /// Actor method to invoke
    pub method: String,

    /// Keyword argument; values are parsed as JSON when possible (repeatable)
    #[arg(long = "arg", short = 'a', value_name = "KEY=VALUE")]
    pub args: Vec<String>,

    /// Call endpoint URL, bypassing container lookup
    #[arg(long, value_name = "URL")]
    pub endpoint: Option<String>,

    /// Request timeout in seconds [default: call.timeout_secs]
    #[arg(long, value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..=3600))]
    pub timeout: Option<u64>,
}

/// Run `afs call`.
///
/// Exits 1 when the method raised, after printing the error it raised.
///
/// # Errors
///
/// Returns an error if arguments are malformed, the container cannot be
/// reached, or the reply is not a valid call response.
pub async fn run(args: &CallArgs, app: &AppContext) -> Result<ExitCode> {
    let timeout = match args.timeout {
        Some(secs) => secs,
        None => config_service::load_config(&app.config_store)?.call.timeout_secs,
    };

    let outcome = service::call_method(
        &app.engine,
        &app.transport,
        &CallOptions {
            container: &args.container,
            method: &args.method,
            args: &args.args,
            endpoint: args.endpoint.as_deref(),
            timeout: Duration::from_secs(timeout),
        },
    )
    .await?;

    app.renderer().render_call(&outcome)?;
    if outcome.response.is_ok() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}
