//! `afs build`: build (and optionally push) an environment image.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Args;
use clap::builder::FalseyValueParser;

use crate::app::AppContext;
use crate::application::services::build::{self, BuildOptions};
use crate::application::services::config_service;
use crate::commands::docker_username;
use crate::infra::fs::LocalFs;

/// Arguments for the build command.
#[derive(Args)]
pub struct BuildArgs {
    /// Environment directory containing a Dockerfile
    #[arg(default_value = ".")]
    pub dir: PathBuf,

    /// Image tag [default: <dirname>:latest]
    #[arg(long, short)]
    pub tag: Option<String>,

    /// Push the image after building
    #[arg(long, env = "DOCKER_PUSH", value_parser = FalseyValueParser::new())]
    pub push: bool,

    /// Registry to qualify the tag with, e.g. docker.io/alice
    #[arg(long)]
    pub registry: Option<String>,

    /// Build without the layer cache
    #[arg(long)]
    pub no_cache: bool,
}

/// Run `afs build`.
///
/// # Errors
///
/// Returns an error if the directory is unusable, no registry is available
/// for a push, or docker fails.
pub async fn run(args: &BuildArgs, app: &AppContext) -> Result<ExitCode> {
    let dir = std::fs::canonicalize(&args.dir)
        .with_context(|| format!("cannot access {}", args.dir.display()))?;

    let username = docker_username();
    let registry = if args.push || args.registry.is_some() {
        let config = config_service::load_config(&app.config_store)?;
        config.registry_for(args.registry.as_deref(), username.as_deref())
    } else {
        None
    };

    let reporter = app.reporter();
    let outcome = build::build_environment(
        &app.engine,
        &LocalFs,
        &reporter,
        &BuildOptions {
            dir: &dir,
            tag: args.tag.as_deref(),
            registry: registry.as_deref(),
            push: args.push,
            no_cache: args.no_cache,
            docker_username: username.as_deref(),
        },
    )
    .await?;
    drop(reporter);

    app.renderer().render_build(&outcome)?;
    Ok(ExitCode::SUCCESS)
}
