//! `afs publish`: tag and push an image to a registry.

use std::process::ExitCode;

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::application::services::config_service;
use crate::application::services::publish::{self, PublishOptions};
use crate::commands::docker_username;

/// Arguments for the publish command.
#[derive(Args)]
pub struct PublishArgs {
    /// Local image to publish
    pub image: String,

    /// Target registry, e.g. docker.io/alice [default: registry.default, then docker.io/$DOCKER_USERNAME]
    #[arg(long)]
    pub registry: Option<String>,

    /// Publish under a different tag
    #[arg(long, short)]
    pub tag: Option<String>,
}

/// Run `afs publish`.
///
/// Without a resolvable registry the publishing steps are printed and the
/// command succeeds without running docker.
///
/// # Errors
///
/// Returns an error if tagging or pushing fails.
pub async fn run(args: &PublishArgs, app: &AppContext) -> Result<ExitCode> {
    let config = config_service::load_config(&app.config_store)?;
    let username = docker_username();
    let registry = config.registry_for(args.registry.as_deref(), username.as_deref());

    let reporter = app.reporter();
    let outcome = publish::publish_image(
        &app.engine,
        &reporter,
        &PublishOptions {
            image: &args.image,
            registry: registry.as_deref(),
            tag: args.tag.as_deref(),
            docker_username: username.as_deref(),
        },
    )
    .await?;
    drop(reporter);

    app.renderer().render_publish(&outcome)?;
    Ok(ExitCode::SUCCESS)
}
