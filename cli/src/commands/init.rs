//! `afs init`: scaffold a new environment from a template.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Args;

use crate::app::AppContext;
use crate::application::ports::LocalFs as _;
use crate::application::services::scaffold::{self, ScaffoldOptions};
use crate::infra::fs::LocalFs;

/// Arguments for the init command.
#[derive(Args)]
pub struct InitArgs {
    /// Environment name; also the directory created
    pub name: String,

    /// Template to render (see `afs templates`)
    #[arg(long, short, default_value = "actor")]
    pub template: String,

    /// Directory to create the environment in [default: current directory]
    #[arg(long, value_name = "PATH")]
    pub dir: Option<PathBuf>,

    /// Overwrite template files in an existing, non-empty directory
    #[arg(long)]
    pub force: bool,
}

/// Run `afs init`.
///
/// # Errors
///
/// Returns an error if the name or template is invalid, the target is not
/// empty, or a file cannot be written.
pub fn run(args: &InitArgs, app: &AppContext) -> Result<ExitCode> {
    let parent = match &args.dir {
        Some(dir) => dir.clone(),
        None => std::env::current_dir().context("cannot determine current directory")?,
    };

    scaffold::resolve_template(&app.templates, &args.name, &args.template)?;

    let mut force = args.force;
    let target = parent.join(&args.name);
    if !force && LocalFs.exists(&target) && !LocalFs.is_empty_dir(&target)? {
        force = app.confirm(
            &format!("{} is not empty. Overwrite template files?", target.display()),
            false,
        )?;
    }

    let reporter = app.reporter();
    let outcome = scaffold::init_environment(
        &app.templates,
        &LocalFs,
        &reporter,
        &ScaffoldOptions {
            name: &args.name,
            template: &args.template,
            parent: &parent,
            force,
        },
    )?;

    app.renderer().render_scaffold(&args.name, &outcome)?;
    Ok(ExitCode::SUCCESS)
}
