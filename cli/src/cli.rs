//! CLI argument parsing with clap derive

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::app::{AppContext, AppFlags, BehaviourFlags, OutputFlags};
use crate::commands;

/// Scaffold, build, run and call containerized actor environments
#[derive(Parser)]
#[command(
    name = "afs",
    version,
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    /// Log diagnostics to stderr (AFS_LOG overrides the filter)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Answer prompts with their default
    #[arg(short, long, global = true)]
    pub yes: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Create an environment from a template
    Init(commands::init::InitArgs),

    /// Build an environment image
    Build(commands::build::BuildArgs),

    /// Start an environment container
    Run(commands::run::RunArgs),

    /// Invoke an actor method
    Call(commands::call::CallArgs),

    /// Stop and remove an environment container
    Stop(commands::stop::StopArgs),

    /// List environment containers
    Ps,

    /// Tag and push an image to a registry
    Publish(commands::publish::PublishArgs),

    /// List available templates
    Templates,

    /// Manage configuration
    #[command(subcommand)]
    Config(commands::config::ConfigCommand),

    /// Show version
    Version,
}

impl Cli {
    /// Execute the CLI command.
    ///
    /// # Errors
    ///
    /// Returns an error if the command fails.
    pub async fn run(self) -> Result<ExitCode> {
        let Cli {
            json,
            quiet,
            no_color,
            yes,
            command,
            ..
        } = self;
        let app = AppContext::new(&AppFlags {
            output: OutputFlags {
                no_color,
                quiet,
                json,
            },
            behaviour: BehaviourFlags { yes },
        })?;

        match command {
            Command::Init(args) => commands::init::run(&args, &app),
            Command::Build(args) => commands::build::run(&args, &app).await,
            Command::Run(args) => commands::run::run(&args, &app).await,
            Command::Call(args) => commands::call::run(&args, &app).await,
            Command::Stop(args) => commands::stop::run(&args, &app).await,
            Command::Ps => commands::ps::run(&app).await,
            Command::Publish(args) => commands::publish::run(&args, &app).await,
            Command::Templates => commands::templates::run(&app),
            Command::Config(cmd) => commands::config::run(&app, &cmd),
            Command::Version => commands::version::run(&app).await,
        }
    }
}
