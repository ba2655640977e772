//! afs CLI - scaffold, build, run and call containerized actor environments

use std::process::ExitCode;

use afs_cli::cli::Cli;
use afs_cli::output::json::format_error;
use clap::Parser;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let json = cli.json;
    afs_cli::logging::init(cli.verbose);

    match cli.run().await {
        Ok(code) => code,
        Err(e) => {
            let message = format!("{e:#}");
            tracing::debug!(error = ?e, "command failed");
            match (json, format_error(&message, "COMMAND_FAILED")) {
                (true, Ok(obj)) => println!("{obj}"),
                _ => eprintln!("Error: {message}"),
            }
            ExitCode::FAILURE
        }
    }
}
