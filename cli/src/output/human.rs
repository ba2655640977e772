//! Human-readable terminal renderer.

use std::path::Path;

use afs_common::ContainerSummary;
use owo_colors::OwoColorize as _;

use crate::application::services::build::BuildOutcome;
use crate::application::services::call::CallOutcome;
use crate::application::services::cleanup::StopOutcome;
use crate::application::services::publish::PublishOutcome;
use crate::application::services::run::RunOutcome;
use crate::application::services::scaffold::ScaffoldOutcome;
use crate::domain::config::AfsConfig;
use crate::domain::template::Template;
use crate::output::OutputContext;

/// Environment variables shown by `afs config show`.
const ENV_VARS: &[&str] = &["AFS_CONFIG", "AFS_LOG", "DOCKER_USERNAME", "DOCKER_PUSH", "NO_COLOR"];

/// Renders command results as human-readable terminal output using `OutputContext`.
pub struct HumanRenderer<'a> {
    ctx: &'a OutputContext,
}

impl<'a> HumanRenderer<'a> {
    /// Create a new `HumanRenderer` wrapping the given output context.
    #[must_use]
    pub fn new(ctx: &'a OutputContext) -> Self {
        Self { ctx }
    }

    pub fn render_scaffold(&self, name: &str, outcome: &ScaffoldOutcome) {
        if self.ctx.quiet {
            return;
        }
        for file in &outcome.files {
            println!("    {}", file.display().style(self.ctx.styles.muted));
        }
        println!();
        self.ctx.kv("Build:", &format!("afs build {} --tag {name}:latest", outcome.root.display()));
        self.ctx.kv("Run:", &format!("afs run {name}:latest --name {name}"));
    }

    pub fn render_build(&self, outcome: &BuildOutcome) {
        if self.ctx.quiet {
            return;
        }
        self.ctx.kv("Image:", &outcome.image);
        if !outcome.pushed {
            self.ctx
                .kv("Run:", &format!("afs run {} --name <name>", outcome.image));
        }
    }

    pub fn render_run(&self, outcome: &RunOutcome) {
        if self.ctx.quiet {
            return;
        }
        self.ctx.kv("Endpoint:", &outcome.endpoint);
        if let Some(actor) = outcome.health.as_ref().and_then(|h| h.actor.as_deref()) {
            self.ctx.kv("Actor:", actor);
        }
        self.ctx
            .kv("Call:", &format!("afs call {} <method> --arg key=value", outcome.name));
        self.ctx.kv("Stop:", &format!("afs stop {}", outcome.name));
    }

    /// Print the method result on stdout, or the raised error on stderr.
    ///
    /// The result is data, so it is printed even when `quiet`.
    pub fn render_call(&self, outcome: &CallOutcome) {
        match outcome.response.clone().into_result() {
            Ok(result) => match serde_json::to_string_pretty(&result) {
                Ok(text) => println!("{text}"),
                Err(_) => println!("{result}"),
            },
            Err(raised) => self
                .ctx
                .error(&format!("{}() raised {raised}", outcome.request.method)),
        }
    }

    pub fn render_stop(&self, name: &str, outcome: StopOutcome) {
        if outcome == StopOutcome::Missing {
            self.ctx.info(&format!("No container named '{name}'. Nothing to stop."));
        }
    }

    pub fn render_ps(&self, containers: &[ContainerSummary]) {
        if containers.is_empty() {
            if !self.ctx.quiet {
                println!("No afs environments. Start one: afs run <image> --name <name>");
            }
            return;
        }

        println!(
            "  {}",
            format!("{:<20} {:<32} {:<24} {}", "NAME", "IMAGE", "STATUS", "PORT")
                .style(self.ctx.styles.emphasis)
        );
        for c in containers {
            let port = c.host_port.map_or_else(|| "-".to_string(), |p| p.to_string());
            let status = self.ctx.styles.container_status(&c.status);
            println!(
                "  {:<20} {:<32} {:<24} {port}",
                c.name,
                c.image,
                c.status.style(status)
            );
        }
    }

    pub fn render_publish(&self, outcome: &PublishOutcome) {
        match outcome {
            PublishOutcome::Pushed { target } => {
                if !self.ctx.quiet {
                    self.ctx.kv("Pull:", &format!("docker pull {target}"));
                }
            }
            PublishOutcome::Instructions { steps } => {
                self.ctx
                    .info("No registry configured. To publish this image:");
                println!();
                for step in steps {
                    println!("    {step}");
                }
            }
        }
    }

    pub fn render_templates(&self, templates: &[Template]) {
        println!("Available templates:\n");
        for t in templates {
            println!("  {:<12} {}", t.name.style(self.ctx.styles.emphasis), t.description);
        }
        println!("\nCreate an environment: afs init <name> --template <template>");
    }

    /// Render the current afs configuration.
    pub fn render_config(&self, config: &AfsConfig, path: &Path) {
        println!();
        println!(
            "  {}",
            format!("Configuration ({})", path.display()).style(self.ctx.styles.heading)
        );
        println!();
        println!(
            "  {:<30} {}",
            "registry.default:",
            config.registry.default.as_deref().unwrap_or("(not set)")
        );
        println!(
            "  {:<30} {}",
            "runtime.ready_timeout_secs:", config.runtime.ready_timeout_secs
        );
        println!("  {:<30} {}", "call.timeout_secs:", config.call.timeout_secs);
        println!();
        println!("  {}", "Environment:".style(self.ctx.styles.emphasis));
        for var in ENV_VARS {
            println!(
                "    {:<18} {}",
                format!("{var}:"),
                std::env::var(var).unwrap_or_else(|_| "(not set)".to_string())
            );
        }
        println!();
    }

    /// Render the CLI version information.
    pub fn render_version(&self, version: &str, docker: Option<&str>) {
        println!("afs {version}");
        if !self.ctx.quiet {
            match docker {
                Some(v) => self.ctx.kv("docker", v),
                None => self.ctx.kv("docker", "(not found)"),
            }
        }
    }
}
