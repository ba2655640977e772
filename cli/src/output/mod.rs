//! Output formatting module

pub mod human;
pub mod json;
pub mod progress;
pub mod reporter;
pub mod styles;

use std::path::Path;

use afs_common::ContainerSummary;
use anyhow::Result;
use console::Term;
use owo_colors::OwoColorize as _;

use crate::application::services::build::BuildOutcome;
use crate::application::services::call::CallOutcome;
use crate::application::services::cleanup::StopOutcome;
use crate::application::services::publish::PublishOutcome;
use crate::application::services::run::RunOutcome;
use crate::application::services::scaffold::ScaffoldOutcome;
use crate::domain::config::AfsConfig;
use crate::domain::template::Template;
pub use human::HumanRenderer;
pub use json::JsonRenderer;
pub use reporter::{Reporter, SilentReporter, TerminalReporter};
pub use styles::Styles;

/// Output context carrying styling and terminal state.
pub struct OutputContext {
    /// Stylesheet for colored output.
    pub styles: Styles,
    /// Whether stdout is a TTY.
    pub is_tty: bool,
    /// Whether to suppress non-error output.
    pub quiet: bool,
}

impl OutputContext {
    /// Create output context based on CLI flags and environment.
    #[must_use]
    pub fn new(no_color: bool, quiet: bool) -> Self {
        let is_tty = Term::stdout().is_term();
        let use_colors = !no_color && is_tty && std::env::var("NO_COLOR").is_err();

        let mut styles = Styles::default();
        if use_colors {
            styles.colorize();
        }

        Self {
            styles,
            is_tty,
            quiet,
        }
    }

    /// Check if progress indicators should be shown.
    #[must_use]
    pub fn show_progress(&self) -> bool {
        self.is_tty && !self.quiet
    }

    /// Print a success message prefixed with `✓`. Suppressed when `quiet`.
    pub fn success(&self, msg: &str) {
        if !self.quiet {
            println!("  {} {msg}", "✓".style(self.styles.success));
        }
    }

    /// Print a warning message prefixed with `⚠`. Suppressed when `quiet`.
    pub fn warn(&self, msg: &str) {
        if !self.quiet {
            println!("  {} {msg}", "⚠".style(self.styles.warning));
        }
    }

    /// Print an error message prefixed with `✗` to stderr. Never suppressed.
    pub fn error(&self, msg: &str) {
        eprintln!("  {} {msg}", "✗".style(self.styles.error));
    }

    /// Print an info message prefixed with `ℹ`. Suppressed when `quiet`.
    pub fn info(&self, msg: &str) {
        if !self.quiet {
            println!("  {} {msg}", "ℹ".style(self.styles.info));
        }
    }

    /// Print a section header. Suppressed when `quiet`.
    pub fn header(&self, msg: &str) {
        if !self.quiet {
            println!("  {}", msg.style(self.styles.heading));
        }
    }

    /// Print a key-value pair with the key dimmed. Suppressed when `quiet`.
    pub fn kv(&self, key: &str, value: &str) {
        if !self.quiet {
            println!("  {}  {value}", key.style(self.styles.muted));
        }
    }
}

/// Mode-specific renderer handed out by `AppContext::renderer`.
pub enum Renderer<'a> {
    Human(HumanRenderer<'a>),
    Json(JsonRenderer),
}

impl Renderer<'_> {
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_scaffold(&self, name: &str, outcome: &ScaffoldOutcome) -> Result<()> {
        match self {
            Self::Human(r) => {
                r.render_scaffold(name, outcome);
                Ok(())
            }
            Self::Json(r) => r.render_scaffold(name, outcome),
        }
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_build(&self, outcome: &BuildOutcome) -> Result<()> {
        match self {
            Self::Human(r) => {
                r.render_build(outcome);
                Ok(())
            }
            Self::Json(r) => r.render_build(outcome),
        }
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_run(&self, outcome: &RunOutcome) -> Result<()> {
        match self {
            Self::Human(r) => {
                r.render_run(outcome);
                Ok(())
            }
            Self::Json(r) => r.render_run(outcome),
        }
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_call(&self, outcome: &CallOutcome) -> Result<()> {
        match self {
            Self::Human(r) => {
                r.render_call(outcome);
                Ok(())
            }
            Self::Json(r) => r.render_call(outcome),
        }
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_stop(&self, name: &str, outcome: StopOutcome) -> Result<()> {
        match self {
            Self::Human(r) => {
                r.render_stop(name, outcome);
                Ok(())
            }
            Self::Json(r) => r.render_stop(name, outcome),
        }
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_ps(&self, containers: &[ContainerSummary]) -> Result<()> {
        match self {
            Self::Human(r) => {
                r.render_ps(containers);
                Ok(())
            }
            Self::Json(r) => r.render_ps(containers),
        }
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_publish(&self, outcome: &PublishOutcome) -> Result<()> {
        match self {
            Self::Human(r) => {
                r.render_publish(outcome);
                Ok(())
            }
            Self::Json(r) => r.render_publish(outcome),
        }
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_templates(&self, templates: &[Template]) -> Result<()> {
        match self {
            Self::Human(r) => {
                r.render_templates(templates);
                Ok(())
            }
            Self::Json(r) => r.render_templates(templates),
        }
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_config(&self, config: &AfsConfig, path: &Path) -> Result<()> {
        match self {
            Self::Human(r) => {
                r.render_config(config, path);
                Ok(())
            }
            Self::Json(r) => r.render_config(config, path),
        }
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_version(&self, version: &str, docker: Option<&str>) -> Result<()> {
        match self {
            Self::Human(r) => {
                r.render_version(version, docker);
                Ok(())
            }
            Self::Json(r) => r.render_version(version, docker),
        }
    }
}
