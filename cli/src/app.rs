//! Application context: unified state passed to every command handler.
//!
//! `AppContext` is assembled once per invocation from the global flags.

use anyhow::Result;

use crate::infra::command_runner::TokioCommandRunner;
use crate::infra::config::YamlConfigStore;
use crate::infra::docker::DockerEngine;
use crate::infra::http::HttpCallTransport;
use crate::infra::templates::EmbeddedTemplates;
use crate::output::{HumanRenderer, JsonRenderer, OutputContext, Renderer, Reporter};

/// Output rendering mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable terminal output (default).
    Human,
    /// Machine-readable JSON output.
    Json,
}

/// Output rendering flags.
pub struct OutputFlags {
    /// Disable ANSI color output.
    pub no_color: bool,
    /// Suppress non-error output.
    pub quiet: bool,
    /// Enable JSON output mode.
    pub json: bool,
}

/// Behaviour flags.
pub struct BehaviourFlags {
    /// Skip interactive prompts (also set by `CI` / `AFS_YES` env vars).
    pub yes: bool,
}

/// Flags passed from the top-level CLI to `AppContext::new`.
pub struct AppFlags {
    /// Output rendering options.
    pub output: OutputFlags,
    /// Behaviour options.
    pub behaviour: BehaviourFlags,
}

/// Unified application context passed to every command handler.
pub struct AppContext {
    /// Terminal output context (colors, quiet mode).
    pub output: OutputContext,
    /// Output rendering mode (human vs JSON).
    pub mode: OutputMode,
    /// Docker CLI adapter.
    pub engine: DockerEngine<TokioCommandRunner>,
    /// HTTP client for the call protocol.
    pub transport: HttpCallTransport,
    /// Configuration persistence.
    pub config_store: YamlConfigStore,
    /// Templates compiled into the binary.
    pub templates: EmbeddedTemplates,
    /// When `true`, skip interactive prompts and use defaults.
    ///
    /// Set when `--yes` / `-y` is passed, when the `CI` or `AFS_YES`
    /// environment variables are present, or when stdout is not a terminal.
    pub non_interactive: bool,
}

impl AppContext {
    /// Construct an `AppContext` from top-level CLI flags.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(flags: &AppFlags) -> Result<Self> {
        let output = OutputContext::new(flags.output.no_color, flags.output.quiet);
        let ci_env = std::env::var("CI").is_ok() || std::env::var("AFS_YES").is_ok();
        let non_interactive = flags.behaviour.yes || ci_env || !output.is_tty;

        let mode = if flags.output.json {
            OutputMode::Json
        } else {
            OutputMode::Human
        };

        Ok(Self {
            output,
            mode,
            engine: DockerEngine::default_runner(),
            transport: HttpCallTransport::new()?,
            config_store: YamlConfigStore::new(),
            templates: EmbeddedTemplates,
            non_interactive,
        })
    }

    /// Returns `true` when JSON output mode is active.
    #[must_use]
    pub fn is_json(&self) -> bool {
        self.mode == OutputMode::Json
    }

    /// Returns the appropriate `Renderer` variant for the current output mode.
    #[must_use]
    pub fn renderer(&self) -> Renderer<'_> {
        match self.mode {
            OutputMode::Human => Renderer::Human(HumanRenderer::new(&self.output)),
            OutputMode::Json => Renderer::Json(JsonRenderer),
        }
    }

    /// Progress reporter for application services; silent in JSON mode.
    #[must_use]
    pub fn reporter(&self) -> Reporter<'_> {
        Reporter::for_mode(&self.output, self.is_json())
    }

    /// Ask the user for confirmation.
    ///
    /// When `non_interactive` is `true`, returns `default` immediately
    /// without prompting.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal prompt fails (e.g. no TTY available).
    pub fn confirm(&self, prompt: &str, default: bool) -> Result<bool> {
        if self.non_interactive {
            return Ok(default);
        }
        let confirmed = dialoguer::Confirm::new()
            .with_prompt(prompt)
            .default(default)
            .interact()?;
        Ok(confirmed)
    }
}
