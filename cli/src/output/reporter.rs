//! Presentation-layer implementations of `ProgressReporter`.
//!
//! Application services emit progress events through the port; these types
//! decide how (or whether) they reach the terminal.

use std::cell::RefCell;

use indicatif::ProgressBar;
use owo_colors::OwoColorize as _;

use crate::application::ports::ProgressReporter;
use crate::output::{OutputContext, progress};

/// Terminal progress reporter that wraps an `OutputContext`.
///
/// On a TTY each `step()` runs a spinner until the next event; otherwise
/// it prints `"  → {message}"`. Everything is suppressed when `ctx.quiet`.
pub struct TerminalReporter<'a> {
    ctx: &'a OutputContext,
    active: RefCell<Option<ProgressBar>>,
}

impl<'a> TerminalReporter<'a> {
    /// Create a new `TerminalReporter` wrapping the given output context.
    #[must_use]
    pub fn new(ctx: &'a OutputContext) -> Self {
        Self {
            ctx,
            active: RefCell::new(None),
        }
    }

    /// Clear a running spinner, leaving the terminal line empty.
    fn clear_spinner(&self) {
        if let Some(pb) = self.active.borrow_mut().take() {
            pb.finish_and_clear();
        }
    }
}

impl Drop for TerminalReporter<'_> {
    fn drop(&mut self) {
        // A spinner still running here belongs to a step that failed.
        if let Some(pb) = self.active.get_mut().take() {
            let msg = pb.message();
            progress::finish_error(&pb, &msg);
        }
    }
}

impl ProgressReporter for TerminalReporter<'_> {
    fn step(&self, message: &str) {
        if self.ctx.quiet {
            return;
        }
        self.clear_spinner();
        if self.ctx.show_progress() {
            *self.active.borrow_mut() = Some(progress::spinner(message));
        } else {
            println!("  {} {message}", "→".style(self.ctx.styles.step));
        }
    }

    fn success(&self, message: &str) {
        if self.ctx.quiet {
            return;
        }
        match self.active.borrow_mut().take() {
            Some(pb) => progress::finish_ok(&pb, message),
            None => self.ctx.success(message),
        }
    }

    fn warn(&self, message: &str) {
        if self.ctx.quiet {
            return;
        }
        self.clear_spinner();
        self.ctx.warn(message);
    }
}

/// Reporter that discards every event; used in `--json` mode so stdout
/// carries only the JSON document.
pub struct SilentReporter;

impl ProgressReporter for SilentReporter {
    fn step(&self, message: &str) {
        tracing::debug!(message, "step");
    }

    fn success(&self, message: &str) {
        tracing::debug!(message, "success");
    }

    fn warn(&self, message: &str) {
        tracing::warn!("{message}");
    }
}

/// Reporter chosen by output mode.
pub enum Reporter<'a> {
    Terminal(TerminalReporter<'a>),
    Silent(SilentReporter),
}

impl<'a> Reporter<'a> {
    #[must_use]
    pub fn for_mode(ctx: &'a OutputContext, json: bool) -> Self {
        if json {
            Self::Silent(SilentReporter)
        } else {
            Self::Terminal(TerminalReporter::new(ctx))
        }
    }
}

impl ProgressReporter for Reporter<'_> {
    fn step(&self, message: &str) {
        match self {
            Self::Terminal(r) => r.step(message),
            Self::Silent(r) => r.step(message),
        }
    }

    fn success(&self, message: &str) {
        match self {
            Self::Terminal(r) => r.success(message),
            Self::Silent(r) => r.success(message),
        }
    }

    fn warn(&self, message: &str) {
        match self {
            Self::Terminal(r) => r.warn(message),
            Self::Silent(r) => r.warn(message),
        }
    }
}
