//! JSON output helpers.
//!
//! `JsonRenderer` prints one pretty-printed document per command on stdout;
//! `format_error` builds the error object printed when a command fails.

use std::path::Path;

use afs_common::{ContainerSummary, HealthStatus};
use anyhow::{Context, Result};
use serde_json::{Value, json};

use crate::application::services::build::BuildOutcome;
use crate::application::services::call::CallOutcome;
use crate::application::services::cleanup::StopOutcome;
use crate::application::services::publish::PublishOutcome;
use crate::application::services::run::RunOutcome;
use crate::application::services::scaffold::ScaffoldOutcome;
use crate::domain::config::AfsConfig;
use crate::domain::template::Template;

/// Format a JSON error object.
///
/// Output (pretty-printed):
/// ```json
/// {
///   "error": true,
///   "message": "...",
///   "code": "..."
/// }
/// ```
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn format_error(message: &str, code: &str) -> Result<String> {
    let obj = json!({
        "error": true,
        "message": message,
        "code": code,
    });
    serde_json::to_string_pretty(&obj).context("JSON serialization failed")
}

fn emit(value: &Value) -> Result<()> {
    let text = serde_json::to_string_pretty(value).context("JSON serialization failed")?;
    println!("{text}");
    Ok(())
}

fn stop_result(outcome: StopOutcome) -> &'static str {
    match outcome {
        StopOutcome::Missing => "missing",
        StopOutcome::Stopped => "stopped",
        StopOutcome::Removed => "removed",
    }
}

/// Renders command results as JSON documents.
pub struct JsonRenderer;

impl JsonRenderer {
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn render_scaffold(&self, name: &str, outcome: &ScaffoldOutcome) -> Result<()> {
        emit(&json!({
            "name": name,
            "root": outcome.root,
            "files": outcome.files,
        }))
    }

    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn render_build(&self, outcome: &BuildOutcome) -> Result<()> {
        emit(&json!({ "image": outcome.image, "pushed": outcome.pushed }))
    }

    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn render_run(&self, outcome: &RunOutcome) -> Result<()> {
        emit(&json!({
            "name": outcome.name,
            "image": outcome.image,
            "endpoint": outcome.endpoint,
            "ready": outcome.health.as_ref().is_some_and(HealthStatus::is_ok),
            "health": outcome.health,
        }))
    }

    /// The full structured reply, including error replies.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn render_call(&self, outcome: &CallOutcome) -> Result<()> {
        emit(&serde_json::to_value(&outcome.response).context("JSON serialization failed")?)
    }

    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn render_stop(&self, name: &str, outcome: StopOutcome) -> Result<()> {
        emit(&json!({ "name": name, "result": stop_result(outcome) }))
    }

    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn render_ps(&self, containers: &[ContainerSummary]) -> Result<()> {
        emit(&serde_json::to_value(containers).context("JSON serialization failed")?)
    }

    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn render_publish(&self, outcome: &PublishOutcome) -> Result<()> {
        let value = match outcome {
            PublishOutcome::Pushed { target } => json!({ "pushed": true, "target": target }),
            PublishOutcome::Instructions { steps } => json!({ "pushed": false, "steps": steps }),
        };
        emit(&value)
    }

    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn render_templates(&self, templates: &[Template]) -> Result<()> {
        let list: Vec<Value> = templates
            .iter()
            .map(|t| {
                json!({
                    "name": t.name,
                    "description": t.description,
                    "files": t.files.iter().map(|f| f.path.clone()).collect::<Vec<_>>(),
                })
            })
            .collect();
        emit(&Value::Array(list))
    }

    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn render_config(&self, config: &AfsConfig, path: &Path) -> Result<()> {
        emit(&json!({ "path": path, "config": config }))
    }

    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn render_version(&self, version: &str, docker: Option<&str>) -> Result<()> {
        emit(&json!({ "version": version, "docker": docker }))
    }
}
