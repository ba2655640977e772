//! `afs templates`: list embedded templates.

use std::process::ExitCode;

use anyhow::Result;

use crate::app::AppContext;
use crate::application::ports::TemplateSource as _;

/// Run `afs templates`.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn run(app: &AppContext) -> Result<ExitCode> {
    app.renderer().render_templates(&app.templates.templates())?;
    Ok(ExitCode::SUCCESS)
}
