//! Application service: scaffold a new environment from a template.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.
//! All I/O is routed through injected port traits.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::application::ports::{LocalFs, ProgressReporter, TemplateSource};
use crate::domain::env::validate_env_name;
use crate::domain::error::EnvError;
use crate::domain::template::{RenderVars, Template, is_safe_relative, render_file};

/// Inputs of `afs init`.
pub struct ScaffoldOptions<'a> {
    /// Environment name; also the directory name.
    pub name: &'a str,
    /// Template to render.
    pub template: &'a str,
    /// Directory the environment directory is created in.
    pub parent: &'a Path,
    /// Overwrite template files in a non-empty target directory.
    pub force: bool,
}

/// What `init_environment` produced.
#[derive(Debug)]
pub struct ScaffoldOutcome {
    /// The environment root directory.
    pub root: PathBuf,
    /// Written files, relative to `root`, in template order.
    pub files: Vec<PathBuf>,
}

/// Check the environment name and look up its template.
///
/// # Errors
///
/// Returns [`EnvError::InvalidName`] or [`EnvError::UnknownTemplate`].
pub fn resolve_template(
    templates: &impl TemplateSource,
    name: &str,
    template: &str,
) -> Result<Template> {
    validate_env_name(name)?;
    templates.get(template).ok_or_else(|| {
        let available = templates
            .templates()
            .into_iter()
            .map(|t| t.name)
            .collect::<Vec<_>>()
            .join(", ");
        EnvError::UnknownTemplate {
            name: template.to_string(),
            available,
        }
        .into()
    })
}

/// Render `opts.template` into `<parent>/<name>`.
///
/// Files that exist in the target but not in the template are never touched.
///
/// # Errors
///
/// Returns an error for an invalid name, an unknown template, a non-empty
/// target without `force`, or any filesystem failure.
pub fn init_environment(
    templates: &impl TemplateSource,
    fs: &impl LocalFs,
    reporter: &impl ProgressReporter,
    opts: &ScaffoldOptions<'_>,
) -> Result<ScaffoldOutcome> {
    let template = resolve_template(templates, opts.name, opts.template)?;

    let root = opts.parent.join(opts.name);
    if fs.exists(&root) && !fs.is_empty_dir(&root)? {
        if !opts.force {
            return Err(EnvError::TargetNotEmpty(root.display().to_string()).into());
        }
        reporter.warn(&format!("overwriting template files in {}", root.display()));
    }

    reporter.step(&format!(
        "creating environment '{}' from template '{}'...",
        opts.name, template.name
    ));
    fs.create_dir_all(&root)?;

    let vars = RenderVars::for_env(opts.name);
    let mut written = Vec::with_capacity(template.files.len());
    for file in &template.files {
        anyhow::ensure!(
            is_safe_relative(&file.path),
            "template '{}' contains unsafe path {}",
            template.name,
            file.path.display()
        );
        let rendered = render_file(file, &vars);
        let dest = root.join(&rendered.path);
        if let Some(parent) = dest.parent() {
            fs.create_dir_all(parent)?;
        }
        fs.write(&dest, &rendered.contents)
            .with_context(|| format!("writing {}", dest.display()))?;
        tracing::debug!(path = %dest.display(), bytes = rendered.contents.len(), "wrote template file");
        written.push(rendered.path);
    }

    reporter.success(&format!("environment created at {}", root.display()));
    Ok(ScaffoldOutcome {
        root,
        files: written,
    })
}
