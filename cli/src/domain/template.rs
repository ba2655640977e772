//! Environment templates and placeholder rendering.
//!
//! Pure functions only; templates are handed in as data by the
//! `TemplateSource` port.

use std::path::{Component, Path, PathBuf};

use crate::domain::env::class_name;

/// One file of a template, path relative to the environment root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateFile {
    pub path: PathBuf,
    pub contents: Vec<u8>,
}

/// A named template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    pub name: String,
    pub description: String,
    pub files: Vec<TemplateFile>,
}

/// Values substituted into `{{name}}` and `{{class_name}}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderVars {
    pub name: String,
    pub class_name: String,
}

impl RenderVars {
    #[must_use]
    pub fn for_env(name: &str) -> Self {
        Self {
            name: name.to_string(),
            class_name: class_name(name),
        }
    }
}

/// Substitute placeholders in UTF-8 text. Unknown `{{...}}` sequences are
/// left untouched so templates can carry other brace syntax.
#[must_use]
pub fn render(text: &str, vars: &RenderVars) -> String {
    text.replace("{{class_name}}", &vars.class_name)
        .replace("{{name}}", &vars.name)
}

/// Render a file. Non-UTF-8 contents are copied verbatim.
#[must_use]
pub fn render_file(file: &TemplateFile, vars: &RenderVars) -> TemplateFile {
    let contents = match std::str::from_utf8(&file.contents) {
        Ok(text) => render(text, vars).into_bytes(),
        Err(_) => file.contents.clone(),
    };
    TemplateFile {
        path: file.path.clone(),
        contents,
    }
}

/// A template path is safe when it is relative and never climbs out of the
/// environment root.
#[must_use]
pub fn is_safe_relative(path: &Path) -> bool {
    !path.as_os_str().is_empty()
        && path
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}
