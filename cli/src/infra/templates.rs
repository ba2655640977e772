//! Embedded environment templates.
//!
//! At compile time, `include_dir!` embeds everything under `cli/templates/`.
//! Each top-level directory is one template; its optional `template.yaml`
//! carries metadata and is not rendered into new environments.

use std::path::Path;

use include_dir::{Dir, include_dir};
use serde::Deserialize;

use crate::application::ports::TemplateSource;
use crate::domain::template::{Template, TemplateFile};

static EMBEDDED_TEMPLATES: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/templates");

const METADATA_FILE: &str = "template.yaml";

#[derive(Debug, Default, Deserialize)]
struct TemplateMeta {
    #[serde(default)]
    description: String,
}

/// `TemplateSource` backed by the templates compiled into the binary.
pub struct EmbeddedTemplates;

fn collect_files(dir: &Dir<'_>, root: &Path, out: &mut Vec<TemplateFile>) {
    for file in dir.files() {
        let Ok(rel) = file.path().strip_prefix(root) else {
            continue;
        };
        if rel == Path::new(METADATA_FILE) {
            continue;
        }
        out.push(TemplateFile {
            path: rel.to_path_buf(),
            contents: file.contents().to_vec(),
        });
    }
    for sub in dir.dirs() {
        collect_files(sub, root, out);
    }
}

fn load(dir: &Dir<'_>) -> Option<Template> {
    let name = dir.path().file_name()?.to_str()?.to_string();
    let meta = dir
        .get_file(dir.path().join(METADATA_FILE))
        .and_then(|f| f.contents_utf8())
        .and_then(|text| match serde_yaml::from_str::<TemplateMeta>(text) {
            Ok(meta) => Some(meta),
            Err(e) => {
                tracing::warn!(template = %name, error = %e, "ignoring invalid template metadata");
                None
            }
        })
        .unwrap_or_default();

    let mut files = Vec::new();
    collect_files(dir, dir.path(), &mut files);
    files.sort_by(|a, b| a.path.cmp(&b.path));
    Some(Template {
        name,
        description: meta.description,
        files,
    })
}

impl TemplateSource for EmbeddedTemplates {
    fn templates(&self) -> Vec<Template> {
        let mut templates: Vec<Template> = EMBEDDED_TEMPLATES.dirs().filter_map(load).collect();
        templates.sort_by(|a, b| a.name.cmp(&b.name));
        templates
    }
}
