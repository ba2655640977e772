//! Application service: build an environment image.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.

use std::path::Path;

use anyhow::{Context, Result};

use crate::application::ports::{BuildSpec, ImageBuilder, LocalFs, ProgressReporter};
use crate::application::services::container::stderr_text;
use crate::application::services::publish::push_image;
use crate::domain::error::{EnvError, ImageError};
use crate::domain::image::ImageRef;

/// Inputs of `afs build`.
pub struct BuildOptions<'a> {
    /// Environment directory containing a `Dockerfile`.
    pub dir: &'a Path,
    /// Image tag; defaults to `<dirname>:latest`.
    pub tag: Option<&'a str>,
    /// Resolved registry used to qualify the tag.
    pub registry: Option<&'a str>,
    /// Push after a successful build.
    pub push: bool,
    /// Build without the layer cache.
    pub no_cache: bool,
    /// `DOCKER_USERNAME`, used in the login hint after a rejected push.
    pub docker_username: Option<&'a str>,
}

/// What `build_environment` produced.
#[derive(Debug, PartialEq, Eq)]
pub struct BuildOutcome {
    /// Fully qualified image reference.
    pub image: String,
    pub pushed: bool,
}

/// Default tag for a directory: its lowercased name with `:latest`.
///
/// `dir` should be absolute so that `.` resolves to a real name.
///
/// # Errors
///
/// Returns an error if the directory name cannot form a repository name.
pub fn default_tag(dir: &Path) -> Result<ImageRef> {
    let name = dir
        .file_name()
        .and_then(|n| n.to_str())
        .map(str::to_ascii_lowercase)
        .ok_or_else(|| anyhow::anyhow!("cannot derive an image name from {}", dir.display()))?;
    ImageRef::parse(&name)
        .with_context(|| format!("cannot derive an image name from {}; pass --tag", dir.display()))
}

/// Build the image for `opts.dir`, optionally pushing it.
///
/// # Errors
///
/// Returns an error if the Dockerfile is missing, no registry is available
/// for a push, or the build/push exits non-zero.
pub async fn build_environment(
    engine: &impl ImageBuilder,
    fs: &impl LocalFs,
    reporter: &impl ProgressReporter,
    opts: &BuildOptions<'_>,
) -> Result<BuildOutcome> {
    if !fs.exists(&opts.dir.join("Dockerfile")) {
        return Err(EnvError::MissingDockerfile(opts.dir.display().to_string()).into());
    }

    let mut image = match opts.tag {
        Some(tag) => ImageRef::parse(tag)?,
        None => default_tag(opts.dir)?,
    };
    if let Some(registry) = opts.registry {
        image = image.with_registry(registry);
    }
    if opts.push && opts.registry.is_none() && !image.path().contains('/') {
        return Err(ImageError::NoRegistry.into());
    }

    let context = opts
        .dir
        .to_str()
        .context("environment path is not valid UTF-8")?;
    let tag = image.to_string();

    reporter.step(&format!("building {tag}..."));
    let output = engine
        .build(&BuildSpec {
            context,
            tag: &tag,
            env_name: image.name(),
            no_cache: opts.no_cache,
        })
        .await?;
    if !output.status.success() {
        return Err(ImageError::BuildFailed {
            tag,
            stderr: stderr_text(&output),
        }
        .into());
    }
    reporter.success(&format!("built {tag}"));

    if opts.push {
        push_image(engine, reporter, &image, opts.docker_username).await?;
    }

    Ok(BuildOutcome {
        image: tag,
        pushed: opts.push,
    })
}
