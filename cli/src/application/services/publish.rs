//! Application service: push images to a registry.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.

use anyhow::Result;

use crate::application::ports::{ImageBuilder, ProgressReporter};
use crate::application::services::container::stderr_text;
use crate::domain::error::ImageError;
use crate::domain::image::{ImageRef, is_auth_failure, login_host, publish_instructions};

/// Inputs of `afs publish`.
pub struct PublishOptions<'a> {
    /// Local image to publish.
    pub image: &'a str,
    /// Resolved registry, if any.
    pub registry: Option<&'a str>,
    /// Publish under a different tag.
    pub tag: Option<&'a str>,
    /// `DOCKER_USERNAME`, used in the login hint after a rejected push.
    pub docker_username: Option<&'a str>,
}

/// Result of `publish_image`.
#[derive(Debug, PartialEq, Eq)]
pub enum PublishOutcome {
    /// The image was tagged (if needed) and pushed.
    Pushed { target: String },
    /// No registry could be resolved; nothing was run.
    Instructions { steps: Vec<String> },
}

/// Push `image`, mapping credential failures to [`ImageError::NotLoggedIn`].
///
/// # Errors
///
/// Returns [`ImageError::NotLoggedIn`] or [`ImageError::PushFailed`] when
/// the push exits non-zero.
pub async fn push_image(
    engine: &impl ImageBuilder,
    reporter: &impl ProgressReporter,
    image: &ImageRef,
    docker_username: Option<&str>,
) -> Result<()> {
    let tag = image.to_string();
    reporter.step(&format!("pushing {tag}..."));
    let output = engine.push(&tag).await?;
    if !output.status.success() {
        let stderr = stderr_text(&output);
        if is_auth_failure(&stderr) {
            return Err(ImageError::NotLoggedIn {
                registry: login_host(image.path()).to_string(),
                username: docker_username.map(str::to_string),
            }
            .into());
        }
        return Err(ImageError::PushFailed { tag, stderr }.into());
    }
    reporter.success(&format!("pushed {tag}"));
    Ok(())
}

/// Tag `opts.image` for `opts.registry` and push it.
///
/// # Errors
///
/// Returns an error if the reference is invalid or tagging/pushing fails.
pub async fn publish_image(
    engine: &impl ImageBuilder,
    reporter: &impl ProgressReporter,
    opts: &PublishOptions<'_>,
) -> Result<PublishOutcome> {
    let source = ImageRef::parse(opts.image)?;
    let renamed = match opts.tag {
        Some(tag) => source.with_tag(tag)?,
        None => source.clone(),
    };

    let Some(registry) = opts.registry else {
        return Ok(PublishOutcome::Instructions {
            steps: publish_instructions(&renamed),
        });
    };

    let target = renamed.retarget(registry);
    if target != source {
        let output = engine.tag(&source.to_string(), &target.to_string()).await?;
        anyhow::ensure!(
            output.status.success(),
            "docker tag {source} {target} failed: {}",
            stderr_text(&output)
        );
        reporter.step(&format!("tagged {source} as {target}"));
    }

    push_image(engine, reporter, &target, opts.docker_username).await?;
    Ok(PublishOutcome::Pushed {
        target: target.to_string(),
    })
}
