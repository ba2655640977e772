//! Image references and registry resolution.
//!
//! Pure functions only, no I/O.

use std::fmt;
use std::sync::LazyLock;

use anyhow::Result;
use regex::Regex;

use crate::domain::error::ImageError;

pub const DEFAULT_TAG: &str = "latest";

/// Registry used when only `DOCKER_USERNAME` is known.
pub const DOCKER_HUB: &str = "docker.io";

static PATH_COMPONENT_RE: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::expect_used)]
    Regex::new(r"^[a-z0-9]+(?:(?:[._]|__|-+)[a-z0-9]+)*$").expect("valid regex")
});

static REGISTRY_HOST_RE: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::expect_used)]
    Regex::new(r"^[A-Za-z0-9](?:[A-Za-z0-9.-]*[A-Za-z0-9])?(?::[0-9]+)?$").expect("valid regex")
});

static TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::expect_used)]
    Regex::new(r"^[A-Za-z0-9_][A-Za-z0-9_.-]{0,127}$").expect("valid regex")
});

/// A parsed `[registry/]repository[:tag]` reference. Digests are not
/// supported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRef {
    /// Everything before the tag, registry host included.
    path: String,
    tag: String,
}

impl ImageRef {
    /// Parse an image reference, defaulting the tag to `latest`.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::InvalidReference`] or [`ImageError::InvalidTag`].
    pub fn parse(raw: &str) -> Result<Self> {
        let invalid = || ImageError::InvalidReference(raw.to_string());
        if raw.is_empty() || raw.contains('@') || raw.chars().any(char::is_whitespace) {
            return Err(invalid().into());
        }

        let (path, tag) = match raw.rfind(':') {
            Some(i) if !raw[i + 1..].contains('/') => (&raw[..i], &raw[i + 1..]),
            _ => (raw, DEFAULT_TAG),
        };
        if !TAG_RE.is_match(tag) {
            return Err(ImageError::InvalidTag(tag.to_string()).into());
        }

        let components: Vec<&str> = path.split('/').collect();
        let (host, rest) = match components.split_first() {
            Some((first, rest)) if !rest.is_empty() && looks_like_host(first) => {
                (Some(*first), rest)
            }
            _ => (None, components.as_slice()),
        };
        if let Some(host) = host
            && !REGISTRY_HOST_RE.is_match(host)
        {
            return Err(invalid().into());
        }
        if rest.is_empty() || !rest.iter().all(|c| PATH_COMPONENT_RE.is_match(c)) {
            return Err(invalid().into());
        }

        Ok(Self {
            path: path.to_string(),
            tag: tag.to_string(),
        })
    }

    /// Repository path without the tag (registry host included).
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Last path component, e.g. `calc` for `docker.io/alice/calc:v1`.
    #[must_use]
    pub fn name(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or(&self.path)
    }

    /// Registry host, when the reference names one explicitly.
    #[must_use]
    pub fn registry_host(&self) -> Option<&str> {
        let (first, rest) = self.path.split_once('/')?;
        (!rest.is_empty() && looks_like_host(first)).then_some(first)
    }

    /// Qualify this reference with `registry` (a host, a host plus
    /// namespace, or a Docker Hub namespace).
    ///
    /// Idempotent: a reference that already names a registry host, or whose
    /// path already starts with `registry/`, is returned unchanged.
    #[must_use]
    pub fn with_registry(&self, registry: &str) -> Self {
        let registry = registry.trim_end_matches('/');
        if self.registry_host().is_some() || self.path.starts_with(&format!("{registry}/")) {
            return self.clone();
        }
        Self {
            path: format!("{registry}/{}", self.name()),
            tag: self.tag.clone(),
        }
    }

    /// Move this image under `registry`, keeping only its last path
    /// component and tag: `ghcr.io/org/calc:v1` retargeted to
    /// `docker.io/bob` becomes `docker.io/bob/calc:v1`.
    #[must_use]
    pub fn retarget(&self, registry: &str) -> Self {
        Self {
            path: format!("{}/{}", registry.trim_end_matches('/'), self.name()),
            tag: self.tag.clone(),
        }
    }

    /// Same repository, different tag.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::InvalidTag`] if `tag` is not a valid tag.
    pub fn with_tag(&self, tag: &str) -> Result<Self> {
        if !TAG_RE.is_match(tag) {
            return Err(ImageError::InvalidTag(tag.to_string()).into());
        }
        Ok(Self {
            path: self.path.clone(),
            tag: tag.to_string(),
        })
    }
}

impl fmt::Display for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.path, self.tag)
    }
}

fn looks_like_host(component: &str) -> bool {
    component.contains('.') || component.contains(':') || component == "localhost"
}

/// Pick the registry to push to.
///
/// Precedence: explicit flag, configured default, then
/// `docker.io/<DOCKER_USERNAME>`. Blank values are ignored.
#[must_use]
pub fn resolve_registry(
    explicit: Option<&str>,
    configured: Option<&str>,
    docker_username: Option<&str>,
) -> Option<String> {
    let non_blank = |s: &&str| !s.trim().is_empty();
    explicit
        .filter(non_blank)
        .or(configured.filter(non_blank))
        .map(|s| s.trim().trim_end_matches('/').to_string())
        .or_else(|| {
            docker_username
                .filter(non_blank)
                .map(|user| format!("{DOCKER_HUB}/{}", user.trim()))
        })
}

/// Registry host to pass to `docker login`, derived from a registry string.
///
/// `"ghcr.io/org"` → `"ghcr.io"`, `"alice"` → `"docker.io"`.
#[must_use]
pub fn login_host(registry: &str) -> &str {
    match registry.split_once('/') {
        Some((first, _)) if looks_like_host(first) => first,
        None if looks_like_host(registry) => registry,
        _ => DOCKER_HUB,
    }
}

/// Whether `docker push` stderr indicates missing or rejected credentials.
#[must_use]
pub fn is_auth_failure(stderr: &str) -> bool {
    const MARKERS: &[&str] = &[
        "unauthorized",
        "authentication required",
        "no basic auth credentials",
        "denied: requested access",
    ];
    let stderr = stderr.to_ascii_lowercase();
    MARKERS.iter().any(|m| stderr.contains(m))
}

/// Manual publishing steps for when no registry can be resolved.
#[must_use]
pub fn publish_instructions(image: &ImageRef) -> Vec<String> {
    let target = image.with_registry("<username>");
    vec![
        "export DOCKER_USERNAME=<username>".to_string(),
        "docker login".to_string(),
        format!("afs publish {image}"),
        "or, by hand:".to_string(),
        format!("docker tag {image} {target}"),
        format!("docker push {target}"),
    ]
}
