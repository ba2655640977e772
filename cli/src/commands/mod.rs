//! Command implementations

pub mod build;
pub mod call;
pub mod config;
pub mod init;
pub mod ps;
pub mod publish;
pub mod run;
pub mod stop;
pub mod templates;
pub mod version;

/// Docker Hub user name from `DOCKER_USERNAME`, ignoring empty values.
pub(crate) fn docker_username() -> Option<String> {
    std::env::var("DOCKER_USERNAME")
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
