//! Domain layer: pure business logic, types, and validation.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All functions are synchronous and take data in, returning data out.

pub mod call;
pub mod config;
pub mod container;
pub mod env;
pub mod error;
pub mod image;
pub mod template;

pub use config::{AfsConfig, validate_config_key, validate_config_value};
pub use container::{ContainerInfo, ContainerState};
pub use env::{EnvVar, validate_container_name, validate_env_name};
pub use error::{CallError, ConfigError, ContainerError, EnvError, ImageError};
pub use image::ImageRef;
pub use template::{RenderVars, Template, TemplateFile};
