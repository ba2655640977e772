//! Application service: invoke an actor method inside a running environment.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.

use std::time::Duration;

use afs_common::{CallRequest, CallResponse};
use anyhow::{Context, Result};

use crate::application::ports::{CallTransport, ContainerInspector};
use crate::application::services::container;
use crate::domain::call::{build_request, normalize_endpoint};

/// Inputs of `afs call`.
pub struct CallOptions<'a> {
    pub container: &'a str,
    pub method: &'a str,
    /// Raw `key=value` arguments.
    pub args: &'a [String],
    /// Explicit endpoint URL; skips `docker inspect` when set.
    pub endpoint: Option<&'a str>,
    pub timeout: Duration,
}

/// A completed round trip. `response` may still be an error reply.
#[derive(Debug)]
pub struct CallOutcome {
    pub endpoint: String,
    pub request: CallRequest,
    pub response: CallResponse,
}

/// Send one method invocation and return the structured reply.
///
/// # Errors
///
/// Returns an error for malformed arguments, an unresolvable endpoint, or a
/// transport failure. An error raised by the method itself is not an `Err`;
/// it comes back as [`CallResponse::Error`].
pub async fn call_method(
    engine: &impl ContainerInspector,
    transport: &impl CallTransport,
    opts: &CallOptions<'_>,
) -> Result<CallOutcome> {
    let request = build_request(opts.method, opts.args)?;
    let endpoint = match opts.endpoint {
        Some(raw) => normalize_endpoint(raw)?,
        None => container::endpoint(engine, opts.container).await?,
    };
    tracing::debug!(%endpoint, method = %request.method, "calling actor");

    let response = transport
        .call(&endpoint, &request, opts.timeout)
        .await
        .with_context(|| format!("calling {}.{}", opts.container, opts.method))?;
    Ok(CallOutcome {
        endpoint,
        request,
        response,
    })
}
