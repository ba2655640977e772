//! Infrastructure implementation of the `CallTransport` port over HTTP.

use std::time::Duration;

use afs_common::{CALL_PATH, CallRequest, CallResponse, HEALTH_PATH, HealthStatus};
use anyhow::{Context, Result};
use reqwest::Client;

use crate::application::ports::CallTransport;

/// Per-probe timeout for `GET /health`.
const HEALTH_TIMEOUT: Duration = Duration::from_secs(2);

/// Longest body excerpt quoted in decode errors.
const BODY_EXCERPT: usize = 200;

/// `CallTransport` backed by a shared `reqwest::Client`.
pub struct HttpCallTransport {
    client: Client,
}

impl HttpCallTransport {
    /// # Errors
    ///
    /// Returns an error if the TLS backend cannot be initialised.
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("afs/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("failed to create HTTP client")?;
        Ok(Self { client })
    }
}

fn url(endpoint: &str, path: &str) -> String {
    format!("{}{path}", endpoint.trim_end_matches('/'))
}

fn excerpt(body: &str) -> &str {
    match body.char_indices().nth(BODY_EXCERPT) {
        Some((idx, _)) => &body[..idx],
        None => body,
    }
}

impl CallTransport for HttpCallTransport {
    async fn health(&self, endpoint: &str) -> Result<HealthStatus> {
        let url = url(endpoint, HEALTH_PATH);
        let response = self
            .client
            .get(&url)
            .timeout(HEALTH_TIMEOUT)
            .send()
            .await
            .with_context(|| format!("GET {url}"))?
            .error_for_status()
            .with_context(|| format!("GET {url}"))?;
        response
            .json::<HealthStatus>()
            .await
            .with_context(|| format!("decoding {url} response"))
    }

    async fn call(
        &self,
        endpoint: &str,
        request: &CallRequest,
        timeout: Duration,
    ) -> Result<CallResponse> {
        let url = url(endpoint, CALL_PATH);
        let response = self
            .client
            .post(&url)
            .timeout(timeout)
            .json(request)
            .send()
            .await
            .with_context(|| format!("POST {url}"))?;

        // Method errors may arrive with a 4xx/5xx status; the body decides.
        let status = response.status();
        let body = response
            .text()
            .await
            .with_context(|| format!("reading {url} response"))?;
        serde_json::from_str(&body).with_context(|| {
            format!(
                "unexpected response from {url} (HTTP {status}): {}",
                excerpt(body.trim())
            )
        })
    }
}
