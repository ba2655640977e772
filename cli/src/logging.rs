//! Diagnostic logging.
//!
//! User-facing output goes through `OutputContext`; `tracing` carries
//! diagnostics to stderr only.

use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter, e.g. `AFS_LOG=afs_cli=debug`.
pub const LOG_ENV: &str = "AFS_LOG";

/// Filter used when `AFS_LOG` is unset or invalid.
#[must_use]
pub fn default_filter(verbose: bool) -> &'static str {
    if verbose { "afs_cli=debug,warn" } else { "warn" }
}

/// Install the global subscriber. Calling it twice is a no-op.
pub fn init(verbose: bool) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
