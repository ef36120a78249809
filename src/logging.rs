//! Diagnostic logging setup.
//!
//! Diagnostics go to stderr through `tracing`; stdout is reserved for the
//! result stream.

use anyhow::{anyhow, Context, Result};
use tracing_subscriber::EnvFilter;

/// Build the filter: `RUST_LOG` when set, else `level` for this crate only.
pub fn filter(level: &str, rust_log: Option<&str>) -> Result<EnvFilter> {
    match rust_log {
        Some(directives) => EnvFilter::try_new(directives)
            .with_context(|| format!("invalid RUST_LOG '{}'", directives)),
        None => EnvFilter::try_new(format!("{}={}", env!("CARGO_CRATE_NAME"), level))
            .with_context(|| format!("invalid log level '{}'", level)),
    }
}

/// Install the global subscriber.
pub fn init(level: &str) -> Result<()> {
    let rust_log = std::env::var("RUST_LOG").ok();
    let filter = filter(level, rust_log.as_deref())?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow!("failed to initialise logging: {}", e))
}
