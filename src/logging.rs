//! Logging configuration for promfind.
//!
//! The resolver itself never logs failures (they surface to the caller);
//! this only wires up stderr output for the CLI binary.

use tracing_subscriber::EnvFilter;

/// Initializes logging to stderr.
///
/// Honors `RUST_LOG`, defaulting to `info`.
pub fn init_stderr_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
}
