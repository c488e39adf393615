//! Logging setup shared by the Synsim binaries.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize tracing with a compact formatter and RUST_LOG filtering.
/// Falls back to `info` when RUST_LOG is unset.
pub fn init() {
    init_with_level("info")
}

/// Initialize tracing with an explicit default level, still
/// overridable through the RUST_LOG environment variable.
pub fn init_with_level(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .init();
}
