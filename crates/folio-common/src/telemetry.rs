//! Tracing setup for folio binaries and tests.
//!
//! Console-only: pretty output filtered by `RUST_LOG`, defaulting to DEBUG
//! in debug builds and INFO in release builds.

use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Initialize tracing for the current process.
///
/// Safe to call more than once; subsequent calls are no-ops.
pub fn init() {
    let default_level = if cfg!(debug_assertions) {
        Level::DEBUG
    } else {
        Level::INFO
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level.as_str()));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init();
}
