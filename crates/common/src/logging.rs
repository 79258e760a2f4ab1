//! Tracing setup shared by test binaries and the CLI

use tracing_subscriber::{fmt, EnvFilter};

/// Install the global subscriber once. Later calls are no-ops, so every
/// fixture can call this without coordinating.
pub fn init_tracing() {
    let _ = fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_test_writer()
        .try_init();
}
