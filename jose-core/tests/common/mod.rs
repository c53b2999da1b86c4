//! Shared helpers for the integration suites

use tracing_subscriber::EnvFilter;

/// Routes `tracing` output through the test harness; set `RUST_LOG` to see it
pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
