//! Test-side logging setup.
//!
//! The checker logs through `tracing`; nothing is printed unless a subscriber
//! is installed. Tests call `init_test_tracing` to see those events, filtered
//! by `RUST_LOG` (default `warn`).

use tracing_subscriber::{fmt, EnvFilter};

/// Install a fmt subscriber writing through the test harness. Safe to call repeatedly.
pub fn init_test_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = fmt().with_env_filter(filter).with_test_writer().try_init();
}
