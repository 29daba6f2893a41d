//! Tracing setup.
//!
//! Structured logging with the `tracing` crate, configured through the
//! `RUST_LOG` environment variable:
//!
//! ```bash
//! RUST_LOG=info cargo run --example checkout_demo
//! RUST_LOG=handi_session=debug cargo run --example checkout_demo
//! ```

use tracing_subscriber::EnvFilter;

/// Initialize the global tracing subscriber.
///
/// Uses a compact format with the module prefix hidden. Safe to call
/// more than once; later calls are no-ops.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .try_init();
}
