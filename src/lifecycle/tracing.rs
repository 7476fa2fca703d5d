//! Tracing setup for the whole system.
//!
//! The actors emit structured events for every lifecycle step (startup,
//! each request, shutdown) with entity type and id fields. Filtering is
//! environment-driven:
//!
//! ```bash
//! RUST_LOG=info cargo run      # compact operational log
//! RUST_LOG=debug cargo run     # full request payloads
//! ```

use tracing_subscriber::{fmt, EnvFilter};

/// Initializes the global subscriber. Call once, at process start.
///
/// Falls back to `info` when `RUST_LOG` is unset. Safe to call from tests;
/// a second call is a no-op because the global default is already set.
pub fn setup_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .try_init();
}
