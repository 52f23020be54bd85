//! Tracing subscriber setup for binaries, tests and benches.
//!
//! The search crate only emits events; installing a subscriber is left to
//! whoever drives it. Events carry an `event` field (`search_start`,
//! `expand`, `destination_reached`, `stateless_fallback`, `limit_reached`,
//! `search_end`) so they can be filtered by name.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the global tracing subscriber.
///
/// Reads `RUST_LOG` env var. Defaults to `warn` if unset.
/// Output: stderr, compact format.
///
/// Calling this more than once is harmless; only the first call installs a
/// subscriber.
///
/// # Example
/// ```bash
/// RUST_LOG=lodestar_search=debug cargo test -p lock-tests
/// ```
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .try_init();
}
