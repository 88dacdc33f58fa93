//! Tracing subscriber setup for embedding applications.
//!
//! The crate itself only emits `tracing` events; whoever embeds it decides
//! how they are rendered. These helpers install the usual subscribers.

use tracing_subscriber::EnvFilter;

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Installs a compact global subscriber filtered via `RUST_LOG`.
///
/// Later calls are no-ops, so tests and examples can call it freely.
pub fn init() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .try_init();
}

/// Installs a JSON-formatted subscriber for production log shipping.
pub fn init_json() {
    let _ = tracing_subscriber::fmt()
        .json()
        .with_env_filter(env_filter())
        .try_init();
}
