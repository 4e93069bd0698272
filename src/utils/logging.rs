//! Tracing subscriber setup
//!
//! The library only emits `tracing` events; installing a subscriber is left
//! to binaries.

use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Build the filter, preferring `RUST_LOG` over `default_level`
pub fn env_filter(default_level: Level) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level.as_str().to_lowercase()))
}

/// Install a global `fmt` subscriber.
///
/// Returns false when a subscriber was already installed.
pub fn init_tracing(default_level: Level) -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(default_level))
        .with_target(false)
        .with_thread_ids(false)
        .try_init()
        .is_ok()
}

/// Install a JSON subscriber for log shipping
pub fn init_json_tracing(default_level: Level) -> bool {
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(env_filter(default_level))
        .with_current_span(false)
        .try_init()
        .is_ok()
}
