//! Configuration data models

pub mod cache;
pub mod fallback;
pub mod provider;

pub use cache::*;
pub use fallback::*;
pub use provider::*;

/// Default provider request timeout in seconds
pub fn default_timeout() -> u64 {
    30
}

/// Default attempts per provider within one logical call
pub fn default_max_retries_per_provider() -> u32 {
    1
}

/// Default health recheck interval for failed providers, in seconds
pub fn default_health_check_interval() -> u64 {
    60
}

/// Default linear backoff step between retries, in milliseconds
pub fn default_retry_backoff_ms() -> u64 {
    100
}

pub fn default_true() -> bool {
    true
}
