//! Key-value cache contract
//!
//! The orchestrator only needs get, set-with-ttl and delete on string keys.
//! Implementations must be safe to share across tasks.

use async_trait::async_trait;
use std::fmt;

/// Cache backend errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum CacheError {
    #[error("Cache backend error: {0}")]
    Backend(String),

    #[error("Cache unavailable: {0}")]
    Unavailable(String),
}

#[cfg(feature = "redis")]
impl From<redis::RedisError> for CacheError {
    fn from(err: redis::RedisError) -> Self {
        if err.is_connection_dropped() || err.is_connection_refusal() || err.is_timeout() {
            CacheError::Unavailable(err.to_string())
        } else {
            CacheError::Backend(err.to_string())
        }
    }
}

/// Minimal string key-value store with per-key expiry
#[async_trait]
pub trait KeyValueCache: Send + Sync + fmt::Debug {
    /// Get a live value
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError>;

    /// Set a value that expires after `ttl_secs` (0 keeps it until deleted)
    async fn set(&self, key: &str, value: &str, ttl_secs: u64) -> Result<(), CacheError>;

    /// Delete a key; deleting a missing key is not an error
    async fn delete(&self, key: &str) -> Result<(), CacheError>;
}
