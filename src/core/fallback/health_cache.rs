//! Cache-backed provider health tracking
//!
//! Health flags live in the shared key-value cache so that every
//! orchestrator with the same provider list (same client id) sees the same
//! state, including across restarts. Each flag carries its own TTL, so a
//! stale state heals itself once nobody refreshes it.
//!
//! ## Key scheme
//!
//! | Key | Value | TTL |
//! |-----|-------|-----|
//! | `{prefix}:{client_id}:provider:{idx}:healthy` | `"1"` | 300s |
//! | `{prefix}:{client_id}:provider:{idx}:overloaded` | `"1"` | 30s |
//! | `{prefix}:{client_id}:preferred_provider` | index | 300s |
//!
//! A provider is healthy, overloaded, or neither; writing one state deletes
//! the other. Absence of both means failed or unknown.
//!
//! Cache errors are logged and swallowed: every read degrades to "unknown"
//! and every write becomes a no-op.

use crate::storage::KeyValueCache;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Default key namespace
pub const DEFAULT_KEY_PREFIX: &str = "embedding:fallback";

/// Lifetime of a `healthy` flag and of the preferred provider
pub const HEALTHY_TTL_SECS: u64 = 300;

/// Lifetime of an `overloaded` flag, and the overload recheck window
pub const OVERLOADED_TTL_SECS: u64 = 30;

/// Health façade over an optional shared cache
#[derive(Debug, Clone)]
pub struct HealthCache {
    cache: Option<Arc<dyn KeyValueCache>>,
    prefix: String,
    client_id: String,
    health_check_interval: Duration,
}

impl HealthCache {
    /// Create a health cache; `None` disables caching entirely
    pub fn new(
        cache: Option<Arc<dyn KeyValueCache>>,
        client_id: &str,
        health_check_interval: Duration,
    ) -> Self {
        Self {
            cache,
            prefix: DEFAULT_KEY_PREFIX.to_string(),
            client_id: client_id.to_string(),
            health_check_interval,
        }
    }

    /// Replace the `embedding:fallback` key prefix
    pub fn with_key_prefix(mut self, prefix: &str) -> Self {
        self.prefix = prefix.trim_end_matches(':').to_string();
        self
    }

    pub fn is_enabled(&self) -> bool {
        self.cache.is_some()
    }

    pub fn healthy_key(&self, idx: usize) -> String {
        format!("{}:{}:provider:{}:healthy", self.prefix, self.client_id, idx)
    }

    pub fn overloaded_key(&self, idx: usize) -> String {
        format!("{}:{}:provider:{}:overloaded", self.prefix, self.client_id, idx)
    }

    pub fn preferred_key(&self) -> String {
        format!("{}:{}:preferred_provider", self.prefix, self.client_id)
    }

    /// Record a success: healthy flag plus preferred provider
    pub async fn mark_healthy(&self, idx: usize) {
        debug!("Health cache: provider {} healthy", idx);
        self.set(&self.healthy_key(idx), "1", HEALTHY_TTL_SECS).await;
        self.remove(&self.overloaded_key(idx)).await;
        self.set(&self.preferred_key(), &idx.to_string(), HEALTHY_TTL_SECS)
            .await;
    }

    /// Record transient overload
    pub async fn mark_overloaded(&self, idx: usize) {
        debug!("Health cache: provider {} overloaded", idx);
        self.set(&self.overloaded_key(idx), "1", OVERLOADED_TTL_SECS)
            .await;
        self.remove(&self.healthy_key(idx)).await;
    }

    /// Record a non-transient failure (no positive marker is stored)
    pub async fn mark_failed(&self, idx: usize) {
        debug!("Health cache: provider {} failed", idx);
        self.remove(&self.healthy_key(idx)).await;
        self.remove(&self.overloaded_key(idx)).await;
    }

    /// `Some(true)` when flagged healthy, `Some(false)` when not, `None` when
    /// the cache is disabled or unreachable
    pub async fn is_healthy(&self, idx: usize) -> Option<bool> {
        self.get(&self.healthy_key(idx))
            .await
            .map(|value| value.is_some())
    }

    pub async fn is_overloaded(&self, idx: usize) -> bool {
        matches!(self.get(&self.overloaded_key(idx)).await, Some(Some(_)))
    }

    /// Most recently successful provider, if recorded
    pub async fn get_preferred(&self) -> Option<usize> {
        let value = self.get(&self.preferred_key()).await.flatten()?;
        match value.trim().parse() {
            Ok(idx) => Some(idx),
            Err(_) => {
                warn!("Health cache: ignoring malformed preferred provider {:?}", value);
                None
            }
        }
    }

    /// Whether a provider last checked `elapsed` ago is due for another try
    pub async fn should_recheck(&self, idx: usize, elapsed: Option<Duration>) -> bool {
        let overloaded = self.is_overloaded(idx).await;
        self.recheck_due(overloaded, elapsed)
    }

    /// Recheck decision for an already known state.
    ///
    /// A provider is due once its window has fully elapsed. Overloaded
    /// providers wait [`OVERLOADED_TTL_SECS`], everything else the
    /// configured health check interval. A provider never checked by this
    /// process is due unless the cache says it is overloaded, in which case
    /// the flag's own TTL bounds the wait.
    pub fn recheck_due(&self, overloaded: bool, elapsed: Option<Duration>) -> bool {
        match elapsed {
            Some(elapsed) => elapsed >= self.recheck_window(overloaded),
            None => !overloaded,
        }
    }

    /// Recheck window for a failure class
    pub fn recheck_window(&self, overloaded: bool) -> Duration {
        if overloaded {
            Duration::from_secs(OVERLOADED_TTL_SECS)
        } else {
            self.health_check_interval
        }
    }

    /// Forget one provider's health flags
    pub async fn delete(&self, idx: usize) {
        self.remove(&self.healthy_key(idx)).await;
        self.remove(&self.overloaded_key(idx)).await;
    }

    /// Forget every provider's flags and the preferred provider
    pub async fn clear(&self, indices: impl IntoIterator<Item = usize>) {
        for idx in indices {
            self.delete(idx).await;
        }
        self.remove(&self.preferred_key()).await;
    }

    async fn get(&self, key: &str) -> Option<Option<String>> {
        let cache = self.cache.as_ref()?;
        match cache.get(key).await {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("Health cache read {} failed: {}", key, e);
                None
            }
        }
    }

    async fn set(&self, key: &str, value: &str, ttl_secs: u64) {
        let Some(cache) = self.cache.as_ref() else {
            return;
        };
        if let Err(e) = cache.set(key, value, ttl_secs).await {
            warn!("Health cache write {} failed: {}", key, e);
        }
    }

    async fn remove(&self, key: &str) {
        let Some(cache) = self.cache.as_ref() else {
            return;
        };
        if let Err(e) = cache.delete(key).await {
            warn!("Health cache delete {} failed: {}", key, e);
        }
    }
}
