//! Fallback behaviour configuration

use super::*;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Retry, recheck and exhaustion policy for the orchestrator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FallbackSettings {
    /// Attempts made on one provider before moving on (minimum 1)
    #[serde(default = "default_max_retries_per_provider")]
    pub max_retries_per_provider: u32,
    /// Return an error when every provider failed; otherwise return no result
    #[serde(default = "default_true")]
    pub fail_on_all_providers: bool,
    /// Seconds before a failed provider is retried
    #[serde(default = "default_health_check_interval")]
    pub health_check_interval_secs: u64,
    /// Backoff step between attempts on one provider
    #[serde(default = "default_retry_backoff_ms")]
    pub retry_backoff_ms: u64,
}

impl Default for FallbackSettings {
    fn default() -> Self {
        Self {
            max_retries_per_provider: default_max_retries_per_provider(),
            fail_on_all_providers: true,
            health_check_interval_secs: default_health_check_interval(),
            retry_backoff_ms: default_retry_backoff_ms(),
        }
    }
}

impl FallbackSettings {
    pub fn with_max_retries_per_provider(mut self, retries: u32) -> Self {
        self.max_retries_per_provider = retries;
        self
    }

    pub fn with_fail_on_all_providers(mut self, fail: bool) -> Self {
        self.fail_on_all_providers = fail;
        self
    }

    pub fn with_health_check_interval_secs(mut self, secs: u64) -> Self {
        self.health_check_interval_secs = secs;
        self
    }

    pub fn with_retry_backoff_ms(mut self, ms: u64) -> Self {
        self.retry_backoff_ms = ms;
        self
    }

    pub fn health_check_interval(&self) -> Duration {
        Duration::from_secs(self.health_check_interval_secs)
    }

    /// Attempts per provider, never below one
    pub fn attempts_per_provider(&self) -> u32 {
        self.max_retries_per_provider.max(1)
    }

    /// Linear backoff before attempt `attempt + 1`
    pub fn backoff(&self, attempt: u32) -> Duration {
        Duration::from_millis(self.retry_backoff_ms.saturating_mul(attempt as u64))
    }
}
