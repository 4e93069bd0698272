//! Operator-facing statistics

use super::classifier::ErrorKind;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Per-provider statistics
#[derive(Debug, Clone, Serialize)]
pub struct ProviderStats {
    pub index: usize,
    pub provider_type: String,
    pub model: String,
    pub base_url: Option<String>,
    pub embedding_dim: usize,
    /// Candidates exhausted with a permanent failure
    pub failures: u64,
    /// Candidates exhausted with an overload
    pub overloads: u64,
    /// Cached healthy flag (`None` when the cache is off or unreachable)
    pub cached_healthy: Option<bool>,
    pub cached_overloaded: bool,
    pub last_health_check_at: Option<DateTime<Utc>>,
    pub last_failure_kind: Option<ErrorKind>,
    pub last_latency_ms: Option<f64>,
}

/// Orchestrator statistics
#[derive(Debug, Clone, Serialize)]
pub struct FallbackStats {
    pub client_id: String,
    pub providers: Vec<ProviderStats>,
    /// Last successful (or forced) provider in this process
    pub current_provider_index: Option<usize>,
    /// Preferred provider recorded in the shared cache
    pub preferred_provider: Option<usize>,
    pub health_cache_enabled: bool,
}

impl FallbackStats {
    pub fn total_failures(&self) -> u64 {
        self.providers.iter().map(|p| p.failures).sum()
    }

    pub fn total_overloads(&self) -> u64 {
        self.providers.iter().map(|p| p.overloads).sum()
    }
}
