//! Provider slots and their in-process bookkeeping

use super::classifier::ErrorKind;
use crate::core::providers::EmbeddingProvider;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

/// Request timeout for slots built from bare providers
pub const DEFAULT_SLOT_TIMEOUT: Duration = Duration::from_secs(30);

/// One backend in the fallback order
#[derive(Debug, Clone)]
pub struct ProviderSlot {
    /// Position in the fallback order
    pub index: usize,
    /// Call capability
    pub provider: Arc<dyn EmbeddingProvider>,
    /// Upper bound for one `generate_raw` call
    pub timeout: Duration,
}

impl ProviderSlot {
    pub fn new(index: usize, provider: Arc<dyn EmbeddingProvider>, timeout: Duration) -> Self {
        Self {
            index,
            provider,
            timeout,
        }
    }

    pub fn provider_type(&self) -> &str {
        self.provider.provider_type()
    }

    pub fn model(&self) -> &str {
        self.provider.model()
    }

    pub fn base_url(&self) -> Option<&str> {
        self.provider.base_url()
    }

    pub fn embedding_dim(&self) -> usize {
        self.provider.embedding_dim()
    }
}

/// Mutable per-slot state, guarded by the orchestrator mutex
#[derive(Debug, Clone, Default)]
pub(crate) struct SlotCounters {
    pub failure_count: u64,
    pub overload_count: u64,
    /// Monotonic time of the last recorded outcome, drives rechecks
    pub last_health_check: Option<Instant>,
    /// Wall-clock twin of `last_health_check`, for stats
    pub last_health_check_at: Option<DateTime<Utc>>,
    pub last_failure_kind: Option<ErrorKind>,
    pub last_latency_ms: Option<f64>,
}

impl SlotCounters {
    pub fn record_success(&mut self, latency_ms: f64) {
        self.touch();
        self.last_failure_kind = None;
        self.last_latency_ms = Some(latency_ms);
    }

    pub fn record_failure(&mut self, kind: ErrorKind) {
        self.touch();
        self.last_failure_kind = Some(kind);
        match kind {
            ErrorKind::Overload => self.overload_count += 1,
            ErrorKind::PermanentFailure => self.failure_count += 1,
        }
    }

    pub fn elapsed_since_check(&self, now: Instant) -> Option<Duration> {
        self.last_health_check
            .map(|at| now.saturating_duration_since(at))
    }

    /// Make the slot eligible immediately, keeping the counters
    pub fn clear_check(&mut self) {
        self.last_health_check = None;
        self.last_health_check_at = None;
        self.last_failure_kind = None;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    fn touch(&mut self) {
        self.last_health_check = Some(Instant::now());
        self.last_health_check_at = Some(Utc::now());
    }
}
