//! Fallback orchestrator
//!
//! Owns the ordered provider slots, the in-process counters and the health
//! cache handle. Execution lives in `execute_impl`.

use super::error::FallbackError;
use super::health_cache::HealthCache;
use super::selection::CandidateState;
use super::slot::{DEFAULT_SLOT_TIMEOUT, ProviderSlot, SlotCounters};
use super::stats::{FallbackStats, ProviderStats};
use crate::config::{EmbeddingConfig, FallbackSettings, ProviderConfig};
use crate::core::providers::{EmbeddingProvider, create_provider};
use crate::storage::KeyValueCache;
use parking_lot::Mutex;
use sha2::{Digest, Sha256};
use std::sync::Arc;
use tokio::time::Instant;
use tracing::{debug, info, warn};

/// Shared mutable state of one orchestrator
#[derive(Debug, Default)]
pub(crate) struct OrchestratorState {
    pub counters: Vec<SlotCounters>,
    pub current_provider_index: Option<usize>,
}

/// Failover across an ordered list of embedding providers
#[derive(Debug)]
pub struct FallbackOrchestrator {
    pub(crate) slots: Vec<ProviderSlot>,
    pub(crate) settings: FallbackSettings,
    pub(crate) health: HealthCache,
    pub(crate) client_id: String,
    pub(crate) state: Mutex<OrchestratorState>,
}

impl FallbackOrchestrator {
    /// Build from provider configuration records
    pub fn new(
        providers: &[ProviderConfig],
        settings: FallbackSettings,
        cache: Option<Arc<dyn KeyValueCache>>,
    ) -> Result<Self, FallbackError> {
        let slots = providers
            .iter()
            .enumerate()
            .map(|(index, config)| {
                create_provider(config).map(|p| ProviderSlot::new(index, p, config.timeout()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_slots(slots, settings, cache)
    }

    /// Build from already constructed providers
    pub fn from_providers(
        providers: Vec<Arc<dyn EmbeddingProvider>>,
        settings: FallbackSettings,
        cache: Option<Arc<dyn KeyValueCache>>,
    ) -> Result<Self, FallbackError> {
        let slots = providers
            .into_iter()
            .enumerate()
            .map(|(index, p)| ProviderSlot::new(index, p, DEFAULT_SLOT_TIMEOUT))
            .collect();
        Self::from_slots(slots, settings, cache)
    }

    /// Build from slots; slot indices are reassigned to their position
    pub fn from_slots(
        mut slots: Vec<ProviderSlot>,
        settings: FallbackSettings,
        cache: Option<Arc<dyn KeyValueCache>>,
    ) -> Result<Self, FallbackError> {
        if slots.is_empty() {
            return Err(FallbackError::Configuration(
                "At least one embedding provider must be configured".to_string(),
            ));
        }
        for (index, slot) in slots.iter_mut().enumerate() {
            slot.index = index;
        }

        let client_id = compute_client_id(&slots);
        let health = HealthCache::new(cache, &client_id, settings.health_check_interval());
        let state = OrchestratorState {
            counters: vec![SlotCounters::default(); slots.len()],
            current_provider_index: None,
        };

        info!(
            "Embedding fallback ready: {} providers [{}], client id {}, health cache {}",
            slots.len(),
            slots
                .iter()
                .map(|s| s.provider_type())
                .collect::<Vec<_>>()
                .join(", "),
            client_id,
            if health.is_enabled() { "on" } else { "off" }
        );

        Ok(Self {
            slots,
            settings,
            health,
            client_id,
            state: Mutex::new(state),
        })
    }

    /// Build from a full configuration, connecting the Redis health cache
    /// when one is configured
    pub async fn from_config(config: &EmbeddingConfig) -> Result<Self, FallbackError> {
        config.validate()?;
        let cache = connect_cache(config).await;
        let mut orchestrator = Self::new(&config.providers, config.fallback.clone(), cache)?;
        if let Some(prefix) = config.cache.key_prefix.as_deref() {
            orchestrator.health = orchestrator.health.with_key_prefix(prefix);
        }
        Ok(orchestrator)
    }

    /// Replace the health cache key prefix
    pub fn with_key_prefix(mut self, prefix: &str) -> Self {
        self.health = self.health.with_key_prefix(prefix);
        self
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub fn slots(&self) -> &[ProviderSlot] {
        &self.slots
    }

    pub fn settings(&self) -> &FallbackSettings {
        &self.settings
    }

    pub fn health_cache(&self) -> &HealthCache {
        &self.health
    }

    pub fn current_provider_index(&self) -> Option<usize> {
        self.state.lock().current_provider_index
    }

    /// True if at least one provider is healthy, cached flags first, then
    /// live probes
    pub async fn health_check(&self) -> bool {
        for slot in &self.slots {
            if self.health.is_healthy(slot.index).await == Some(true) {
                debug!("Provider {} healthy per cache", slot.index);
                return true;
            }
        }

        for slot in &self.slots {
            match tokio::time::timeout(slot.timeout, slot.provider.health_check()).await {
                Ok(true) => {
                    debug!("Provider {} passed live health check", slot.index);
                    return true;
                }
                Ok(false) => debug!("Provider {} failed live health check", slot.index),
                Err(_) => debug!("Provider {} health check timed out", slot.index),
            }
        }

        warn!("No healthy embedding provider found");
        false
    }

    /// Snapshot of counters and cached health
    pub async fn get_provider_stats(&self) -> FallbackStats {
        let (counters, current_provider_index) = {
            let state = self.state.lock();
            (state.counters.clone(), state.current_provider_index)
        };

        let mut providers = Vec::with_capacity(self.slots.len());
        for (slot, counters) in self.slots.iter().zip(counters) {
            providers.push(ProviderStats {
                index: slot.index,
                provider_type: slot.provider_type().to_string(),
                model: slot.model().to_string(),
                base_url: slot.base_url().map(str::to_string),
                embedding_dim: slot.embedding_dim(),
                failures: counters.failure_count,
                overloads: counters.overload_count,
                cached_healthy: self.health.is_healthy(slot.index).await,
                cached_overloaded: self.health.is_overloaded(slot.index).await,
                last_health_check_at: counters.last_health_check_at,
                last_failure_kind: counters.last_failure_kind,
                last_latency_ms: counters.last_latency_ms,
            });
        }

        FallbackStats {
            client_id: self.client_id.clone(),
            providers,
            current_provider_index,
            preferred_provider: self.health.get_preferred().await,
            health_cache_enabled: self.health.is_enabled(),
        }
    }

    /// Zero all counters and forget every cached health flag
    pub async fn reset_failures(&self) {
        {
            let mut state = self.state.lock();
            for counters in state.counters.iter_mut() {
                counters.reset();
            }
        }
        self.health.clear(0..self.slots.len()).await;
        info!("Embedding provider failures reset");
    }

    /// Pin the next call to provider `idx`
    pub async fn force_provider(&self, idx: usize) -> Result<(), FallbackError> {
        if idx >= self.slots.len() {
            return Err(FallbackError::InvalidProviderIndex {
                index: idx,
                len: self.slots.len(),
            });
        }
        {
            let mut state = self.state.lock();
            state.current_provider_index = Some(idx);
            state.counters[idx].clear_check();
        }
        self.health.mark_healthy(idx).await;
        info!(
            "Forced embedding provider {} ({})",
            idx,
            self.slots[idx].provider_type()
        );
        Ok(())
    }

    /// Where the next call starts: cached preference, then the last
    /// success in this process, then the first slot
    pub(crate) async fn start_index(&self) -> usize {
        if let Some(idx) = self.health.get_preferred().await {
            if idx < self.slots.len() {
                return idx;
            }
            debug!("Ignoring preferred provider {} outside slot range", idx);
        }
        self.state.lock().current_provider_index.unwrap_or(0)
    }

    /// Gather what gating needs to know about one candidate
    pub(crate) async fn candidate_state(&self, idx: usize) -> CandidateState {
        let cached_overloaded = self.health.is_overloaded(idx).await;
        let cached_healthy = self.health.is_healthy(idx).await;
        let now = Instant::now();
        let state = self.state.lock();
        let counters = &state.counters[idx];
        CandidateState {
            cached_overloaded,
            cached_healthy,
            elapsed_since_check: counters.elapsed_since_check(now),
            last_failure_kind: counters.last_failure_kind,
        }
    }
}

/// Deterministic id over the ordered provider identities
pub(crate) fn compute_client_id(slots: &[ProviderSlot]) -> String {
    let mut hasher = Sha256::new();
    for slot in slots {
        hasher.update(slot.provider_type().as_bytes());
        hasher.update(b"|");
        hasher.update(slot.base_url().unwrap_or_default().as_bytes());
        hasher.update(b"|");
        if let Some(fingerprint) = slot.provider.credential_fingerprint() {
            hasher.update(fingerprint.as_bytes());
        }
        hasher.update(b"\n");
    }
    hex::encode(&hasher.finalize()[..8])
}

#[cfg(feature = "redis")]
async fn connect_cache(config: &EmbeddingConfig) -> Option<Arc<dyn KeyValueCache>> {
    let url = config.cache.redis_url.as_deref()?;
    let cache = crate::storage::RedisCache::connect_or_noop(url).await;
    if cache.is_noop() {
        None
    } else {
        Some(Arc::new(cache))
    }
}

#[cfg(not(feature = "redis"))]
async fn connect_cache(config: &EmbeddingConfig) -> Option<Arc<dyn KeyValueCache>> {
    if config.cache.redis_url.is_some() {
        warn!("REDIS_URL set but the `redis` feature is disabled; health cache off");
    }
    None
}
