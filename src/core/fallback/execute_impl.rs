//! Execution implementation for the fallback orchestrator
//!
//! One logical call walks the candidate order once:
//! select, gate, attempt with retries, then either return the first
//! success or fold every failure into the exhaustion result.

use super::classifier::{ErrorKind, classify};
use super::error::{AttemptedProvider, FallbackError};
use super::orchestrator::FallbackOrchestrator;
use super::selection::{Gate, candidate_order, gate};
use super::slot::ProviderSlot;
use crate::core::providers::{Embedding, ProviderError};
use tokio::time::Instant;
use tracing::{debug, error, info, warn};

const ORCHESTRATOR: &str = "orchestrator";

impl FallbackOrchestrator {
    /// Embed one text.
    ///
    /// `Ok(None)` is only returned when every provider failed and
    /// `fail_on_all_providers` is off.
    pub async fn generate(&self, text: &str) -> Result<Option<Embedding>, FallbackError> {
        let batch = self.generate_batch(&[text.to_string()]).await?;
        Ok(batch.and_then(|embeddings| embeddings.into_iter().next()))
    }

    /// Embed a batch of texts with one provider
    pub async fn generate_batch(
        &self,
        texts: &[String],
    ) -> Result<Option<Vec<Embedding>>, FallbackError> {
        self.execute(texts, None).await
    }

    /// Embed a batch, giving up on further attempts once `deadline` passes
    pub async fn generate_batch_with_deadline(
        &self,
        texts: &[String],
        deadline: Instant,
    ) -> Result<Option<Vec<Embedding>>, FallbackError> {
        self.execute(texts, Some(deadline)).await
    }

    async fn execute(
        &self,
        texts: &[String],
        deadline: Option<Instant>,
    ) -> Result<Option<Vec<Embedding>>, FallbackError> {
        if texts.is_empty() {
            return Ok(Some(Vec::new()));
        }

        let start = self.start_index().await;
        let mut attempted = Vec::new();
        let mut last_error: Option<String> = None;

        for idx in candidate_order(start, self.slots.len()) {
            if deadline.is_some_and(|d| Instant::now() >= d) {
                debug!("Caller deadline passed, not trying provider {}", idx);
                last_error.get_or_insert_with(|| "caller deadline elapsed".to_string());
                break;
            }

            let state = self.candidate_state(idx).await;
            match gate(&self.health, &state) {
                Gate::Attempt => {}
                skip => {
                    debug!("Skipping provider {}: {:?}", idx, skip);
                    continue;
                }
            }

            let slot = &self.slots[idx];
            attempted.push(AttemptedProvider {
                index: idx,
                provider_type: slot.provider_type().to_string(),
            });

            match self.attempt_candidate(slot, texts, deadline).await {
                Ok(embeddings) => return Ok(Some(embeddings)),
                Err(err) => last_error = Some(err.to_string()),
            }
        }

        self.exhausted(attempted, last_error)
    }

    /// Try one candidate up to `max_retries_per_provider` times
    async fn attempt_candidate(
        &self,
        slot: &ProviderSlot,
        texts: &[String],
        deadline: Option<Instant>,
    ) -> Result<Vec<Embedding>, ProviderError> {
        let attempts = self.settings.attempts_per_provider();
        let mut last_error = None;

        for attempt in 1..=attempts {
            if attempt > 1 && !sleep_before_retry(self.settings.backoff(attempt - 1), deadline).await
            {
                debug!("Caller deadline reached during backoff for provider {}", slot.index);
                break;
            }

            let started = Instant::now();
            match self.call_provider(slot, texts, deadline).await {
                Ok(embeddings) => {
                    let latency_ms = started.elapsed().as_secs_f64() * 1000.0;
                    self.record_success(slot, latency_ms).await;
                    return Ok(embeddings);
                }
                Err(err) => {
                    debug!(
                        "Provider {} ({}) attempt {}/{} failed: {}",
                        slot.index,
                        slot.provider_type(),
                        attempt,
                        attempts,
                        err
                    );
                    last_error = Some(err);
                }
            }
        }

        let err = last_error.unwrap_or_else(|| {
            ProviderError::timeout(ORCHESTRATOR, "caller deadline elapsed before first attempt")
        });
        self.record_failure(slot, classify(&err)).await;
        Err(err)
    }

    /// One bounded provider call
    async fn call_provider(
        &self,
        slot: &ProviderSlot,
        texts: &[String],
        deadline: Option<Instant>,
    ) -> Result<Vec<Embedding>, ProviderError> {
        let timeout = match deadline {
            Some(deadline) => slot
                .timeout
                .min(deadline.saturating_duration_since(Instant::now())),
            None => slot.timeout,
        };

        match tokio::time::timeout(timeout, slot.provider.generate_raw(texts)).await {
            Ok(Ok(embeddings)) if embeddings.len() == texts.len() => Ok(embeddings),
            Ok(Ok(embeddings)) => Err(ProviderError::response_parsing(
                ORCHESTRATOR,
                format!(
                    "provider {} returned {} embeddings for {} inputs",
                    slot.index,
                    embeddings.len(),
                    texts.len()
                ),
            )),
            Ok(Err(err)) => Err(err),
            Err(_) => Err(ProviderError::timeout(
                ORCHESTRATOR,
                format!(
                    "provider {} ({}) timed out after {:?}",
                    slot.index,
                    slot.provider_type(),
                    timeout
                ),
            )),
        }
    }

    async fn record_success(&self, slot: &ProviderSlot, latency_ms: f64) {
        {
            let mut state = self.state.lock();
            state.counters[slot.index].record_success(latency_ms);
            state.current_provider_index = Some(slot.index);
        }
        self.health.mark_healthy(slot.index).await;
        debug!(
            "Provider {} ({}) succeeded in {:.1}ms",
            slot.index,
            slot.provider_type(),
            latency_ms
        );
    }

    async fn record_failure(&self, slot: &ProviderSlot, kind: ErrorKind) {
        self.state.lock().counters[slot.index].record_failure(kind);
        match kind {
            ErrorKind::Overload => self.health.mark_overloaded(slot.index).await,
            ErrorKind::PermanentFailure => self.health.mark_failed(slot.index).await,
        }
        warn!(
            "Provider {} ({}) exhausted its attempts: {:?}",
            slot.index,
            slot.provider_type(),
            kind
        );
    }

    fn exhausted<T>(
        &self,
        attempted: Vec<AttemptedProvider>,
        last_error: Option<String>,
    ) -> Result<Option<T>, FallbackError> {
        let last_error =
            last_error.unwrap_or_else(|| "no provider was eligible for an attempt".to_string());

        if self.settings.fail_on_all_providers {
            error!(
                "All {} embedding providers exhausted ({} attempted): {}",
                self.slots.len(),
                attempted.len(),
                last_error
            );
            Err(FallbackError::AllProvidersExhausted {
                attempted,
                last_error,
            })
        } else {
            info!(
                "All embedding providers exhausted, returning no result: {}",
                last_error
            );
            Ok(None)
        }
    }
}

/// Sleep for the backoff, cut short by the deadline. False when the
/// deadline leaves no time for another attempt.
async fn sleep_before_retry(delay: std::time::Duration, deadline: Option<Instant>) -> bool {
    match deadline {
        Some(deadline) => {
            let wake = Instant::now() + delay;
            if wake >= deadline {
                tokio::time::sleep_until(deadline).await;
                return false;
            }
            tokio::time::sleep_until(wake).await;
            true
        }
        None => {
            tokio::time::sleep(delay).await;
            true
        }
    }
}
