//! Fallback tests module
//!
//! Scripted providers and a failing cache shared by the test files below.


use crate::core::providers::{Embedding, EmbeddingProvider, ProviderError};
use crate::storage::{CacheError, KeyValueCache};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// What a scripted provider does on one call
#[derive(Debug, Clone)]
pub(super) enum Outcome {
    /// One copy of the vector per input
    Vector(Embedding),
    /// Fail with the error a backend returns for this status
    Status(u16),
    /// Return this many vectors regardless of input size
    Count(usize),
    /// Sleep, then answer with the inner outcome
    Delay(Duration, Box<Outcome>),
}

#[derive(Debug)]
pub(super) struct ScriptedProvider {
    name: &'static str,
    script: Mutex<VecDeque<Outcome>>,
    steady: Outcome,
    calls: AtomicUsize,
    healthy: bool,
}

impl ScriptedProvider {
    /// Answer `steady` on every call
    pub fn new(name: &'static str, steady: Outcome) -> Arc<Self> {
        Self::scripted(name, Vec::new(), steady)
    }

    /// Answer from `script` first, then `steady`
    pub fn scripted(name: &'static str, script: Vec<Outcome>, steady: Outcome) -> Arc<Self> {
        Arc::new(Self {
            name,
            script: Mutex::new(script.into()),
            steady,
            calls: AtomicUsize::new(0),
            healthy: true,
        })
    }

    pub fn unhealthy(name: &'static str, steady: Outcome) -> Arc<Self> {
        Arc::new(Self {
            name,
            script: Mutex::new(VecDeque::new()),
            steady,
            calls: AtomicUsize::new(0),
            healthy: false,
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

pub(super) fn vector(value: f32) -> Outcome {
    Outcome::Vector(vec![value; 4])
}

fn status_error(status: u16) -> ProviderError {
    match status {
        429 => ProviderError::rate_limit("mock", None),
        503 => ProviderError::service_unavailable("mock", "503 Service Unavailable"),
        _ => ProviderError::api_error("mock", status, "scripted failure"),
    }
}

#[async_trait]
impl EmbeddingProvider for ScriptedProvider {
    async fn generate_raw(&self, texts: &[String]) -> Result<Vec<Embedding>, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let outcome = self
            .script
            .lock()
            .pop_front()
            .unwrap_or_else(|| self.steady.clone());
        let outcome = match outcome {
            Outcome::Delay(delay, inner) => {
                tokio::time::sleep(delay).await;
                *inner
            }
            other => other,
        };

        match outcome {
            Outcome::Vector(v) => Ok(vec![v; texts.len()]),
            Outcome::Status(status) => Err(status_error(status)),
            Outcome::Count(n) => Ok(vec![vec![0.0; 4]; n]),
            Outcome::Delay(..) => Err(ProviderError::other("mock", "nested delay")),
        }
    }

    async fn health_check(&self) -> bool {
        self.healthy
    }

    fn provider_type(&self) -> &str {
        self.name
    }

    fn model(&self) -> &str {
        "mock-embed"
    }

    fn base_url(&self) -> Option<&str> {
        Some("http://mock")
    }

    fn embedding_dim(&self) -> usize {
        4
    }
}

pub(super) fn as_providers(providers: &[Arc<ScriptedProvider>]) -> Vec<Arc<dyn EmbeddingProvider>> {
    providers
        .iter()
        .map(|p| p.clone() as Arc<dyn EmbeddingProvider>)
        .collect()
}

/// Cache whose every operation fails
#[derive(Debug, Default)]
pub(super) struct BrokenCache {
    pub operations: AtomicUsize,
}

#[async_trait]
impl KeyValueCache for BrokenCache {
    async fn get(&self, _key: &str) -> Result<Option<String>, CacheError> {
        self.operations.fetch_add(1, Ordering::SeqCst);
        Err(CacheError::Unavailable("connection refused".to_string()))
    }

    async fn set(&self, _key: &str, _value: &str, _ttl_secs: u64) -> Result<(), CacheError> {
        self.operations.fetch_add(1, Ordering::SeqCst);
        Err(CacheError::Unavailable("connection refused".to_string()))
    }

    async fn delete(&self, _key: &str) -> Result<(), CacheError> {
        self.operations.fetch_add(1, Ordering::SeqCst);
        Err(CacheError::Unavailable("connection refused".to_string()))
    }
}
