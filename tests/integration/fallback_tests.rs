//! Failover behaviour over real HTTP providers

use crate::common::assertions::{assert_counters, assert_dims};
use crate::common::{MockBackend, fallback_settings};
use embedding_fallback::{
    FallbackError, FallbackOrchestrator, KeyValueCache, MemoryCache, ProviderConfig, ProviderType,
};
use std::sync::Arc;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

fn configs(backends: &[&MockBackend]) -> Vec<ProviderConfig> {
    backends.iter().map(|b| b.config()).collect()
}

#[tokio::test]
async fn test_mixed_chain_falls_through_to_working_provider() {
    let a = MockBackend::failing(ProviderType::Ollama, 503).await;
    let b = MockBackend::failing(ProviderType::Tei, 500).await;
    let c = MockBackend::healthy(ProviderType::OpenAI, vec![0.25, 0.5, 0.75]).await;

    let orchestrator =
        assert_ok!(FallbackOrchestrator::new(&configs(&[&a, &b, &c]), fallback_settings(2), None));

    let embedding = assert_ok!(orchestrator.generate("hello").await);
    assert_eq!(embedding, Some(vec![0.25, 0.5, 0.75]));

    assert_eq!(a.embed_calls().await, 2);
    assert_eq!(b.embed_calls().await, 2);
    assert_eq!(c.embed_calls().await, 1);

    let stats = orchestrator.get_provider_stats().await;
    assert_counters(&stats, &[(0, 1), (1, 0), (0, 0)]);
    assert_eq!(stats.current_provider_index, Some(2));
}

#[tokio::test]
async fn test_unreachable_provider_is_skipped() {
    let unreachable =
        ProviderConfig::new("ollama", "nomic-embed-text").with_base_url("http://127.0.0.1:1");
    let tei = MockBackend::healthy(ProviderType::Tei, vec![1.0; 8]).await;

    let orchestrator = assert_ok!(FallbackOrchestrator::new(
        &[unreachable, tei.config()],
        fallback_settings(1),
        None
    ));

    let embedding = assert_ok!(orchestrator.generate("hello").await);
    assert_eq!(embedding.map(|e| e.len()), Some(8));

    let stats = orchestrator.get_provider_stats().await;
    assert_counters(&stats, &[(1, 0), (0, 0)]);
}

#[tokio::test]
async fn test_second_call_goes_straight_to_last_success() {
    let a = MockBackend::failing(ProviderType::Ollama, 500).await;
    let b = MockBackend::healthy(ProviderType::Ollama, vec![1.0, 2.0]).await;
    let orchestrator =
        assert_ok!(FallbackOrchestrator::new(&configs(&[&a, &b]), fallback_settings(1), None));

    assert_ok!(orchestrator.generate("first").await);
    assert_ok!(orchestrator.generate("second").await);

    assert_eq!(a.embed_calls().await, 1);
    assert_eq!(b.embed_calls().await, 2);
}

#[tokio::test]
async fn test_exhaustion_lists_every_provider() {
    let a = MockBackend::failing(ProviderType::Ollama, 503).await;
    let b = MockBackend::failing(ProviderType::Tei, 500).await;
    let orchestrator =
        assert_ok!(FallbackOrchestrator::new(&configs(&[&a, &b]), fallback_settings(2), None));

    let err = assert_err!(orchestrator.generate("x").await);
    let message = err.to_string();
    assert!(message.contains("#0 (ollama)"), "{message}");
    assert!(message.contains("#1 (tei)"), "{message}");
    match err {
        FallbackError::AllProvidersExhausted { attempted, .. } => assert_eq!(attempted.len(), 2),
        other => panic!("unexpected error: {other:?}"),
    }

    assert_eq!(a.embed_calls().await, 2);
    assert_eq!(b.embed_calls().await, 2);
}

#[tokio::test]
async fn test_exhaustion_sentinel_when_not_failing_loudly() {
    let a = MockBackend::failing(ProviderType::Ollama, 503).await;
    let b = MockBackend::failing(ProviderType::Tei, 500).await;
    let settings = fallback_settings(2).with_fail_on_all_providers(false);
    let orchestrator = assert_ok!(FallbackOrchestrator::new(&configs(&[&a, &b]), settings, None));

    assert_eq!(assert_ok!(orchestrator.generate("x").await), None);
    assert_eq!(a.embed_calls().await, 2);
    assert_eq!(b.embed_calls().await, 2);
}

#[tokio::test]
async fn test_reset_reopens_failed_providers() {
    let a = MockBackend::start(ProviderType::Ollama).await;
    Mock::given(method("POST"))
        .and(path("/api/embed"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(1)
        .mount(&a.server)
        .await;
    a.respond_with_vector(vec![3.0, 3.0]).await;
    let b = MockBackend::failing(ProviderType::Tei, 500).await;

    let cache: Arc<dyn KeyValueCache> = Arc::new(MemoryCache::new());
    let orchestrator = assert_ok!(FallbackOrchestrator::new(
        &configs(&[&a, &b]),
        fallback_settings(1),
        Some(cache)
    ));

    assert_err!(orchestrator.generate("x").await);
    assert_err!(orchestrator.generate("x").await);
    assert_eq!(a.embed_calls().await, 1);

    orchestrator.reset_failures().await;
    let stats = orchestrator.get_provider_stats().await;
    assert_counters(&stats, &[(0, 0), (0, 0)]);

    let embedding = assert_ok!(orchestrator.generate("x").await);
    assert_eq!(embedding, Some(vec![3.0, 3.0]));
    assert_eq!(a.embed_calls().await, 2);
}

#[tokio::test]
async fn test_forced_provider_takes_next_call() {
    let a = MockBackend::healthy(ProviderType::Ollama, vec![1.0]).await;
    let b = MockBackend::healthy(ProviderType::Tei, vec![2.0]).await;
    let c = MockBackend::healthy(ProviderType::OpenAI, vec![3.0]).await;
    let orchestrator =
        assert_ok!(FallbackOrchestrator::new(&configs(&[&a, &b, &c]), fallback_settings(1), None));

    assert_ok!(orchestrator.force_provider(2).await);
    assert_eq!(assert_ok!(orchestrator.generate("x").await), Some(vec![3.0]));

    assert_eq!(a.embed_calls().await, 0);
    assert_eq!(b.embed_calls().await, 0);
    assert_eq!(c.embed_calls().await, 1);
}

#[tokio::test]
async fn test_batch_is_sent_in_one_request() {
    let tei = MockBackend::healthy(ProviderType::Tei, vec![0.5; 16]).await;
    let orchestrator =
        assert_ok!(FallbackOrchestrator::new(&[tei.config()], fallback_settings(1), None));

    let texts: Vec<String> = ["alpha", "beta", "gamma"].iter().map(|s| s.to_string()).collect();
    let embeddings = assert_ok!(orchestrator.generate_batch(&texts).await).unwrap_or_default();

    assert_eq!(embeddings.len(), 3);
    assert_dims(&embeddings, 16);
    assert_eq!(tei.embed_calls().await, 1);
}

#[tokio::test]
async fn test_health_check_probes_backends() {
    let down = MockBackend::failing(ProviderType::Tei, 503).await;
    let orchestrator =
        assert_ok!(FallbackOrchestrator::new(&[down.config()], fallback_settings(1), None));
    assert!(!orchestrator.health_check().await);

    let up = MockBackend::healthy(ProviderType::Ollama, vec![1.0]).await;
    let orchestrator = assert_ok!(FallbackOrchestrator::new(
        &configs(&[&down, &up]),
        fallback_settings(1),
        None
    ));
    assert!(orchestrator.health_check().await);
}

#[tokio::test]
async fn test_processes_share_health_through_cache() {
    let a = MockBackend::failing(ProviderType::Ollama, 503).await;
    let b = MockBackend::healthy(ProviderType::Tei, vec![1.0]).await;
    let cache: Arc<dyn KeyValueCache> = Arc::new(MemoryCache::new());

    let first = assert_ok!(FallbackOrchestrator::new(
        &configs(&[&a, &b]),
        fallback_settings(1),
        Some(cache.clone())
    ));
    assert_ok!(first.generate("x").await);

    let second = assert_ok!(FallbackOrchestrator::new(
        &configs(&[&a, &b]),
        fallback_settings(1),
        Some(cache)
    ));
    assert_eq!(first.client_id(), second.client_id());
    assert_ok!(second.generate("x").await);

    assert_eq!(a.embed_calls().await, 1);
    assert_eq!(b.embed_calls().await, 2);
    assert_eq!(second.get_provider_stats().await.preferred_provider, Some(1));
}
