//! Configuration to orchestrator wiring

use crate::common::MockBackend;
use embedding_fallback::{EmbeddingConfig, FallbackError, FallbackOrchestrator, ProviderType};
use std::collections::HashMap;
use std::io::Write;

#[tokio::test]
async fn test_yaml_file_builds_working_orchestrator() {
    let ollama = MockBackend::failing(ProviderType::Ollama, 503).await;
    let tei = MockBackend::healthy(ProviderType::Tei, vec![0.1, 0.2, 0.3]).await;

    let yaml = format!(
        r#"
providers:
  - provider_type: ollama
    base_url: {}
    model: nomic-embed-text
  - provider_type: tei
    base_url: {}
    timeout_secs: 5
fallback:
  max_retries_per_provider: 2
  retry_backoff_ms: 0
cache:
  key_prefix: "test:embeddings"
"#,
        ollama.server.uri(),
        tei.server.uri()
    );
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(yaml.as_bytes()).unwrap();

    let config = assert_ok!(EmbeddingConfig::from_file(file.path()).await);
    assert_eq!(config.providers.len(), 2);
    assert!(config.fallback.fail_on_all_providers);

    let orchestrator = assert_ok!(FallbackOrchestrator::from_config(&config).await);
    assert!(
        orchestrator
            .health_cache()
            .preferred_key()
            .starts_with("test:embeddings:")
    );

    let embedding = assert_ok!(orchestrator.generate("hello").await);
    assert_eq!(embedding, Some(vec![0.1, 0.2, 0.3]));
    assert_eq!(ollama.embed_calls().await, 2);

    let stats = orchestrator.get_provider_stats().await;
    assert!(!stats.health_cache_enabled);
    assert_eq!(stats.providers[1].model, "BAAI/bge-base-en-v1.5");
}

#[tokio::test]
async fn test_env_host_list_builds_one_slot_per_host() {
    let first = MockBackend::failing(ProviderType::Ollama, 500).await;
    let second = MockBackend::healthy(ProviderType::Ollama, vec![1.0; 4]).await;

    let env: HashMap<&str, String> = HashMap::from([
        ("EMBEDDING_PROVIDER", "ollama".to_string()),
        (
            "EMBEDDING_HOSTS",
            format!("{}, {}", first.server.uri(), second.server.uri()),
        ),
        ("EMBEDDING_RETRY_BACKOFF_MS", "0".to_string()),
        ("EMBEDDING_MAX_RETRIES_PER_PROVIDER", "3".to_string()),
    ]);
    let config = assert_ok!(EmbeddingConfig::from_env_with(|key| env.get(key).cloned()));
    assert_eq!(config.providers.len(), 2);

    let orchestrator = assert_ok!(FallbackOrchestrator::from_config(&config).await);
    assert_eq!(orchestrator.slots().len(), 2);

    let embedding = assert_ok!(orchestrator.generate("hello").await);
    assert_eq!(embedding.map(|e| e.len()), Some(4));
    assert_eq!(first.embed_calls().await, 3);
}

#[tokio::test]
async fn test_unknown_provider_type_is_rejected() {
    let env: HashMap<&str, String> = HashMap::from([
        ("EMBEDDING_PROVIDER", "word2vec".to_string()),
        ("EMBEDDING_HOSTS", "http://localhost:1234".to_string()),
    ]);
    let err = assert_err!(EmbeddingConfig::from_env_with(|key| env.get(key).cloned()));
    assert!(matches!(err, FallbackError::UnknownProviderType(ref t) if t == "word2vec"));
}

#[tokio::test]
async fn test_empty_config_is_rejected() {
    let err = assert_err!(FallbackOrchestrator::from_config(&EmbeddingConfig::default()).await);
    assert!(matches!(err, FallbackError::Configuration(_)));
}

#[cfg(feature = "redis")]
#[tokio::test]
async fn test_unreachable_redis_disables_health_cache() {
    let tei = MockBackend::healthy(ProviderType::Tei, vec![1.0]).await;
    let mut config = EmbeddingConfig::default();
    config.providers.push(tei.config());
    config.cache.redis_url = Some("redis://127.0.0.1:1".to_string());

    let orchestrator = assert_ok!(FallbackOrchestrator::from_config(&config).await);
    assert!(!orchestrator.health_cache().is_enabled());
    assert_eq!(assert_ok!(orchestrator.generate("x").await), Some(vec![1.0]));
}
