//! Live failover chains

use embedding_fallback::{FallbackOrchestrator, FallbackSettings, ProviderConfig};

#[tokio::test]
#[ignore]
async fn test_live_ollama_behind_dead_host() {
    skip_without_env!("OLLAMA_HOST");
    let host = std::env::var("OLLAMA_HOST").unwrap_or_default();

    let providers = [
        ProviderConfig::new("ollama", "").with_base_url("http://127.0.0.1:1"),
        ProviderConfig::new("ollama", "").with_base_url(host),
    ];
    let orchestrator =
        assert_ok!(FallbackOrchestrator::new(&providers, FallbackSettings::default(), None));

    let embedding = assert_ok!(orchestrator.generate("The quick brown fox").await);
    assert!(embedding.is_some_and(|e| !e.is_empty()));
    assert_eq!(orchestrator.current_provider_index(), Some(1));
    assert!(orchestrator.health_check().await);
}

#[tokio::test]
#[ignore]
async fn test_live_mixed_chain_batch() {
    skip_without_env!("OLLAMA_HOST");
    skip_without_env!("TEI_HOST");

    let providers = [
        ProviderConfig::new("tei", "").with_base_url(std::env::var("TEI_HOST").unwrap_or_default()),
        ProviderConfig::new("ollama", "")
            .with_base_url(std::env::var("OLLAMA_HOST").unwrap_or_default()),
    ];
    let orchestrator =
        assert_ok!(FallbackOrchestrator::new(&providers, FallbackSettings::default(), None));

    let texts: Vec<String> = (0..8).map(|i| format!("document number {i}")).collect();
    let embeddings = assert_ok!(orchestrator.generate_batch(&texts).await).unwrap_or_default();
    assert_eq!(embeddings.len(), texts.len());

    let stats = orchestrator.get_provider_stats().await;
    println!("{}", serde_json::to_string_pretty(&stats).unwrap_or_default());
}
