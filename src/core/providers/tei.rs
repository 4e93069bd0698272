//! Hugging Face text-embeddings-inference provider

use super::shared::{build_client, endpoint, fingerprint, post_json, probe};
use super::{Embedding, EmbeddingProvider, ProviderError, ProviderType};
use crate::config::ProviderConfig;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;

const PROVIDER_NAME: &str = "tei";

/// TEI provider
#[derive(Debug)]
pub struct TeiProvider {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    model: String,
    embedding_dim: usize,
}

impl TeiProvider {
    pub fn new(config: &ProviderConfig) -> Result<Self, ProviderError> {
        let base_url = config
            .base_url
            .clone()
            .ok_or_else(|| ProviderError::invalid_request(PROVIDER_NAME, "base_url is required"))?;

        Ok(Self {
            client: build_client(PROVIDER_NAME, config.timeout())?,
            base_url,
            api_key: config.api_key.clone(),
            model: config.model_or_default(ProviderType::Tei),
            embedding_dim: config.embedding_dim_or_default(ProviderType::Tei),
        })
    }
}

#[async_trait]
impl EmbeddingProvider for TeiProvider {
    async fn generate_raw(&self, texts: &[String]) -> Result<Vec<Embedding>, ProviderError> {
        let body = json!({
            "inputs": texts,
            "truncate": true,
        });
        let url = endpoint(&self.base_url, "embed");
        post_json(
            PROVIDER_NAME,
            &self.client,
            &url,
            self.api_key.as_deref(),
            &body,
        )
        .await
    }

    async fn health_check(&self) -> bool {
        probe(
            &self.client,
            &endpoint(&self.base_url, "health"),
            self.api_key.as_deref(),
        )
        .await
    }

    fn provider_type(&self) -> &str {
        PROVIDER_NAME
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn base_url(&self) -> Option<&str> {
        Some(&self.base_url)
    }

    fn embedding_dim(&self) -> usize {
        self.embedding_dim
    }

    fn credential_fingerprint(&self) -> Option<String> {
        self.api_key.as_deref().map(fingerprint)
    }
}
