//! Ollama embedding provider
//!
//! Talks to a local or LAN Ollama server through `POST /api/embed`.

use super::shared::{build_client, endpoint, post_json, probe};
use super::{Embedding, EmbeddingProvider, ProviderError, ProviderType};
use crate::config::ProviderConfig;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

const PROVIDER_NAME: &str = "ollama";

/// Default Ollama endpoint
pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";

#[derive(Debug, Deserialize)]
struct EmbedResponse {
    embeddings: Vec<Embedding>,
}

/// Ollama provider
#[derive(Debug)]
pub struct OllamaProvider {
    client: Client,
    base_url: String,
    model: String,
    embedding_dim: usize,
}

impl OllamaProvider {
    pub fn new(config: &ProviderConfig) -> Result<Self, ProviderError> {
        let base_url = config
            .base_url
            .clone()
            .unwrap_or_else(|| DEFAULT_OLLAMA_URL.to_string());

        Ok(Self {
            client: build_client(PROVIDER_NAME, config.timeout())?,
            base_url,
            model: config.model_or_default(ProviderType::Ollama),
            embedding_dim: config.embedding_dim_or_default(ProviderType::Ollama),
        })
    }
}

#[async_trait]
impl EmbeddingProvider for OllamaProvider {
    async fn generate_raw(&self, texts: &[String]) -> Result<Vec<Embedding>, ProviderError> {
        let body = json!({
            "model": self.model,
            "input": texts,
        });
        let url = endpoint(&self.base_url, "api/embed");
        let response: EmbedResponse = post_json(PROVIDER_NAME, &self.client, &url, None, &body).await?;
        Ok(response.embeddings)
    }

    async fn health_check(&self) -> bool {
        probe(&self.client, &endpoint(&self.base_url, "api/tags"), None).await
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
}
