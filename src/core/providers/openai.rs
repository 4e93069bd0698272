//! OpenAI-compatible embedding provider
//!
//! Covers the hosted OpenAI API and any server exposing the same
//! `POST /embeddings` contract (vLLM, LM Studio, LiteLLM proxies).

use super::shared::{build_client, endpoint, fingerprint, post_json, probe};
use super::{Embedding, EmbeddingProvider, ProviderError, ProviderType};
use crate::config::ProviderConfig;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

const PROVIDER_NAME: &str = "openai";

/// Default OpenAI API base
pub const DEFAULT_OPENAI_URL: &str = "https://api.openai.com/v1";

#[derive(Debug, Deserialize)]
struct EmbeddingData {
    embedding: Embedding,
    #[serde(default)]
    index: usize,
}

#[derive(Debug, Deserialize)]
struct EmbeddingsResponse {
    data: Vec<EmbeddingData>,
}

/// OpenAI provider
#[derive(Debug)]
pub struct OpenAIProvider {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    model: String,
    embedding_dim: usize,
}

impl OpenAIProvider {
    pub fn new(config: &ProviderConfig) -> Result<Self, ProviderError> {
        let base_url = config
            .base_url
            .clone()
            .unwrap_or_else(|| DEFAULT_OPENAI_URL.to_string());

        // The hosted API always needs a key; self-hosted compatibles may not.
        if config.api_key.is_none() && base_url == DEFAULT_OPENAI_URL {
            return Err(ProviderError::authentication(
                PROVIDER_NAME,
                "api_key is required for the hosted OpenAI API",
            ));
        }

        Ok(Self {
            client: build_client(PROVIDER_NAME, config.timeout())?,
            base_url,
            api_key: config.api_key.clone(),
            model: config.model_or_default(ProviderType::OpenAI),
            embedding_dim: config.embedding_dim_or_default(ProviderType::OpenAI),
        })
    }
}

#[async_trait]
impl EmbeddingProvider for OpenAIProvider {
    async fn generate_raw(&self, texts: &[String]) -> Result<Vec<Embedding>, ProviderError> {
        let body = json!({
            "model": self.model,
            "input": texts,
            "encoding_format": "float",
        });
        let url = endpoint(&self.base_url, "embeddings");
        let mut response: EmbeddingsResponse = post_json(
            PROVIDER_NAME,
            &self.client,
            &url,
            self.api_key.as_deref(),
            &body,
        )
        .await?;

        response.data.sort_by_key(|d| d.index);
        Ok(response.data.into_iter().map(|d| d.embedding).collect())
    }

    async fn health_check(&self) -> bool {
        probe(
            &self.client,
            &endpoint(&self.base_url, "models"),
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
