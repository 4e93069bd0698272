//! Provider configuration

use super::*;
use crate::core::fallback::FallbackError;
use crate::core::providers::ProviderType;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// One backend slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Provider discriminator (`ollama`, `openai`, `tei`)
    pub provider_type: String,
    /// Endpoint override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// API key or bearer token
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,
    /// Model name, empty means the provider default
    #[serde(default)]
    pub model: String,
    /// Native embedding dimension, 0 means the provider default
    #[serde(default)]
    pub embedding_dim: usize,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl ProviderConfig {
    pub fn new(provider_type: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            provider_type: provider_type.into(),
            base_url: None,
            api_key: None,
            model: model.into(),
            embedding_dim: 0,
            timeout_secs: default_timeout(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_embedding_dim(mut self, embedding_dim: usize) -> Self {
        self.embedding_dim = embedding_dim;
        self
    }

    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }

    pub fn model_or_default(&self, provider_type: ProviderType) -> String {
        if self.model.trim().is_empty() {
            provider_type.default_model().to_string()
        } else {
            self.model.clone()
        }
    }

    pub fn embedding_dim_or_default(&self, provider_type: ProviderType) -> usize {
        if self.embedding_dim == 0 {
            provider_type.default_embedding_dim()
        } else {
            self.embedding_dim
        }
    }

    /// Expand comma-separated host and token lists into one slot per host.
    ///
    /// Tokens pair with hosts by position. When there are fewer tokens than
    /// hosts the last token is reused for every remaining host.
    pub fn from_host_list(
        provider_type: &str,
        hosts: &str,
        tokens: Option<&str>,
        model: &str,
        embedding_dim: usize,
    ) -> Result<Vec<Self>, FallbackError> {
        let hosts = split_list(hosts);
        if hosts.is_empty() {
            return Err(FallbackError::Configuration(format!(
                "No hosts configured for provider type '{}'",
                provider_type
            )));
        }
        let tokens = tokens.map(split_list).unwrap_or_default();

        Ok(hosts
            .into_iter()
            .enumerate()
            .map(|(i, host)| {
                let token = tokens.get(i).or_else(|| tokens.last()).cloned();
                Self {
                    provider_type: provider_type.to_string(),
                    base_url: Some(host),
                    api_key: token,
                    model: model.to_string(),
                    embedding_dim,
                    timeout_secs: default_timeout(),
                }
            })
            .collect())
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
