//! Embedding providers
//!
//! Every backend implements [`EmbeddingProvider`]. Concrete providers are
//! picked by a string discriminator at construction time via
//! [`create_provider`]; after that the orchestrator only sees the trait.

pub mod factory;
pub mod ollama;
pub mod openai;
pub(crate) mod shared;
pub mod tei;
pub mod unified_provider;


use async_trait::async_trait;
use std::fmt;
use std::str::FromStr;

use crate::core::fallback::FallbackError;

pub use factory::create_provider;
pub use ollama::OllamaProvider;
pub use openai::OpenAIProvider;
pub use tei::TeiProvider;
pub use unified_provider::ProviderError;

/// A single embedding vector
pub type Embedding = Vec<f32>;

/// Capability set shared by all embedding backends
#[async_trait]
pub trait EmbeddingProvider: Send + Sync + fmt::Debug {
    /// Embed a batch of texts, one vector per input in input order
    async fn generate_raw(&self, texts: &[String]) -> Result<Vec<Embedding>, ProviderError>;

    /// Cheap liveness probe
    async fn health_check(&self) -> bool;

    /// Provider discriminator, e.g. `ollama`
    fn provider_type(&self) -> &str;

    /// Model served by this backend
    fn model(&self) -> &str;

    /// Endpoint, when the provider has one
    fn base_url(&self) -> Option<&str> {
        None
    }

    /// Native dimension of the returned vectors
    fn embedding_dim(&self) -> usize;

    /// Stable, non-reversible fingerprint of the credential in use.
    ///
    /// Used to tell apart slots that share an endpoint but not a key.
    fn credential_fingerprint(&self) -> Option<String> {
        None
    }
}

/// Supported provider kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderType {
    /// Local Ollama server
    Ollama,
    /// OpenAI or any OpenAI-compatible embeddings API
    OpenAI,
    /// Hugging Face text-embeddings-inference server
    Tei,
}

impl ProviderType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderType::Ollama => "ollama",
            ProviderType::OpenAI => "openai",
            ProviderType::Tei => "tei",
        }
    }

    /// Model used when the configuration does not name one
    pub fn default_model(&self) -> &'static str {
        match self {
            ProviderType::Ollama => "nomic-embed-text",
            ProviderType::OpenAI => "text-embedding-3-small",
            ProviderType::Tei => "BAAI/bge-base-en-v1.5",
        }
    }

    /// Native dimension of [`ProviderType::default_model`]
    pub fn default_embedding_dim(&self) -> usize {
        match self {
            ProviderType::Ollama | ProviderType::Tei => 768,
            ProviderType::OpenAI => 1536,
        }
    }
}

impl fmt::Display for ProviderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderType {
    type Err = FallbackError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ollama" => Ok(ProviderType::Ollama),
            "openai" | "openai_compatible" => Ok(ProviderType::OpenAI),
            "tei" | "text-embeddings-inference" => Ok(ProviderType::Tei),
            other => Err(FallbackError::UnknownProviderType(other.to_string())),
        }
    }
}
