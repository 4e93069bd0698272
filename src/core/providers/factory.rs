//! Provider factory
//!
//! The only place that turns a configuration discriminator into a
//! concrete provider type.

use super::{EmbeddingProvider, OllamaProvider, OpenAIProvider, ProviderType, TeiProvider};
use crate::config::ProviderConfig;
use crate::core::fallback::FallbackError;
use std::sync::Arc;
use tracing::debug;

/// Create a provider from its configuration record
pub fn create_provider(config: &ProviderConfig) -> Result<Arc<dyn EmbeddingProvider>, FallbackError> {
    let provider_type: ProviderType = config.provider_type.parse()?;
    debug!(
        "Creating {} provider (model: {:?}, base_url: {:?})",
        provider_type, config.model, config.base_url
    );

    let provider: Arc<dyn EmbeddingProvider> = match provider_type {
        ProviderType::Ollama => Arc::new(OllamaProvider::new(config).map_err(invalid_config)?),
        ProviderType::OpenAI => Arc::new(OpenAIProvider::new(config).map_err(invalid_config)?),
        ProviderType::Tei => Arc::new(TeiProvider::new(config).map_err(invalid_config)?),
    };

    Ok(provider)
}

fn invalid_config(err: super::ProviderError) -> FallbackError {
    FallbackError::Configuration(err.to_string())
}
