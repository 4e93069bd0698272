//! Configuration management
//!
//! Provider lists and fallback policy, loaded from YAML or the environment.

pub mod loader;
pub mod models;


pub use models::*;

use crate::core::fallback::FallbackError;
use crate::core::providers::ProviderType;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

/// Full embedding client configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbeddingConfig {
    /// Ordered provider slots; order is the fallback order
    #[serde(default)]
    pub providers: Vec<ProviderConfig>,
    /// Retry and exhaustion policy
    #[serde(default)]
    pub fallback: FallbackSettings,
    /// Shared health cache
    #[serde(default)]
    pub cache: CacheSettings,
}

impl EmbeddingConfig {
    /// Load configuration from a YAML file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, FallbackError> {
        let path = path.as_ref();
        info!("Loading embedding configuration from: {:?}", path);

        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            FallbackError::Configuration(format!("Failed to read config file: {}", e))
        })?;

        let config: Self = serde_yaml::from_str(&content)
            .map_err(|e| FallbackError::Configuration(format!("Failed to parse config: {}", e)))?;

        config.validate()?;
        debug!("Configuration loaded with {} providers", config.providers.len());
        Ok(config)
    }

    /// Load configuration from process environment variables
    pub fn from_env() -> Result<Self, FallbackError> {
        info!("Loading embedding configuration from environment variables");
        let config = Self::from_env_with(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Check the configuration can build an orchestrator
    pub fn validate(&self) -> Result<(), FallbackError> {
        if self.providers.is_empty() {
            return Err(FallbackError::Configuration(
                "At least one embedding provider must be configured".to_string(),
            ));
        }
        for provider in &self.providers {
            provider.provider_type.parse::<ProviderType>()?;
        }
        Ok(())
    }
}
