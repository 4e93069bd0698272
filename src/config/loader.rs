//! Environment loading
//!
//! Provider slots come from a comma-separated host list; every other knob
//! has a default.

use super::models::*;
use super::EmbeddingConfig;
use crate::core::fallback::FallbackError;
use crate::core::providers::ProviderType;
use std::str::FromStr;
use tracing::debug;

pub const ENV_PROVIDER: &str = "EMBEDDING_PROVIDER";
pub const ENV_HOSTS: &str = "EMBEDDING_HOSTS";
pub const ENV_TOKENS: &str = "EMBEDDING_TOKENS";
pub const ENV_MODEL: &str = "EMBEDDING_MODEL";
pub const ENV_DIM: &str = "EMBEDDING_DIM";
pub const ENV_TIMEOUT: &str = "EMBEDDING_TIMEOUT";
pub const ENV_MAX_RETRIES: &str = "EMBEDDING_MAX_RETRIES_PER_PROVIDER";
pub const ENV_FAIL_ON_ALL: &str = "EMBEDDING_FAIL_ON_ALL_PROVIDERS";
pub const ENV_HEALTH_INTERVAL: &str = "EMBEDDING_HEALTH_CHECK_INTERVAL";
pub const ENV_BACKOFF_MS: &str = "EMBEDDING_RETRY_BACKOFF_MS";
pub const ENV_REDIS_URL: &str = "REDIS_URL";
pub const ENV_KEY_PREFIX: &str = "EMBEDDING_CACHE_PREFIX";

impl EmbeddingConfig {
    /// Build a configuration from an arbitrary variable lookup
    pub fn from_env_with<F>(lookup: F) -> Result<Self, FallbackError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let provider_type = lookup(ENV_PROVIDER).unwrap_or_else(|| "ollama".to_string());
        let kind: ProviderType = provider_type.parse()?;

        let hosts = lookup(ENV_HOSTS).ok_or_else(|| {
            FallbackError::Configuration(format!("{} must list at least one host", ENV_HOSTS))
        })?;
        let tokens = lookup(ENV_TOKENS);
        let model = lookup(ENV_MODEL).unwrap_or_else(|| kind.default_model().to_string());
        let dim = parse_var(&lookup, ENV_DIM)?.unwrap_or(0);

        let mut providers =
            ProviderConfig::from_host_list(kind.as_str(), &hosts, tokens.as_deref(), &model, dim)?;
        if let Some(timeout) = parse_var(&lookup, ENV_TIMEOUT)? {
            for provider in &mut providers {
                provider.timeout_secs = timeout;
            }
        }

        let defaults = FallbackSettings::default();
        let fallback = FallbackSettings {
            max_retries_per_provider: parse_var(&lookup, ENV_MAX_RETRIES)?
                .unwrap_or(defaults.max_retries_per_provider),
            fail_on_all_providers: parse_var(&lookup, ENV_FAIL_ON_ALL)?
                .unwrap_or(defaults.fail_on_all_providers),
            health_check_interval_secs: parse_var(&lookup, ENV_HEALTH_INTERVAL)?
                .unwrap_or(defaults.health_check_interval_secs),
            retry_backoff_ms: parse_var(&lookup, ENV_BACKOFF_MS)?.unwrap_or(defaults.retry_backoff_ms),
        };

        let cache = CacheSettings {
            redis_url: lookup(ENV_REDIS_URL).filter(|s| !s.trim().is_empty()),
            key_prefix: lookup(ENV_KEY_PREFIX).filter(|s| !s.trim().is_empty()),
        };

        debug!(
            "Loaded {} {} providers from environment",
            providers.len(),
            kind
        );

        Ok(Self {
            providers,
            fallback,
            cache,
        })
    }
}

fn parse_var<T, F>(lookup: &F, key: &str) -> Result<Option<T>, FallbackError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) if raw.trim().is_empty() => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e| FallbackError::Configuration(format!("Invalid {}: {}", key, e))),
    }
}
