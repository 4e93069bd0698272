//! Health cache configuration

use serde::{Deserialize, Serialize};

/// Shared health cache settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheSettings {
    /// Redis URL; no URL means health caching is disabled
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redis_url: Option<String>,
    /// Key namespace override, `embedding:fallback` when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_prefix: Option<String>,
}
