//! Redis connection management
//!
//! A single multiplexed connection is shared by every clone of the cache.

use crate::storage::cache::CacheError;
use redis::{Client, aio::MultiplexedConnection};
use tracing::{debug, info, warn};

/// Redis-backed cache (supports no-op mode when Redis is unavailable)
#[derive(Clone)]
pub struct RedisCache {
    /// Multiplexed connection (None in no-op mode)
    pub(crate) connection: Option<MultiplexedConnection>,
    /// Sanitized URL, for logs and Debug
    pub(crate) url: String,
}

impl std::fmt::Debug for RedisCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisCache")
            .field("url", &self.url)
            .field("noop", &self.is_noop())
            .finish()
    }
}

impl RedisCache {
    /// Connect to Redis
    pub async fn connect(url: &str) -> Result<Self, CacheError> {
        let sanitized = Self::sanitize_url(url);
        info!("Connecting health cache to Redis at {}", sanitized);

        let client = Client::open(url)?;
        let connection = client.get_multiplexed_async_connection().await?;

        debug!("Redis connection established");
        Ok(Self {
            connection: Some(connection),
            url: sanitized,
        })
    }

    /// Connect and PING, falling back to no-op mode when Redis cannot be
    /// reached or does not answer
    pub async fn connect_or_noop(url: &str) -> Self {
        let cache = match Self::connect(url).await {
            Ok(cache) => cache,
            Err(e) => {
                warn!("Redis unavailable ({}), health cache disabled", e);
                return Self::create_noop();
            }
        };

        match cache.health_check().await {
            Ok(()) => cache,
            Err(e) => {
                warn!("Redis at {} failed PING ({}), health cache disabled", cache.url, e);
                Self::create_noop()
            }
        }
    }

    /// Create a no-op cache that stores nothing
    pub fn create_noop() -> Self {
        Self {
            connection: None,
            url: String::new(),
        }
    }

    /// Check if this is a no-op cache
    pub fn is_noop(&self) -> bool {
        self.connection.is_none()
    }

    /// Round-trip a PING
    pub async fn health_check(&self) -> Result<(), CacheError> {
        let Some(mut conn) = self.connection.clone() else {
            debug!("Redis health check skipped (no-op mode)");
            return Ok(());
        };

        let _: String = redis::cmd("PING").query_async(&mut conn).await?;
        Ok(())
    }

    /// Sanitize Redis URL for logging (hide password)
    pub(crate) fn sanitize_url(url: &str) -> String {
        if let Ok(parsed) = url::Url::parse(url) {
            let mut sanitized = parsed.clone();
            if sanitized.password().is_some() {
                let _ = sanitized.set_password(Some("***"));
            }
            sanitized.to_string()
        } else {
            "invalid_url".to_string()
        }
    }
}
