//! Basic Redis cache operations

use super::pool::RedisCache;
use crate::storage::cache::{CacheError, KeyValueCache};
use async_trait::async_trait;
use redis::AsyncCommands;

#[async_trait]
impl KeyValueCache for RedisCache {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        let Some(mut conn) = self.connection.clone() else {
            return Ok(None);
        };
        let value: Option<String> = conn.get(key).await?;
        Ok(value)
    }

    async fn set(&self, key: &str, value: &str, ttl_secs: u64) -> Result<(), CacheError> {
        let Some(mut conn) = self.connection.clone() else {
            return Ok(());
        };
        if ttl_secs > 0 {
            let _: () = conn.set_ex(key, value, ttl_secs).await?;
        } else {
            let _: () = conn.set(key, value).await?;
        }
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), CacheError> {
        let Some(mut conn) = self.connection.clone() else {
            return Ok(());
        };
        let _: () = conn.del(key).await?;
        Ok(())
    }
}
