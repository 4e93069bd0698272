//! Storage layer
//!
//! Key-value backends that hold the shared provider health state.
//!
//! - `cache` - The [`KeyValueCache`] contract and its error type
//! - `memory` - In-process TTL store
//! - `redis` - Redis-backed store (feature `redis`)

pub mod cache;
pub mod memory;
#[cfg(feature = "redis")]
pub mod redis;

pub use cache::{CacheError, KeyValueCache};
pub use memory::MemoryCache;
#[cfg(feature = "redis")]
pub use self::redis::RedisCache;
