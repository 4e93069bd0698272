//! Redis storage implementation
//!
//! ## Module Structure
//!
//! - `pool` - Connection setup, no-op mode and health checks
//! - `cache` - [`KeyValueCache`](crate::storage::KeyValueCache) operations (get, set with ttl, delete)
//! - `tests` - Module tests

mod cache;
mod pool;

pub use pool::RedisCache;
