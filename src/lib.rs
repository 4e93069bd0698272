//! # embedding-fallback
//!
//! Failover across an ordered list of embedding providers (Ollama,
//! OpenAI-compatible endpoints, Text Embeddings Inference).
//!
//! ## Features
//!
//! - **Ordered failover**: providers are tried in a fixed order, starting
//!   from the last one that worked
//! - **Overload aware**: 429/503/timeouts are rechecked after 30 seconds,
//!   other failures only after the health check interval
//! - **Shared health**: health flags live in Redis so that every process
//!   with the same provider list skips the same broken backends
//! - **Bounded calls**: per-attempt timeouts, retries with backoff and an
//!   optional caller deadline
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use embedding_fallback::{EmbeddingConfig, FallbackOrchestrator};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = EmbeddingConfig::from_env()?;
//!     let orchestrator = FallbackOrchestrator::from_config(&config).await?;
//!
//!     if let Some(embedding) = orchestrator.generate("hello world").await? {
//!         println!("{} dimensions", embedding.len());
//!     }
//!     Ok(())
//! }
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod config;
pub mod core;
pub mod storage;
pub mod utils;

// Re-export main types
pub use config::{CacheSettings, EmbeddingConfig, FallbackSettings, ProviderConfig};
pub use core::fallback::{
    AttemptedProvider, ErrorKind, FallbackError, FallbackOrchestrator, FallbackStats,
    HealthCache, ProviderSlot, ProviderStats, classify,
};
pub use core::providers::{
    Embedding, EmbeddingProvider, ProviderError, ProviderType, create_provider,
};
pub use storage::{CacheError, KeyValueCache, MemoryCache};

#[cfg(feature = "redis")]
pub use storage::RedisCache;

/// Result type for embedding client operations
pub type Result<T> = std::result::Result<T, FallbackError>;

/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
