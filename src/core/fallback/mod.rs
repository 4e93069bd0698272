//! Embedding provider failover
//!
//! Tries an ordered list of embedding providers, remembers which ones are
//! healthy or overloaded in a shared cache, and returns the first success.
//!
//! ## Module Structure
//!
//! - `classifier` - Overload vs. permanent failure classification
//! - `error` - Client-facing error type
//! - `health_cache` - Cache-backed health flags and recheck windows
//! - `orchestrator` - The orchestrator struct, construction and stats
//! - `selection` - Candidate ordering and gating
//! - `slot` - Provider slots and per-slot counters
//! - `stats` - Serializable statistics snapshot
//! - `execute_impl` - `generate` / `generate_batch` with retry and failover

pub mod classifier;
pub mod error;
pub mod execute_impl;
pub mod health_cache;
pub mod orchestrator;
pub mod selection;
pub mod slot;
pub mod stats;

#[cfg(test)]
mod tests;

pub use classifier::{ErrorKind, classify};
pub use error::{AttemptedProvider, FallbackError};
pub use health_cache::{DEFAULT_KEY_PREFIX, HEALTHY_TTL_SECS, HealthCache, OVERLOADED_TTL_SECS};
pub use orchestrator::FallbackOrchestrator;
pub use selection::{Gate, candidate_order};
pub use slot::ProviderSlot;
pub use stats::{FallbackStats, ProviderStats};
