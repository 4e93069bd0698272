//! Fallback error types
//!
//! Attempt-level failures never leave the orchestrator on their own; they
//! are classified, recorded and folded into [`FallbackError::AllProvidersExhausted`].

use std::fmt;

/// One provider visited during an exhausted call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttemptedProvider {
    pub index: usize,
    pub provider_type: String,
}

impl fmt::Display for AttemptedProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} ({})", self.index, self.provider_type)
    }
}

/// Errors surfaced by the embedding client
#[derive(Debug, Clone, thiserror::Error)]
pub enum FallbackError {
    /// Invalid construction input
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Provider discriminator not recognised
    #[error("Unknown provider type: {0}")]
    UnknownProviderType(String),

    /// Every configured provider was tried and failed within one call
    #[error("All embedding providers failed (tried: {}): {last_error}", format_attempted(.attempted))]
    AllProvidersExhausted {
        attempted: Vec<AttemptedProvider>,
        last_error: String,
    },

    /// Provider index outside the configured range
    #[error("Provider index {index} out of range (0..{len})")]
    InvalidProviderIndex { index: usize, len: usize },
}

fn format_attempted(attempted: &[AttemptedProvider]) -> String {
    if attempted.is_empty() {
        return "none".to_string();
    }
    attempted
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
