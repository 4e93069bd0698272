//! Unified Provider Error Handling
//!
//! Single error type for all embedding providers.
//!
//! | Variant | Purpose | HTTP Status |
//! |------|------|------------|
//! | Authentication | Bad or missing credentials | 401/403 |
//! | RateLimit | Too many requests | 429 |
//! | ModelNotFound | Model not served by the backend | 404 |
//! | InvalidRequest | Request rejected | 400 |
//! | Network | DNS/connect/transport failure | - |
//! | Timeout | Request timed out | 408 |
//! | ServiceUnavailable | Backend overloaded or starting | 503 |
//! | PoolExhausted | Client connection pool exhausted | - |
//! | ApiError | Any other non-success status | 4xx/5xx |
//! | ResponseParsing | Unexpected response body | - |
//! | Other | Anything else | - |
//!
//! ## Usage
//!
//! ```rust
//! use embedding_fallback::ProviderError;
//!
//! let err = ProviderError::service_unavailable("ollama", "model is loading");
//! assert_eq!(err.status(), Some(503));
//! ```

/// Unified provider error type
#[derive(Debug, Clone, thiserror::Error)]
pub enum ProviderError {
    #[error("Authentication failed for {provider}: {message}")]
    Authentication {
        provider: &'static str,
        message: String,
    },

    #[error("Rate limit exceeded for {provider}: {message}")]
    RateLimit {
        provider: &'static str,
        message: String,
        retry_after: Option<u64>,
    },

    #[error("Model '{model}' not found for {provider}")]
    ModelNotFound {
        provider: &'static str,
        model: String,
    },

    #[error("Invalid request for {provider}: {message}")]
    InvalidRequest {
        provider: &'static str,
        message: String,
    },

    #[error("Network error for {provider}: {message}")]
    Network {
        provider: &'static str,
        message: String,
    },

    #[error("Timeout for {provider}: {message}")]
    Timeout {
        provider: &'static str,
        message: String,
    },

    #[error("Service unavailable for {provider}: {message}")]
    ServiceUnavailable {
        provider: &'static str,
        message: String,
    },

    #[error("Connection pool exhausted for {provider}: {message}")]
    PoolExhausted {
        provider: &'static str,
        message: String,
    },

    /// API error with status code
    #[error("API error for {provider} (status {status}): {message}")]
    ApiError {
        provider: &'static str,
        status: u16,
        message: String,
    },

    #[error("Failed to parse {provider} response: {message}")]
    ResponseParsing {
        provider: &'static str,
        message: String,
    },

    #[error("{provider} error: {message}")]
    Other {
        provider: &'static str,
        message: String,
    },
}

impl ProviderError {
    /// Create authentication error
    pub fn authentication(provider: &'static str, message: impl Into<String>) -> Self {
        Self::Authentication {
            provider,
            message: message.into(),
        }
    }

    /// Create rate limit error
    pub fn rate_limit(provider: &'static str, retry_after: Option<u64>) -> Self {
        Self::RateLimit {
            provider,
            message: match retry_after {
                Some(seconds) => format!("Rate limit exceeded. Retry after {} seconds", seconds),
                None => "Rate limit exceeded".to_string(),
            },
            retry_after,
        }
    }

    /// Create model not found error
    pub fn model_not_found(provider: &'static str, model: impl Into<String>) -> Self {
        Self::ModelNotFound {
            provider,
            model: model.into(),
        }
    }

    /// Create invalid request error
    pub fn invalid_request(provider: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidRequest {
            provider,
            message: message.into(),
        }
    }

    /// Create network error
    pub fn network(provider: &'static str, message: impl Into<String>) -> Self {
        Self::Network {
            provider,
            message: message.into(),
        }
    }

    /// Create timeout error
    pub fn timeout(provider: &'static str, message: impl Into<String>) -> Self {
        Self::Timeout {
            provider,
            message: message.into(),
        }
    }

    /// Create service unavailable error
    pub fn service_unavailable(provider: &'static str, message: impl Into<String>) -> Self {
        Self::ServiceUnavailable {
            provider,
            message: message.into(),
        }
    }

    /// Create connection pool exhaustion error
    pub fn pool_exhausted(provider: &'static str, message: impl Into<String>) -> Self {
        Self::PoolExhausted {
            provider,
            message: message.into(),
        }
    }

    /// Create API error with an explicit status
    pub fn api_error(provider: &'static str, status: u16, message: impl Into<String>) -> Self {
        Self::ApiError {
            provider,
            status,
            message: message.into(),
        }
    }

    /// Create response parsing error
    pub fn response_parsing(provider: &'static str, message: impl Into<String>) -> Self {
        Self::ResponseParsing {
            provider,
            message: message.into(),
        }
    }

    /// Create a catch-all error
    pub fn other(provider: &'static str, message: impl Into<String>) -> Self {
        Self::Other {
            provider,
            message: message.into(),
        }
    }

    /// Get the provider name that produced the error
    pub fn provider(&self) -> &'static str {
        match self {
            Self::Authentication { provider, .. }
            | Self::RateLimit { provider, .. }
            | Self::ModelNotFound { provider, .. }
            | Self::InvalidRequest { provider, .. }
            | Self::Network { provider, .. }
            | Self::Timeout { provider, .. }
            | Self::ServiceUnavailable { provider, .. }
            | Self::PoolExhausted { provider, .. }
            | Self::ApiError { provider, .. }
            | Self::ResponseParsing { provider, .. }
            | Self::Other { provider, .. } => provider,
        }
    }

    /// HTTP status code carried by the error, when the transport reported one
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Authentication { .. } => Some(401),
            Self::RateLimit { .. } => Some(429),
            Self::ModelNotFound { .. } => Some(404),
            Self::InvalidRequest { .. } => Some(400),
            Self::Timeout { .. } => Some(408),
            Self::ServiceUnavailable { .. } => Some(503),
            Self::ApiError { status, .. } => Some(*status),
            Self::Network { .. }
            | Self::PoolExhausted { .. }
            | Self::ResponseParsing { .. }
            | Self::Other { .. } => None,
        }
    }
}
