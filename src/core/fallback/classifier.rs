//! Failure classification
//!
//! Splits provider failures into transient overload (short recheck window)
//! and everything else (long recheck window).

use crate::core::providers::ProviderError;
use serde::Serialize;

/// Outcome class of a failed provider call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Server-side backpressure: 503, 429, timeouts, pool exhaustion
    Overload,
    /// Anything else: auth, DNS, missing model, bad responses
    PermanentFailure,
}

const OVERLOAD_MARKERS: &[&str] = &[
    "503",
    "429",
    "service unavailable",
    "too many requests",
    "timed out",
    "timeout",
    "pool exhausted",
    "connection pool",
];

/// Classify a provider error
///
/// A status code, when the error carries one, decides on its own. Text
/// markers are only consulted for errors with no status.
pub fn classify(error: &ProviderError) -> ErrorKind {
    if let Some(status) = error.status() {
        return classify_status(status);
    }
    match error {
        ProviderError::PoolExhausted { .. } => ErrorKind::Overload,
        ProviderError::ResponseParsing { .. } => ErrorKind::PermanentFailure,
        _ => classify_message(&error.to_string()),
    }
}

/// Classify by HTTP status code alone
pub fn classify_status(status: u16) -> ErrorKind {
    match status {
        429 | 503 | 408 | 504 => ErrorKind::Overload,
        _ => ErrorKind::PermanentFailure,
    }
}

/// Classify free-form error text by case-insensitive markers
pub fn classify_message(message: &str) -> ErrorKind {
    let lowered = message.to_lowercase();
    if OVERLOAD_MARKERS.iter().any(|marker| lowered.contains(marker)) {
        ErrorKind::Overload
    } else {
        ErrorKind::PermanentFailure
    }
}
