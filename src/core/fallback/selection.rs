//! Candidate ordering and gating
//!
//! One logical call visits every slot at most once, starting from the
//! preferred provider and wrapping around.

use super::classifier::ErrorKind;
use super::health_cache::HealthCache;
use std::time::Duration;

/// Gating decision for one candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gate {
    Attempt,
    /// Overloaded and still inside the overload window
    SkipOverloaded,
    /// Known unhealthy and still inside the recheck interval
    SkipUnhealthy,
}

/// Round-robin visiting order from `start`, each index exactly once
pub fn candidate_order(start: usize, len: usize) -> Vec<usize> {
    if len == 0 {
        return Vec::new();
    }
    let start = start % len;
    (0..len).map(|offset| (start + offset) % len).collect()
}

/// Observed state of one candidate at selection time
#[derive(Debug, Clone, Copy, Default)]
pub struct CandidateState {
    pub cached_overloaded: bool,
    pub cached_healthy: Option<bool>,
    pub elapsed_since_check: Option<Duration>,
    pub last_failure_kind: Option<ErrorKind>,
}

/// Decide whether a candidate is attempted
pub fn gate(health: &HealthCache, state: &CandidateState) -> Gate {
    // The cached flag may already have expired; the in-process
    // classification keeps the shorter overload window in that case.
    let overloaded =
        state.cached_overloaded || state.last_failure_kind == Some(ErrorKind::Overload);
    let recheck_due = health.recheck_due(overloaded, state.elapsed_since_check);

    if state.cached_overloaded && !recheck_due {
        Gate::SkipOverloaded
    } else if state.cached_healthy == Some(false) && !recheck_due {
        Gate::SkipUnhealthy
    } else {
        Gate::Attempt
    }
}
