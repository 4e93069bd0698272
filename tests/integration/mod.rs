//! Integration tests for embedding-fallback
//!
//! Real providers talk HTTP to `wiremock` servers; the orchestrator is
//! driven only through its public API.

pub mod config_tests;
pub mod fallback_tests;
