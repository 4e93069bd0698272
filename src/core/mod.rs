//! Core embedding client functionality

pub mod fallback;
pub mod providers;
