//! Utilities shared by the library and the probe binary

pub mod logging;
