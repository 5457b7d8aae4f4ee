//! CLI library components for whatstap.

pub mod config;
pub mod logging;
pub mod summary;
