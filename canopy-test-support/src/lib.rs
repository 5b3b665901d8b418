//! Shared test utilities used across canopy crates.

pub mod profile;
pub mod tracing;
