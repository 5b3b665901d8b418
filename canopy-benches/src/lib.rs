//! Benchmark support crate for canopy.
//!
//! Provides seeded synthetic graphs and parameter types used by the Criterion
//! benchmarks that compare the contraction strategies.

pub mod error;
pub mod graph;
pub mod params;
