//! Property-based tests for the parallel spanning forest.
//!
//! Every property runs against both contraction strategies: agreement with a
//! sequential oracle, structural invariants of the committed set,
//! repeatability across runs and thread counts, and idempotence of a second
//! dispatch over an already contracted forest.

mod generators;
mod oracle;
mod properties;
mod types;
