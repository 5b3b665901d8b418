//! Benchmark parameter types.
//!
//! Rendered through `Display` so Criterion benchmark ids stay short.

use std::fmt;

use canopy_core::StrategyKind;

/// Parameters for a strategy comparison run.
#[derive(Clone, Debug)]
pub struct MstBenchParams {
    /// Number of nodes in the graph.
    pub node_count: usize,
    /// Contraction strategy under test.
    pub strategy: StrategyKind,
    /// Dedicated worker threads.
    pub threads: usize,
}

impl fmt::Display for MstBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "n={},{},t={}",
            self.node_count, self.strategy, self.threads
        )
    }
}

/// Parameters for an optimistic window sweep.
#[derive(Clone, Debug)]
pub struct WindowBenchParams {
    /// Number of nodes in the graph.
    pub node_count: usize,
    /// Optimistic batch window.
    pub window: usize,
}

impl fmt::Display for WindowBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n={},w={}", self.node_count, self.window)
    }
}
