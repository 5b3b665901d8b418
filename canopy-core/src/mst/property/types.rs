//! Fixture and configuration types for the property suite.

use canopy_test_support::profile::concurrency_repetitions;

use crate::{EdgeList, StrategyKind};

/// Shape of the generated graph and its weights.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) enum WeightDistribution {
    /// Each edge has a weight drawn from a continuous range.
    Unique,
    /// Edges draw from a pool of one to three weights, so most edges tie.
    ManyIdentical,
    /// A random spanning path plus roughly `n / 2` to `n` extra edges.
    Sparse,
    /// Edge probability between 0.7 and 0.95 on a smaller node count.
    Dense,
    /// Two to five components with no edges between them.
    Disconnected,
    /// Every generated pair appears two to four times with mixed weights.
    ParallelEdges,
}

/// Generated input plus the run settings it is checked under.
#[derive(Clone, Debug)]
pub(super) struct MstFixture {
    pub node_count: usize,
    pub edges: EdgeList,
    pub distribution: WeightDistribution,
    pub strategy: StrategyKind,
    pub threads: usize,
}

impl MstFixture {
    /// Describes the fixture for failure messages.
    pub(super) fn describe(&self) -> String {
        format!(
            "distribution={:?}, strategy={}, threads={}, nodes={}, edges={}",
            self.distribution,
            self.strategy,
            self.threads,
            self.node_count,
            self.edges.len(),
        )
    }
}

/// Settings for the repeatability property.
pub(super) struct ConcurrencyConfig {
    /// Runs per thread count.
    pub repetitions: usize,
}

impl ConcurrencyConfig {
    /// Reads `CANOPY_MST_PBT_CONCURRENCY_REPS`, defaulting to 3.
    pub(super) fn load() -> Self {
        Self {
            repetitions: concurrency_repetitions(3),
        }
    }
}
