//! Shared test utilities for `canopy-core`.

use canopy_test_support::profile::ProptestRunProfile;
use proptest::test_runner::Config as ProptestConfig;

use crate::{EdgeList, KruskalBuilder, KruskalConfig, StrategyKind};

/// Builds a standard proptest configuration from the shared CI profile.
///
/// This keeps property suites aligned on the same `PROGTEST_CASES` and
/// `CANOPY_PBT_FORK` interpretation.
#[must_use]
pub(crate) fn suite_proptest_config(default_cases: u32) -> ProptestConfig {
    let profile = ProptestRunProfile::load(default_cases, false);
    ProptestConfig {
        cases: profile.cases(),
        fork: profile.fork(),
        ..ProptestConfig::default()
    }
}

/// Builds an edge list from `(source, target, weight, sequence)` tuples.
#[must_use]
pub(crate) fn edge_list(edges: &[(usize, usize, f32, u64)]) -> EdgeList {
    edges
        .iter()
        .map(|&(source, target, weight, sequence)| {
            crate::WeightedEdge::new(source, target, weight, sequence)
        })
        .collect()
}

/// Returns a configuration for `strategy` on a dedicated pool of `threads`.
#[must_use]
pub(crate) fn config_for(strategy: StrategyKind, threads: usize) -> KruskalConfig {
    KruskalBuilder::new()
        .with_strategy(strategy)
        .with_threads(threads)
        .build()
        .expect("test configuration must be valid")
}
