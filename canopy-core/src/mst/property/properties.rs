//! Property runners shared by the proptest and rstest entry points.

use proptest::test_runner::{TestCaseError, TestCaseResult};

use crate::{
    KruskalBuilder, MinimumSpanningForest, MstEdge, StrategyKind, parallel_kruskal_with,
};

use crate::mst::{
    dispatch::{CommitLedger, ContractionStrategy, dispatch},
    optimistic::ClaimStrategy,
    pessimistic::LockingStrategy,
    prepare_edge_list,
};
use super::{
    oracle::{find_root, sequential_kruskal},
    types::{ConcurrencyConfig, MstFixture},
};

const WEIGHT_TOLERANCE: f64 = 1e-6;

fn run(fixture: &MstFixture, threads: usize) -> Result<MinimumSpanningForest, TestCaseError> {
    let config = KruskalBuilder::new()
        .with_strategy(fixture.strategy)
        .with_threads(threads)
        .build()
        .map_err(|e| TestCaseError::fail(format!("invalid config: {e}")))?;

    parallel_kruskal_with(fixture.node_count, &fixture.edges, &config).map_err(|e| {
        TestCaseError::fail(format!("parallel_kruskal failed: {e} ({})", fixture.describe()))
    })
}

fn ensure(condition: bool, fixture: &MstFixture, message: impl FnOnce() -> String) -> TestCaseResult {
    if condition {
        Ok(())
    } else {
        Err(TestCaseError::fail(format!("{} ({})", message(), fixture.describe())))
    }
}

/// The forest matches the sequential reference on weight, edge count and
/// component count, and the reported total agrees with the committed edges.
pub(super) fn run_oracle_equivalence_property(fixture: &MstFixture) -> TestCaseResult {
    let forest = run(fixture, fixture.threads)?;
    let oracle = sequential_kruskal(fixture.node_count, &fixture.edges);

    ensure(
        (forest.total_weight() - oracle.total_weight).abs() <= WEIGHT_TOLERANCE,
        fixture,
        || {
            format!(
                "total weight mismatch: parallel={}, oracle={}",
                forest.total_weight(),
                oracle.total_weight
            )
        },
    )?;

    let committed_weight: f64 = forest.edges().iter().map(|e| f64::from(e.weight())).sum();
    ensure(
        (committed_weight - forest.total_weight()).abs() <= WEIGHT_TOLERANCE,
        fixture,
        || format!("reported weight {} disagrees with edges {committed_weight}", forest.total_weight()),
    )?;

    ensure(forest.edges().len() == oracle.edge_count, fixture, || {
        format!(
            "edge count mismatch: parallel={}, oracle={}",
            forest.edges().len(),
            oracle.edge_count
        )
    })?;

    ensure(forest.component_count() == oracle.component_count, fixture, || {
        format!(
            "component count mismatch: parallel={}, oracle={}",
            forest.component_count(),
            oracle.component_count
        )
    })
}

/// The committed set is canonical, acyclic, sorted and sized `n - c`, and
/// the union counter agrees.
pub(super) fn run_structural_invariants_property(fixture: &MstFixture) -> TestCaseResult {
    let forest = run(fixture, fixture.threads)?;
    let edges = forest.edges();

    let mut parent: Vec<usize> = (0..fixture.node_count).collect();
    for (i, edge) in edges.iter().enumerate() {
        ensure(edge.source() < edge.target(), fixture, || {
            format!("edge {i}: not canonical ({}, {})", edge.source(), edge.target())
        })?;
        ensure(edge.weight().is_finite(), fixture, || {
            format!("edge {i}: non-finite weight {}", edge.weight())
        })?;

        let left = find_root(&mut parent, edge.source());
        let right = find_root(&mut parent, edge.target());
        ensure(left != right, fixture, || {
            format!("edge {i}: ({}, {}) closes a cycle", edge.source(), edge.target())
        })?;
        parent[right] = left;
    }

    ensure(edges.windows(2).all(|pair| pair[0] < pair[1]), fixture, || {
        "forest edges are not sorted".to_owned()
    })?;

    let expected = fixture.node_count - forest.component_count();
    ensure(edges.len() == expected, fixture, || {
        format!("edge count {}, expected n - c = {expected}", edges.len())
    })?;

    ensure(
        forest.stats().union_count() == expected as u64,
        fixture,
        || format!("union count {}, expected {expected}", forest.stats().union_count()),
    )
}

/// Repeated runs on one to four threads agree on weight, edge count and
/// component count. The optimistic strategy must also agree on the exact
/// edge list.
pub(super) fn run_concurrency_safety_property(fixture: &MstFixture) -> TestCaseResult {
    let config = ConcurrencyConfig::load();
    let baseline = run(fixture, 1)?;

    for threads in [1, 2, 4] {
        for repetition in 0..config.repetitions {
            let forest = run(fixture, threads)?;
            let label = || format!("threads={threads}, repetition={repetition}");

            ensure(
                (forest.total_weight() - baseline.total_weight()).abs() <= WEIGHT_TOLERANCE,
                fixture,
                || {
                    format!(
                        "{}: weight diverged, baseline={}, run={}",
                        label(),
                        baseline.total_weight(),
                        forest.total_weight()
                    )
                },
            )?;
            ensure(forest.edges().len() == baseline.edges().len(), fixture, || {
                format!("{}: edge count diverged", label())
            })?;
            ensure(
                forest.component_count() == baseline.component_count(),
                fixture,
                || format!("{}: component count diverged", label()),
            )?;

            if fixture.strategy == StrategyKind::Optimistic {
                ensure(forest.edges() == baseline.edges(), fixture, || {
                    format!("{}: edge list differs from baseline", label())
                })?;
            }
        }
    }

    Ok(())
}

fn redispatch<S: ContractionStrategy>(
    strategy: &S,
    edges: &[MstEdge],
    fixture: &MstFixture,
) -> TestCaseResult {
    let fail = |e: crate::MstError| TestCaseError::fail(format!("dispatch failed: {e}"));

    let first = dispatch(edges, &CommitLedger::new(edges.len()), strategy, 8).map_err(fail)?;
    let components = strategy.forest().components();
    let second = dispatch(edges, &CommitLedger::new(edges.len()), strategy, 8).map_err(fail)?;

    ensure(
        first.stats.union_count() == (fixture.node_count - components) as u64,
        fixture,
        || format!("first dispatch performed {} unions", first.stats.union_count()),
    )?;
    ensure(second.stats.union_count() == 0, fixture, || {
        format!("second dispatch performed {} unions", second.stats.union_count())
    })?;
    ensure(strategy.forest().components() == components, fixture, || {
        "second dispatch changed the component count".to_owned()
    })
}

/// Dispatching the same edges again over the contracted forest commits
/// nothing.
pub(super) fn run_idempotence_property(fixture: &MstFixture) -> TestCaseResult {
    let edges = prepare_edge_list(fixture.edges.as_slice(), fixture.node_count)
        .map_err(|e| TestCaseError::fail(format!("invalid fixture: {e}")))?;

    match fixture.strategy {
        StrategyKind::Pessimistic => {
            redispatch(&LockingStrategy::new(fixture.node_count), &edges, fixture)
        }
        StrategyKind::Optimistic => {
            redispatch(&ClaimStrategy::new(fixture.node_count), &edges, fixture)
        }
    }
}
