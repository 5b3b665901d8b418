//! Parallel minimum spanning forest construction.
//!
//! Edges are validated and sorted in parallel, then handed in weight order to
//! an ordered dispatcher that runs one of two contraction strategies over a
//! shared concurrent union-find:
//!
//! - [`StrategyKind::Pessimistic`] locks both representatives of an edge and
//!   re-validates them before merging.
//! - [`StrategyKind::Optimistic`] claims representatives lock-free and
//!   validates the claims after a barrier.
//!
//! Both produce a forest of minimum total weight. The optimistic strategy is
//! also deterministic in which edges it selects among equal weights.

mod dispatch;
mod optimistic;
mod pessimistic;
mod stats;
mod union_find;

use std::cmp::Ordering;

use rayon::prelude::*;

use crate::{MstError, StrategyKind, WeightedEdge};

use self::{
    dispatch::{CommitLedger, ContractionStrategy, dispatch},
    optimistic::ClaimStrategy,
    pessimistic::LockingStrategy,
};

pub use self::stats::MstStats;

/// A single forest edge in canonical undirected form (`source <= target`).
///
/// Edges are totally ordered by `(weight, source, target, sequence)`, with
/// weights compared via [`f32::total_cmp`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MstEdge {
    source: usize,
    target: usize,
    weight: f32,
    sequence: u64,
}

impl MstEdge {
    pub(crate) fn new(source: usize, target: usize, weight: f32, sequence: u64) -> Self {
        Self {
            source,
            target,
            weight,
            sequence,
        }
    }

    /// Returns the smaller endpoint id.
    #[must_use]
    #[rustfmt::skip]
    pub fn source(&self) -> usize { self.source }

    /// Returns the larger endpoint id.
    #[must_use]
    #[rustfmt::skip]
    pub fn target(&self) -> usize { self.target }

    /// Returns the edge weight.
    #[must_use]
    #[rustfmt::skip]
    pub fn weight(&self) -> f32 { self.weight }

    /// Returns the deterministic tie-break sequence associated with the edge.
    #[must_use]
    #[rustfmt::skip]
    pub fn sequence(&self) -> u64 { self.sequence }
}

impl Eq for MstEdge {}

impl Ord for MstEdge {
    fn cmp(&self, other: &Self) -> Ordering {
        self.weight
            .total_cmp(&other.weight)
            .then_with(|| self.source.cmp(&other.source))
            .then_with(|| self.target.cmp(&other.target))
            .then_with(|| self.sequence.cmp(&other.sequence))
    }
}

impl PartialOrd for MstEdge {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// The output of a minimum spanning forest computation.
///
/// When the input graph is connected, the forest is a minimum spanning tree.
#[derive(Clone, Debug, PartialEq)]
pub struct MinimumSpanningForest {
    edges: Vec<MstEdge>,
    component_count: usize,
    total_weight: f64,
    stats: MstStats,
}

impl MinimumSpanningForest {
    /// Returns the forest edges sorted by their total order.
    #[must_use]
    #[rustfmt::skip]
    pub fn edges(&self) -> &[MstEdge] { &self.edges }

    /// Returns the number of connected components in the resulting forest.
    #[must_use]
    #[rustfmt::skip]
    pub fn component_count(&self) -> usize { self.component_count }

    /// Returns `true` when the forest spans a single connected component.
    #[must_use]
    pub fn is_tree(&self) -> bool {
        self.component_count == 1
    }

    /// Returns the sum of committed edge weights.
    #[must_use]
    #[rustfmt::skip]
    pub fn total_weight(&self) -> f64 { self.total_weight }

    /// Returns the counters gathered while the forest was built.
    #[must_use]
    #[rustfmt::skip]
    pub fn stats(&self) -> &MstStats { &self.stats }
}

fn validate_and_canonicalize_edge(
    edge: &WeightedEdge,
    node_count: usize,
) -> Result<Option<MstEdge>, MstError> {
    let source = edge.source();
    let target = edge.target();

    if source >= node_count {
        return Err(MstError::InvalidNodeId {
            node: source,
            node_count,
        });
    }
    if target >= node_count {
        return Err(MstError::InvalidNodeId {
            node: target,
            node_count,
        });
    }

    let weight = edge.weight();
    if !weight.is_finite() {
        return Err(MstError::NonFiniteWeight {
            left: source,
            right: target,
        });
    }

    if source == target {
        return Ok(None);
    }

    let canonical = edge.canonicalise();
    Ok(Some(MstEdge::new(
        canonical.source(),
        canonical.target(),
        weight,
        edge.sequence(),
    )))
}

/// Validates, canonicalises and sorts the input. Self-loops are dropped;
/// parallel edges are kept and resolved by the dispatcher.
fn prepare_edge_list(edges: &[WeightedEdge], node_count: usize) -> Result<Vec<MstEdge>, MstError> {
    let mut edge_list = edges
        .par_iter()
        .try_fold(Vec::new, |mut acc, edge| {
            if let Some(mst_edge) = validate_and_canonicalize_edge(edge, node_count)? {
                acc.push(mst_edge);
            }
            Ok(acc)
        })
        .try_reduce(Vec::new, |mut left, right| {
            left.extend(right);
            Ok(left)
        })?;

    edge_list.par_sort_unstable();
    Ok(edge_list)
}

fn contract<S: ContractionStrategy>(
    strategy: &S,
    edges: &[MstEdge],
    window: usize,
) -> Result<MinimumSpanningForest, MstError> {
    let ledger = CommitLedger::new(edges.len());
    let report = dispatch(edges, &ledger, strategy, window)?;

    let forest = strategy.forest();
    let component_count = forest.components();
    let expected_unions = forest.node_count().saturating_sub(component_count);
    let unions = usize::try_from(report.stats.union_count()).unwrap_or(usize::MAX);
    if unions != expected_unions {
        return Err(MstError::InvariantViolation {
            invariant: "union count must equal node count minus component count",
            index: unions,
            bound: expected_unions,
        });
    }

    let committed: Vec<MstEdge> = ledger
        .committed_positions()
        .map(|position| edges[position])
        .collect();
    if committed.len() != unions {
        return Err(MstError::InvariantViolation {
            invariant: "committed edges must match the union count",
            index: committed.len(),
            bound: unions,
        });
    }

    report.stats.emit_metrics();

    Ok(MinimumSpanningForest {
        edges: committed,
        component_count,
        total_weight: report.weight,
        stats: report.stats,
    })
}

/// Computes a minimum spanning forest over `node_count` nodes.
///
/// Must be called on the pool the run should occupy; the caller installs a
/// dedicated pool when one is configured.
pub(crate) fn compute_forest(
    node_count: usize,
    edges: &[WeightedEdge],
    strategy: StrategyKind,
    window: usize,
) -> Result<MinimumSpanningForest, MstError> {
    if node_count == 0 {
        return Err(MstError::EmptyGraph);
    }

    let edge_list = prepare_edge_list(edges, node_count)?;

    match strategy {
        StrategyKind::Pessimistic => {
            contract(&LockingStrategy::new(node_count), &edge_list, window)
        }
        StrategyKind::Optimistic => contract(&ClaimStrategy::new(node_count), &edge_list, window),
    }
}

#[cfg(test)]
mod property;
