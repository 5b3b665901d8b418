//! Sequential Kruskal reference used by the property suite.
//!
//! Sorts with the same key as [`crate::MstEdge`] and keeps parallel edges,
//! so its accepted set is the unique forest the parallel run must match on
//! weight.

use crate::{EdgeList, WeightedEdge};

/// Result of the sequential reference run.
#[derive(Clone, Debug)]
pub(super) struct SequentialMstResult {
    pub total_weight: f64,
    pub edge_count: usize,
    pub component_count: usize,
}

/// Runs Kruskal sequentially. Invalid edges (self-loops, out-of-range ids,
/// non-finite weights) are skipped rather than rejected.
pub(super) fn sequential_kruskal(node_count: usize, edges: &EdgeList) -> SequentialMstResult {
    let mut sorted: Vec<WeightedEdge> = edges
        .iter()
        .filter(|edge| {
            edge.source() != edge.target()
                && edge.source() < node_count
                && edge.target() < node_count
                && edge.weight().is_finite()
        })
        .map(|edge| edge.canonicalise())
        .collect();
    sorted.sort_unstable_by(|a, b| {
        a.weight()
            .total_cmp(&b.weight())
            .then_with(|| a.source().cmp(&b.source()))
            .then_with(|| a.target().cmp(&b.target()))
            .then_with(|| a.sequence().cmp(&b.sequence()))
    });

    let mut parent: Vec<usize> = (0..node_count).collect();
    let mut result = SequentialMstResult {
        total_weight: 0.0,
        edge_count: 0,
        component_count: node_count,
    };

    for edge in &sorted {
        let left = find_root(&mut parent, edge.source());
        let right = find_root(&mut parent, edge.target());
        if left != right {
            parent[right] = left;
            result.total_weight += f64::from(edge.weight());
            result.edge_count += 1;
            result.component_count -= 1;
        }
    }

    result
}

/// Path-halving find over a plain parent table.
pub(super) fn find_root(parent: &mut [usize], mut node: usize) -> usize {
    while parent[node] != node {
        parent[node] = parent[parent[node]];
        node = parent[node];
    }
    node
}
