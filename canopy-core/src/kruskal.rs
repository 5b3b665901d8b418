//! Public entry points for computing minimum spanning forests.

use tracing::{info, instrument, warn};

use crate::{
    EdgeList, KruskalConfig, MinimumSpanningForest, Result, error::MstError, mst::compute_forest,
};

/// Computes a minimum spanning forest with the default configuration.
///
/// Edges are undirected and canonicalised to `(min(u, v), max(u, v))`.
/// Self-loops are ignored, parallel edges are allowed and the graph does not
/// need to be connected.
///
/// # Errors
/// Returns [`MstError::EmptyGraph`] when `node_count == 0`,
/// [`MstError::InvalidNodeId`] for an endpoint `>= node_count` and
/// [`MstError::NonFiniteWeight`] for a NaN or infinite weight.
///
/// # Examples
/// ```
/// use canopy_core::{EdgeList, parallel_kruskal};
///
/// // A-B=1, B-C=2, C-D=3, A-D=10, A-C=5
/// let edges = EdgeList::from_tuples(&[
///     (0, 1, 1.0),
///     (1, 2, 2.0),
///     (2, 3, 3.0),
///     (0, 3, 10.0),
///     (0, 2, 5.0),
/// ]);
/// let forest = parallel_kruskal(4, &edges)?;
/// assert!(forest.is_tree());
/// assert_eq!(forest.edges().len(), 3);
/// assert!((forest.total_weight() - 6.0).abs() < 1e-9);
/// # Ok::<(), canopy_core::MstError>(())
/// ```
pub fn parallel_kruskal(node_count: usize, edges: &EdgeList) -> Result<MinimumSpanningForest> {
    parallel_kruskal_with(node_count, edges, &KruskalConfig::default())
}

/// Computes a minimum spanning forest with an explicit configuration.
///
/// # Errors
/// Returns the same input errors as [`parallel_kruskal`], plus
/// [`MstError::LockPoisoned`] or [`MstError::InvariantViolation`] if the
/// concurrent run breaks down.
///
/// # Examples
/// ```
/// use canopy_core::{EdgeList, KruskalBuilder, StrategyKind, parallel_kruskal_with};
///
/// let edges = EdgeList::from_tuples(&[(0, 1, 1.0), (2, 3, 2.0)]);
/// let config = KruskalBuilder::new()
///     .with_strategy(StrategyKind::Pessimistic)
///     .build()?;
/// let forest = parallel_kruskal_with(4, &edges, &config)?;
/// assert_eq!(forest.component_count(), 2);
/// assert_eq!(forest.stats().union_count(), 2);
/// # Ok::<(), canopy_core::MstError>(())
/// ```
#[instrument(
    name = "mst.parallel_kruskal",
    err,
    skip_all,
    fields(
        node_count = node_count,
        edges = edges.len(),
        strategy = config.strategy().as_str(),
        threads = config.threads().map_or(0, |threads| threads.get()),
    ),
)]
pub fn parallel_kruskal_with(
    node_count: usize,
    edges: &EdgeList,
    config: &KruskalConfig,
) -> Result<MinimumSpanningForest> {
    if node_count == 0 {
        warn!("graph has no nodes, returning error");
        return Err(MstError::EmptyGraph);
    }

    let forest = config.install(|| {
        compute_forest(
            node_count,
            edges.as_slice(),
            config.strategy(),
            config.window().get(),
        )
    })?;

    let stats = forest.stats();
    info!(
        total_weight = forest.total_weight(),
        forest_edges = forest.edges().len(),
        components = forest.component_count(),
        unions = stats.union_count(),
        match_iterations = stats.match_iterations(),
        merge_iterations = stats.merge_iterations(),
        conflicts = stats.conflicts(),
        redundant = stats.redundant(),
        rounds = stats.rounds(),
        batches = stats.batches(),
        "spanning forest complete"
    );

    Ok(forest)
}
