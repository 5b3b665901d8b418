//! Seeded synthetic graphs for benchmarking.

use canopy_core::{EdgeList, WeightedEdge};
use rand::{Rng, SeedableRng, rngs::SmallRng};

/// How edge weights are drawn.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum WeightSpread {
    /// Uniform in `[0, 1)`; weight classes almost always hold one edge.
    Uniform,
    /// Integers in `1..=classes`, producing large equal-weight classes.
    Clustered {
        /// Number of distinct weights.
        classes: u16,
    },
}

/// Configuration for [`SyntheticGraph::generate`].
#[derive(Clone, Debug)]
pub struct SyntheticGraphConfig {
    /// Number of nodes.
    pub node_count: usize,
    /// Edges generated per node.
    pub edge_factor: usize,
    /// Weight distribution.
    pub weights: WeightSpread,
    /// RNG seed.
    pub seed: u64,
}

/// Errors raised while generating a synthetic graph.
#[derive(Debug, thiserror::Error, Eq, PartialEq)]
pub enum GraphError {
    /// Fewer than two nodes were requested, so no edge can be formed.
    #[error("graph needs at least two nodes, got {got}")]
    TooFewNodes {
        /// Requested node count.
        got: usize,
    },
    /// `node_count * edge_factor` does not fit in `usize`.
    #[error("edge count overflows for {node_count} nodes with edge factor {edge_factor}")]
    EdgeCountOverflow {
        /// Requested node count.
        node_count: usize,
        /// Requested edges per node.
        edge_factor: usize,
    },
    /// A clustered spread with zero classes.
    #[error("clustered weights need at least one class")]
    NoWeightClasses,
}

/// A generated graph ready to hand to the MST entry points.
#[derive(Clone, Debug)]
pub struct SyntheticGraph {
    node_count: usize,
    edges: EdgeList,
}

impl SyntheticGraph {
    /// Generates a random loop-free multigraph.
    ///
    /// # Errors
    /// Returns [`GraphError`] when the configuration cannot produce a graph.
    ///
    /// # Examples
    /// ```
    /// use canopy_benches::graph::{SyntheticGraph, SyntheticGraphConfig, WeightSpread};
    ///
    /// let graph = SyntheticGraph::generate(&SyntheticGraphConfig {
    ///     node_count: 10,
    ///     edge_factor: 3,
    ///     weights: WeightSpread::Uniform,
    ///     seed: 1,
    /// })?;
    /// assert_eq!(graph.edges().len(), 30);
    /// # Ok::<(), canopy_benches::graph::GraphError>(())
    /// ```
    pub fn generate(config: &SyntheticGraphConfig) -> Result<Self, GraphError> {
        let SyntheticGraphConfig {
            node_count,
            edge_factor,
            weights,
            seed,
        } = *config;

        if node_count < 2 {
            return Err(GraphError::TooFewNodes { got: node_count });
        }
        if weights == (WeightSpread::Clustered { classes: 0 }) {
            return Err(GraphError::NoWeightClasses);
        }
        let edge_count = node_count
            .checked_mul(edge_factor)
            .ok_or(GraphError::EdgeCountOverflow {
                node_count,
                edge_factor,
            })?;

        let mut rng = SmallRng::seed_from_u64(seed);
        let edges = (0..edge_count)
            .zip(0_u64..)
            .map(|(_, sequence)| {
                let source = rng.gen_range(0..node_count);
                let mut target = rng.gen_range(0..node_count - 1);
                if target >= source {
                    target += 1;
                }
                let weight = match weights {
                    WeightSpread::Uniform => rng.gen_range(0.0_f32..1.0),
                    WeightSpread::Clustered { classes } => f32::from(rng.gen_range(1..=classes)),
                };
                WeightedEdge::new(source, target, weight, sequence)
            })
            .collect();

        Ok(Self { node_count, edges })
    }

    /// Returns the node count.
    #[must_use]
    pub const fn node_count(&self) -> usize {
        self.node_count
    }

    /// Returns the generated edges.
    #[must_use]
    pub const fn edges(&self) -> &EdgeList {
        &self.edges
    }
}
