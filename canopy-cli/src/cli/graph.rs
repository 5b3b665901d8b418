//! Seeded synthetic graph generation for the `run` command.

use canopy_core::{EdgeList, WeightedEdge};
use rand::{Rng, SeedableRng, rngs::SmallRng, seq::SliceRandom};

use super::commands::WeightProfile;

/// Generates `edge_count` random edges over `nodes` nodes.
///
/// Endpoints are drawn uniformly without self-loops; the same `seed` always
/// yields the same list. [`WeightProfile::Unique`] assigns a shuffled
/// permutation of `1..=edge_count`, while [`WeightProfile::Identical`] gives
/// every edge weight `1.0`. Graphs with fewer than two nodes have no edges.
///
/// # Examples
/// ```
/// use canopy_cli::cli::{WeightProfile, synthetic_graph};
///
/// let first = synthetic_graph(8, 16, WeightProfile::Unique, 7);
/// let second = synthetic_graph(8, 16, WeightProfile::Unique, 7);
/// assert_eq!(first, second);
/// assert_eq!(first.len(), 16);
/// ```
#[must_use]
pub fn synthetic_graph(
    nodes: usize,
    edge_count: usize,
    profile: WeightProfile,
    seed: u64,
) -> EdgeList {
    if nodes < 2 {
        return EdgeList::default();
    }

    let mut rng = SmallRng::seed_from_u64(seed);
    let mut weights: Vec<f32> = match profile {
        WeightProfile::Unique => (1..=edge_count).map(|rank| rank as f32).collect(),
        WeightProfile::Identical => vec![1.0; edge_count],
    };
    weights.shuffle(&mut rng);

    weights
        .into_iter()
        .zip(0_u64..)
        .map(|(weight, sequence)| {
            let source = rng.gen_range(0..nodes);
            let offset = rng.gen_range(1..nodes);
            let target = (source + offset) % nodes;
            WeightedEdge::new(source, target, weight, sequence)
        })
        .collect()
}
