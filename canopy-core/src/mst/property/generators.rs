//! Graph generators for the property suite.
//!
//! Generators are driven by a seeded [`SmallRng`] so proptest shrinks over
//! `(distribution, seed, strategy, threads)` rather than raw edge vectors.

use proptest::prelude::*;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::{EdgeList, StrategyKind, WeightedEdge};

use super::types::{MstFixture, WeightDistribution};

const MIN_NODES: usize = 8;
const MAX_NODES: usize = 64;
const DENSE_MAX_NODES: usize = 32;

/// Samples fixtures across every distribution, both strategies and small
/// thread counts. Tie-heavy inputs are weighted up.
pub(super) fn mst_fixture_strategy() -> impl Strategy<Value = MstFixture> {
    (
        distribution_strategy(),
        any::<u64>(),
        prop_oneof![Just(StrategyKind::Pessimistic), Just(StrategyKind::Optimistic)],
        1_usize..=4,
    )
        .prop_map(|(distribution, seed, strategy, threads)| {
            let mut rng = SmallRng::seed_from_u64(seed);
            generate_fixture(distribution, strategy, threads, &mut rng)
        })
}

fn distribution_strategy() -> impl Strategy<Value = WeightDistribution> {
    prop_oneof![
        2 => Just(WeightDistribution::Unique),
        3 => Just(WeightDistribution::ManyIdentical),
        2 => Just(WeightDistribution::Sparse),
        1 => Just(WeightDistribution::Dense),
        2 => Just(WeightDistribution::Disconnected),
        2 => Just(WeightDistribution::ParallelEdges),
    ]
}

/// Builds a fixture for an explicit distribution and run setting.
pub(super) fn generate_fixture(
    distribution: WeightDistribution,
    strategy: StrategyKind,
    threads: usize,
    rng: &mut SmallRng,
) -> MstFixture {
    let (node_count, edges) = match distribution {
        WeightDistribution::Unique => random_graph(rng, MAX_NODES, (0.2, 0.6), continuous),
        WeightDistribution::ManyIdentical => {
            let pool: Vec<f32> = (0..rng.gen_range(1..=3))
                .map(|_| f32::from(rng.gen_range(1_u8..=10)))
                .collect();
            random_graph(rng, MAX_NODES, (0.3, 0.7), move |r| {
                pool[r.gen_range(0..pool.len())]
            })
        }
        WeightDistribution::Sparse => sparse_graph(rng),
        WeightDistribution::Dense => random_graph(rng, DENSE_MAX_NODES, (0.7, 0.95), continuous),
        WeightDistribution::Disconnected => disconnected_graph(rng),
        WeightDistribution::ParallelEdges => multigraph(rng),
    };

    MstFixture {
        node_count,
        edges: edges.finish(),
        distribution,
        strategy,
        threads,
    }
}

fn continuous(rng: &mut SmallRng) -> f32 {
    rng.gen_range(0.1_f32..100.0)
}

/// Accumulates edges with monotonic sequence numbers.
#[derive(Default)]
struct EdgeSink {
    edges: Vec<WeightedEdge>,
}

impl EdgeSink {
    fn push(&mut self, source: usize, target: usize, weight: f32) {
        let sequence = self.edges.len() as u64;
        self.edges
            .push(WeightedEdge::new(source, target, weight, sequence));
    }

    fn finish(self) -> EdgeList {
        EdgeList::new(self.edges)
    }
}

fn random_graph(
    rng: &mut SmallRng,
    max_nodes: usize,
    probability: (f64, f64),
    mut weight: impl FnMut(&mut SmallRng) -> f32,
) -> (usize, EdgeSink) {
    let node_count = rng.gen_range(MIN_NODES..=max_nodes);
    let probability = rng.gen_range(probability.0..=probability.1);
    let mut sink = EdgeSink::default();

    for source in 0..node_count {
        for target in (source + 1)..node_count {
            if rng.gen_bool(probability) {
                let w = weight(rng);
                // Alternate orientation so canonicalisation is exercised.
                if rng.gen_bool(0.5) {
                    sink.push(source, target, w);
                } else {
                    sink.push(target, source, w);
                }
            }
        }
    }

    if sink.edges.is_empty() {
        let w = weight(rng);
        sink.push(0, 1, w);
    }

    (node_count, sink)
}

fn sparse_graph(rng: &mut SmallRng) -> (usize, EdgeSink) {
    let node_count = rng.gen_range(MIN_NODES..=MAX_NODES);
    let mut order: Vec<usize> = (0..node_count).collect();
    for i in (1..order.len()).rev() {
        order.swap(i, rng.gen_range(0..=i));
    }

    let mut sink = EdgeSink::default();
    for pair in order.windows(2) {
        let w = continuous(rng);
        sink.push(pair[0], pair[1], w);
    }

    for _ in 0..rng.gen_range(node_count / 2..=node_count) {
        let source = rng.gen_range(0..node_count);
        let target = rng.gen_range(0..node_count);
        // Self-loops are kept: they must be ignored downstream.
        let w = continuous(rng);
        sink.push(source, target, w);
    }

    (node_count, sink)
}

fn disconnected_graph(rng: &mut SmallRng) -> (usize, EdgeSink) {
    let sizes: Vec<usize> = (0..rng.gen_range(2..=5))
        .map(|_| rng.gen_range(3..=12))
        .collect();
    let mut sink = EdgeSink::default();
    let mut offset = 0;

    for &size in &sizes {
        let probability = rng.gen_range(0.3..=0.8);
        let before = sink.edges.len();
        for i in 0..size {
            for j in (i + 1)..size {
                if rng.gen_bool(probability) {
                    let w = continuous(rng);
                    sink.push(offset + i, offset + j, w);
                }
            }
        }
        if sink.edges.len() == before {
            let w = continuous(rng);
            sink.push(offset, offset + 1, w);
        }
        offset += size;
    }

    (offset, sink)
}

fn multigraph(rng: &mut SmallRng) -> (usize, EdgeSink) {
    let node_count = rng.gen_range(MIN_NODES..=MAX_NODES / 2);
    let mut sink = EdgeSink::default();

    for _ in 0..node_count * 2 {
        let source = rng.gen_range(0..node_count);
        let target = rng.gen_range(0..node_count);
        for _ in 0..rng.gen_range(2..=4) {
            let w = f32::from(rng.gen_range(1_u8..=4));
            sink.push(source, target, w);
        }
    }

    (node_count, sink)
}
