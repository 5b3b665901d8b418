//! Counters and per-worker tallies aggregated across a run.
//!
//! Workers never share a counter: each rayon fold owns a [`RoundTally`] and
//! tallies are merged pairwise once a round completes.

/// Diagnostic counters describing how a spanning forest was computed.
///
/// `union_count` doubles as a correctness check: on success it always
/// equals `node_count - component_count`.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct MstStats {
    match_iterations: u64,
    merge_iterations: u64,
    union_count: u64,
    conflicts: u64,
    redundant: u64,
    rounds: u64,
    batches: u64,
}

impl MstStats {
    /// Number of Match invocations, including retries.
    #[must_use]
    #[rustfmt::skip]
    pub fn match_iterations(&self) -> u64 { self.match_iterations }

    /// Number of Merge (or Link-Up) invocations that reached validation.
    #[must_use]
    #[rustfmt::skip]
    pub fn merge_iterations(&self) -> u64 { self.merge_iterations }

    /// Number of committed unions.
    #[must_use]
    #[rustfmt::skip]
    pub fn union_count(&self) -> u64 { self.union_count }

    /// Number of times an edge was deferred to a later round.
    #[must_use]
    #[rustfmt::skip]
    pub fn conflicts(&self) -> u64 { self.conflicts }

    /// Number of edges discarded because their endpoints were already joined.
    #[must_use]
    #[rustfmt::skip]
    pub fn redundant(&self) -> u64 { self.redundant }

    /// Number of rounds executed across all batches.
    #[must_use]
    #[rustfmt::skip]
    pub fn rounds(&self) -> u64 { self.rounds }

    /// Number of batches the dispatcher carved from the ordered edge list.
    #[must_use]
    #[rustfmt::skip]
    pub fn batches(&self) -> u64 { self.batches }

    pub(super) fn record_batch(&mut self) {
        self.batches += 1;
    }

    pub(super) fn record_round(&mut self) {
        self.rounds += 1;
    }

    pub(super) fn absorb(&mut self, other: &Self) {
        self.match_iterations += other.match_iterations;
        self.merge_iterations += other.merge_iterations;
        self.union_count += other.union_count;
        self.conflicts += other.conflicts;
        self.redundant += other.redundant;
        self.rounds += other.rounds;
        self.batches += other.batches;
    }

    #[cfg(feature = "metrics")]
    pub(super) fn emit_metrics(&self) {
        metrics::counter!("mst_match_iterations").increment(self.match_iterations);
        metrics::counter!("mst_merge_iterations").increment(self.merge_iterations);
        metrics::counter!("mst_unions").increment(self.union_count);
        metrics::counter!("mst_conflicts").increment(self.conflicts);
        metrics::histogram!("mst_rounds").record(self.rounds as f64);
    }

    #[cfg(not(feature = "metrics"))]
    pub(super) fn emit_metrics(&self) {}
}

/// Partial result of one worker's share of a round.
///
/// `deferred` holds the sorted positions of edges that signalled a
/// conflict and must be retried in the next round.
#[derive(Debug, Default)]
pub(super) struct RoundTally {
    pub(super) weight: f64,
    pub(super) deferred: Vec<usize>,
    pub(super) stats: MstStats,
}

impl RoundTally {
    pub(super) fn record_match(&mut self) {
        self.stats.match_iterations += 1;
    }

    pub(super) fn record_merge(&mut self) {
        self.stats.merge_iterations += 1;
    }

    pub(super) fn record_redundant(&mut self) {
        self.stats.redundant += 1;
    }

    pub(super) fn record_commit(&mut self, weight: f32) {
        self.stats.union_count += 1;
        self.weight += f64::from(weight);
    }

    pub(super) fn record_conflict(&mut self, position: usize) {
        self.stats.conflicts += 1;
        self.deferred.push(position);
    }

    pub(super) fn merge(mut self, other: Self) -> Self {
        self.weight += other.weight;
        self.deferred.extend(other.deferred);
        self.stats.absorb(&other.stats);
        self
    }
}
