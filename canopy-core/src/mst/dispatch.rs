//! Ordered, conflict-aware dispatch of sorted edges to a contraction
//! strategy.
//!
//! The dispatcher walks the sorted edge list in batches. A batch never
//! starts before every lighter edge is resolved, so weights are processed in
//! non-decreasing order while edges inside a batch run concurrently. Each
//! batch is retried in rounds: edges whose merge signals a conflict form the
//! queue of the next round, and the batch is done once a round defers
//! nothing.

use std::ops::Range;
use std::sync::atomic::{AtomicBool, Ordering};

use rayon::prelude::*;
use tracing::{debug, instrument};

use crate::{MstError, StrategyKind};

use super::{
    MstEdge,
    stats::{MstStats, RoundTally},
    union_find::ConcurrentUnionFind,
};

/// Verdict returned by a strategy once a matched edge has been validated.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) enum MergeOutcome {
    /// The edge joined two components and belongs to the forest.
    Committed,
    /// The endpoints already share a component; the edge is dropped for good.
    Redundant,
    /// A concurrent merge invalidated the match; retry in the next round.
    Conflict,
}

/// A contraction discipline driven by the dispatcher.
///
/// Exactly two implementations exist: the locking strategy and the claiming
/// strategy. The choice is made once per run.
pub(super) trait ContractionStrategy: Sync {
    fn kind(&self) -> StrategyKind;

    fn forest(&self) -> &ConcurrentUnionFind;

    /// Whether consecutive weight classes may share a batch.
    fn coalesces_weight_classes(&self) -> bool;

    /// Runs Match and Merge for every queued edge exactly once.
    fn run_round(&self, ctx: &RoundContext<'_>, queue: &[usize]) -> Result<RoundTally, MstError>;
}

/// Committed flags for the sorted edge list. A flag is set at most once.
pub(super) struct CommitLedger {
    flags: Vec<AtomicBool>,
}

impl CommitLedger {
    pub(super) fn new(len: usize) -> Self {
        Self {
            flags: (0..len).map(|_| AtomicBool::new(false)).collect(),
        }
    }

    fn commit(&self, position: usize) -> Result<(), MstError> {
        if self.flags[position].swap(true, Ordering::AcqRel) {
            return Err(MstError::InvariantViolation {
                invariant: "an edge may be committed at most once",
                index: position,
                bound: self.flags.len(),
            });
        }
        Ok(())
    }

    pub(super) fn committed_positions(&self) -> impl Iterator<Item = usize> + '_ {
        self.flags
            .iter()
            .enumerate()
            .filter_map(|(position, flag)| flag.load(Ordering::Acquire).then_some(position))
    }
}

/// Read-only inputs shared by every worker in a round.
pub(super) struct RoundContext<'a> {
    edges: &'a [MstEdge],
    ledger: &'a CommitLedger,
}

impl RoundContext<'_> {
    fn edge(&self, position: usize) -> &MstEdge {
        &self.edges[position]
    }

    fn settle(
        &self,
        tally: &mut RoundTally,
        position: usize,
        outcome: MergeOutcome,
    ) -> Result<(), MstError> {
        match outcome {
            MergeOutcome::Committed => {
                self.ledger.commit(position)?;
                tally.record_commit(self.edge(position).weight());
            }
            MergeOutcome::Redundant => tally.record_redundant(),
            MergeOutcome::Conflict => tally.record_conflict(position),
        }
        Ok(())
    }
}

/// Runs Match immediately followed by Merge for each edge on the same
/// worker. Whatever Match hands over (for example lock guards) is dropped
/// when Merge returns, on every path.
pub(super) fn run_fused<T, M, G>(
    ctx: &RoundContext<'_>,
    queue: &[usize],
    match_op: M,
    merge_op: G,
) -> Result<RoundTally, MstError>
where
    M: Fn(&MstEdge) -> Result<Option<T>, MstError> + Sync,
    G: Fn(&MstEdge, T) -> Result<MergeOutcome, MstError> + Sync,
{
    queue
        .par_iter()
        .try_fold(RoundTally::default, |mut tally, &position| {
            let edge = ctx.edge(position);
            tally.record_match();
            let Some(matched) = match_op(edge)? else {
                tally.record_redundant();
                return Ok(tally);
            };
            tally.record_merge();
            let outcome = merge_op(edge, matched)?;
            ctx.settle(&mut tally, position, outcome)?;
            Ok(tally)
        })
        .try_reduce(RoundTally::default, |left, right| Ok(left.merge(right)))
}

/// Runs Match for every queued edge, then Link-Up for every edge that
/// survived Match. No Link-Up starts before the last Match has returned.
///
/// `match_op` returns `false` when the edge is already redundant.
pub(super) fn run_phased<M, G>(
    ctx: &RoundContext<'_>,
    queue: &[usize],
    match_op: M,
    link_op: G,
) -> Result<RoundTally, MstError>
where
    M: Fn(usize, &MstEdge) -> Result<bool, MstError> + Sync,
    G: Fn(usize, &MstEdge) -> Result<MergeOutcome, MstError> + Sync,
{
    let (live, matched) = queue
        .par_iter()
        .try_fold(
            || (Vec::new(), RoundTally::default()),
            |(mut live, mut tally): (Vec<usize>, RoundTally), &position| {
                tally.record_match();
                if match_op(position, ctx.edge(position))? {
                    live.push(position);
                } else {
                    tally.record_redundant();
                }
                Ok((live, tally))
            },
        )
        .try_reduce(
            || (Vec::new(), RoundTally::default()),
            |(mut left_live, left), (right_live, right)| {
                left_live.extend(right_live);
                Ok((left_live, left.merge(right)))
            },
        )?;

    // The match phase has fully joined at this point: it is the barrier.
    let linked = live
        .par_iter()
        .try_fold(RoundTally::default, |mut tally, &position| {
            tally.record_merge();
            let outcome = link_op(position, ctx.edge(position))?;
            ctx.settle(&mut tally, position, outcome)?;
            Ok(tally)
        })
        .try_reduce(RoundTally::default, |left, right| Ok(left.merge(right)))?;

    Ok(matched.merge(linked))
}

/// Aggregated outcome of a full dispatch.
#[derive(Clone, Copy, Debug, Default)]
pub(super) struct DispatchReport {
    pub(super) weight: f64,
    pub(super) stats: MstStats,
}

/// Feeds `edges` (sorted by [`MstEdge`]'s total order) to `strategy` until
/// every edge is committed or dropped, or a single component remains.
#[instrument(
    name = "mst.dispatch",
    err,
    skip_all,
    fields(edges = edges.len(), strategy = strategy.kind().as_str(), window = window),
)]
pub(super) fn dispatch<S: ContractionStrategy>(
    edges: &[MstEdge],
    ledger: &CommitLedger,
    strategy: &S,
    window: usize,
) -> Result<DispatchReport, MstError> {
    let ctx = RoundContext { edges, ledger };
    let coalesce = strategy.coalesces_weight_classes();
    let mut report = DispatchReport::default();

    let mut start = 0;
    while start < edges.len() && strategy.forest().components() > 1 {
        let end = batch_end(edges, start, window, coalesce);
        let batch = run_batch(&ctx, strategy, start..end)?;
        debug!(
            batch_start = start,
            batch_len = end - start,
            rounds = batch.stats.rounds(),
            unions = batch.stats.union_count(),
            conflicts = batch.stats.conflicts(),
            "batch resolved"
        );
        report.weight += batch.weight;
        report.stats.absorb(&batch.stats);
        start = end;
    }

    Ok(report)
}

fn run_batch<S: ContractionStrategy>(
    ctx: &RoundContext<'_>,
    strategy: &S,
    range: Range<usize>,
) -> Result<DispatchReport, MstError> {
    let mut report = DispatchReport::default();
    report.stats.record_batch();

    let mut queue: Vec<usize> = range.collect();
    while !queue.is_empty() {
        let RoundTally {
            weight,
            mut deferred,
            stats,
        } = strategy.run_round(ctx, &queue)?;
        report.stats.record_round();
        report.weight += weight;
        report.stats.absorb(&stats);

        if deferred.len() == queue.len() {
            return Err(MstError::InvariantViolation {
                invariant: "every round must resolve at least one edge",
                index: queue.first().copied().unwrap_or_default(),
                bound: queue.len(),
            });
        }

        deferred.sort_unstable();
        queue = deferred;
    }

    Ok(report)
}

fn weight_class_end(edges: &[MstEdge], start: usize) -> usize {
    let weight = edges[start].weight();
    let mut next = start.saturating_add(1);
    while next < edges.len() && edges[next].weight() == weight {
        next = next.saturating_add(1);
    }
    next
}

/// Returns the exclusive end of the batch starting at `start`.
///
/// A batch always covers whole weight classes. When `coalesce` is set,
/// further classes are appended while the batch is shorter than `window`.
fn batch_end(edges: &[MstEdge], start: usize, window: usize, coalesce: bool) -> usize {
    let mut end = weight_class_end(edges, start);
    if coalesce {
        while end < edges.len() && end - start < window {
            end = weight_class_end(edges, end);
        }
    }
    end
}
