//! Claim-and-validate contraction.
//!
//! Each node owns a claim slot. During Match every edge whose endpoints sit
//! in different components writes its sorted position into the slots of both
//! representatives with an atomic minimum, so each slot ends up naming the
//! lightest edge touching that component. After every Match has returned,
//! Link-Up re-resolves the endpoints and checks whether the edge still owns
//! one of its slots. The owner of a slot is the only writer allowed to
//! re-parent that root; an edge that owns neither slot is deferred.
//!
//! Winners of a round are always cut-minimal edges, so concurrent link-ups
//! never close a cycle and the committed set matches sequential Kruskal.

use std::sync::atomic::{AtomicUsize, Ordering};

use crate::{MstError, StrategyKind};

use super::{
    MstEdge,
    dispatch::{ContractionStrategy, MergeOutcome, RoundContext, run_phased},
    stats::RoundTally,
    union_find::ConcurrentUnionFind,
};

const UNCLAIMED: usize = usize::MAX;

pub(super) struct ClaimStrategy {
    forest: ConcurrentUnionFind,
    slots: Vec<AtomicUsize>,
}

impl ClaimStrategy {
    pub(super) fn new(node_count: usize) -> Self {
        Self {
            forest: ConcurrentUnionFind::new(node_count),
            slots: (0..node_count).map(|_| AtomicUsize::new(UNCLAIMED)).collect(),
        }
    }

    fn claim(&self, root: usize, position: usize) {
        self.slots[root].fetch_min(position, Ordering::AcqRel);
    }

    fn holds(&self, root: usize, position: usize) -> bool {
        self.slots[root].load(Ordering::Acquire) == position
    }

    /// Empties `root`'s slot if `position` still owns it.
    fn release(&self, root: usize, position: usize) {
        // A failed exchange means another edge owns the slot; leave it.
        let _ = self.slots[root].compare_exchange(
            position,
            UNCLAIMED,
            Ordering::AcqRel,
            Ordering::Acquire,
        );
    }

    /// Returns `false` when the endpoints already share a representative.
    pub(super) fn match_edge(&self, position: usize, edge: &MstEdge) -> Result<bool, MstError> {
        let source_root = self.forest.find(edge.source())?;
        let target_root = self.forest.find(edge.target())?;
        if source_root == target_root {
            return Ok(false);
        }

        self.claim(source_root, position);
        self.claim(target_root, position);
        Ok(true)
    }

    pub(super) fn link_up_edge(
        &self,
        position: usize,
        edge: &MstEdge,
    ) -> Result<MergeOutcome, MstError> {
        let source_root = self.forest.find(edge.source())?;
        let target_root = self.forest.find(edge.target())?;

        if source_root == target_root {
            // Joined by another winner this round; a slot this edge owns can
            // only be the shared root's.
            self.release(source_root, position);
            return Ok(MergeOutcome::Redundant);
        }

        let owns_source = self.holds(source_root, position);
        let owns_target = self.holds(target_root, position);

        if owns_source {
            self.forest.link_up(source_root, target_root)?;
        } else if owns_target {
            self.forest.link_up(target_root, source_root)?;
        } else {
            return Ok(MergeOutcome::Conflict);
        }

        if owns_source {
            self.release(source_root, position);
        }
        if owns_target {
            self.release(target_root, position);
        }
        Ok(MergeOutcome::Committed)
    }

    #[cfg(test)]
    pub(super) fn all_slots_released(&self) -> bool {
        self.slots
            .iter()
            .all(|slot| slot.load(Ordering::Acquire) == UNCLAIMED)
    }
}

impl ContractionStrategy for ClaimStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Optimistic
    }

    fn forest(&self) -> &ConcurrentUnionFind {
        &self.forest
    }

    fn coalesces_weight_classes(&self) -> bool {
        true
    }

    fn run_round(&self, ctx: &RoundContext<'_>, queue: &[usize]) -> Result<RoundTally, MstError> {
        run_phased(
            ctx,
            queue,
            |position, edge| self.match_edge(position, edge),
            |position, edge| self.link_up_edge(position, edge),
        )
    }
}
