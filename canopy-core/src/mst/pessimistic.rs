//! Lock-based contraction.
//!
//! Match resolves both endpoints and acquires the locks of the two
//! representatives in ascending id order, which keeps concurrent matches
//! deadlock-free. Merge re-resolves under those locks: if the
//! representatives moved while the locks were being taken the edge is
//! deferred, otherwise the roots are joined by rank. Locks are released when
//! the guards drop at the end of Merge, whatever the outcome.

use std::sync::{Mutex, MutexGuard};

use crate::{MstError, StrategyKind};

use super::{
    MstEdge,
    dispatch::{ContractionStrategy, MergeOutcome, RoundContext, run_fused},
    stats::RoundTally,
    union_find::{ConcurrentUnionFind, canonical_pair},
};

pub(super) struct LockingStrategy {
    forest: ConcurrentUnionFind,
    locks: Vec<Mutex<()>>,
}

/// Guards for the two roots an edge matched against, in lock order.
pub(super) struct LockedRoots<'a> {
    roots: (usize, usize),
    _first: MutexGuard<'a, ()>,
    _second: MutexGuard<'a, ()>,
}

impl LockingStrategy {
    pub(super) fn new(node_count: usize) -> Self {
        Self {
            forest: ConcurrentUnionFind::new(node_count),
            locks: (0..node_count).map(|_| Mutex::new(())).collect(),
        }
    }

    fn lock_root(&self, index: usize) -> Result<MutexGuard<'_, ()>, MstError> {
        let lock = self.locks.get(index).ok_or(MstError::InvariantViolation {
            invariant: "root lock index must be within the lock table",
            index,
            bound: self.locks.len(),
        })?;

        lock.lock().map_err(|_| MstError::LockPoisoned {
            resource: "union-find root lock",
        })
    }

    /// Returns `None` when the endpoints already share a representative.
    pub(super) fn match_edge(&self, edge: &MstEdge) -> Result<Option<LockedRoots<'_>>, MstError> {
        let source_root = self.forest.find(edge.source())?;
        let target_root = self.forest.find(edge.target())?;
        if source_root == target_root {
            return Ok(None);
        }

        let (first, second) = canonical_pair(source_root, target_root);
        let first_guard = self.lock_root(first)?;
        let second_guard = self.lock_root(second)?;

        Ok(Some(LockedRoots {
            roots: (first, second),
            _first: first_guard,
            _second: second_guard,
        }))
    }

    pub(super) fn merge_edge(
        &self,
        edge: &MstEdge,
        locked: LockedRoots<'_>,
    ) -> Result<MergeOutcome, MstError> {
        let source_root = self.forest.find(edge.source())?;
        let target_root = self.forest.find(edge.target())?;

        if source_root == target_root {
            return Ok(MergeOutcome::Redundant);
        }

        // Another worker re-parented one of the locked roots between the
        // lock-free find in Match and lock acquisition.
        if canonical_pair(source_root, target_root) != locked.roots
            || !self.forest.is_root(source_root)
            || !self.forest.is_root(target_root)
        {
            return Ok(MergeOutcome::Conflict);
        }

        self.forest.union_by_rank(source_root, target_root)?;
        Ok(MergeOutcome::Committed)
    }
}

impl ContractionStrategy for LockingStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Pessimistic
    }

    fn forest(&self) -> &ConcurrentUnionFind {
        &self.forest
    }

    fn coalesces_weight_classes(&self) -> bool {
        false
    }

    fn run_round(&self, ctx: &RoundContext<'_>, queue: &[usize]) -> Result<RoundTally, MstError> {
        run_fused(
            ctx,
            queue,
            |edge| self.match_edge(edge),
            |edge, locked| self.merge_edge(edge, locked),
        )
    }
}
