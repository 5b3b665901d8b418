//! Concurrent union-find shared by both contraction strategies.
//!
//! Nodes live in a contiguous table and each representative reference is an
//! index stored in an atomic. `find` may run concurrently with everything
//! else: path compression only ever rewrites a non-root to point at one of
//! its ancestors, and non-roots never become roots again.
//!
//! Re-parenting a root is the caller's responsibility to serialise. The
//! locking strategy holds both root locks around [`union_by_rank`]; the
//! claiming strategy only lets the winner of a root's claim slot call
//! [`link_up`] on it. Both operations use a compare-exchange on the child so
//! a second writer is reported as an invariant violation instead of
//! silently corrupting the forest.
//!
//! [`union_by_rank`]: ConcurrentUnionFind::union_by_rank
//! [`link_up`]: ConcurrentUnionFind::link_up

use std::sync::atomic::{AtomicUsize, Ordering};

use crate::MstError;

pub(super) struct ConcurrentUnionFind {
    parents: Vec<AtomicUsize>,
    ranks: Vec<AtomicUsize>,
    components: AtomicUsize,
}

impl ConcurrentUnionFind {
    pub(super) fn new(node_count: usize) -> Self {
        let mut parents = Vec::with_capacity(node_count);
        let mut ranks = Vec::with_capacity(node_count);
        for id in 0..node_count {
            parents.push(AtomicUsize::new(id));
            ranks.push(AtomicUsize::new(0));
        }

        Self {
            parents,
            ranks,
            components: AtomicUsize::new(node_count),
        }
    }

    pub(super) fn node_count(&self) -> usize {
        self.parents.len()
    }

    pub(super) fn components(&self) -> usize {
        self.components.load(Ordering::Acquire)
    }

    pub(super) fn is_root(&self, node: usize) -> bool {
        self.parents[node].load(Ordering::Acquire) == node
    }

    /// Returns the current representative of `node`, compressing the path.
    ///
    /// A chain longer than the node table can only come from a cycle in the
    /// representative relation.
    pub(super) fn find(&self, node: usize) -> Result<usize, MstError> {
        let mut current = node;
        for _ in 0..=self.parents.len() {
            let parent = self.parents[current].load(Ordering::Acquire);

            if parent == current {
                return Ok(current);
            }

            let grandparent = self.parents[parent].load(Ordering::Acquire);

            // `grandparent == current` only happens on a cycle; leave it
            // intact so the bound below reports it.
            if grandparent != parent && grandparent != current {
                self.parents[current].store(grandparent, Ordering::Release);
            }

            current = parent;
        }

        Err(MstError::InvariantViolation {
            invariant: "representative chain must reach a root",
            index: node,
            bound: self.parents.len(),
        })
    }

    /// Merges two distinct roots, attaching the lower-rank root beneath the
    /// higher-rank one. Returns the surviving root.
    ///
    /// The caller must hold exclusive access to both roots.
    pub(super) fn union_by_rank(&self, left_root: usize, right_root: usize) -> Result<usize, MstError> {
        let left_rank = self.ranks[left_root].load(Ordering::Relaxed);
        let right_rank = self.ranks[right_root].load(Ordering::Relaxed);

        let (parent, child) = choose_parent_child(left_root, right_root, left_rank, right_rank);

        self.reparent(child, parent, "union_by_rank child must be a root")?;

        if left_rank == right_rank {
            self.ranks[parent].fetch_add(1, Ordering::Relaxed);
        }

        Ok(parent)
    }

    /// Attaches root `child` beneath `parent` without rank bookkeeping.
    ///
    /// The caller must be the only writer for `child` in the current round.
    pub(super) fn link_up(&self, child: usize, parent: usize) -> Result<(), MstError> {
        self.reparent(child, parent, "link_up child must be a root")
    }

    fn reparent(&self, child: usize, parent: usize, invariant: &'static str) -> Result<(), MstError> {
        if child == parent {
            return Err(MstError::InvariantViolation {
                invariant: "a root cannot be attached to itself",
                index: child,
                bound: self.parents.len(),
            });
        }

        self.parents[child]
            .compare_exchange(child, parent, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| MstError::InvariantViolation {
                invariant,
                index: child,
                bound: self.parents.len(),
            })?;

        self.components.fetch_sub(1, Ordering::AcqRel);
        Ok(())
    }
}

/// Orders two node ids ascending; the canonical lock acquisition order.
pub(super) fn canonical_pair(first: usize, second: usize) -> (usize, usize) {
    if first <= second {
        (first, second)
    } else {
        (second, first)
    }
}

fn choose_parent_child(
    left_root: usize,
    right_root: usize,
    left_rank: usize,
    right_rank: usize,
) -> (usize, usize) {
    if left_rank > right_rank {
        return (left_root, right_root);
    }
    if right_rank > left_rank {
        return (right_root, left_root);
    }

    canonical_pair(left_root, right_root)
}
