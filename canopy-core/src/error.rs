//! Error types for the Canopy core library.
//!
//! Defines the error enum exposed by the public API, its stable
//! machine-readable codes, and a convenient result alias.

use std::{fmt, sync::Arc};

use thiserror::Error;

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

/// Errors returned while computing a minimum spanning forest.
///
/// Merge conflicts between concurrent workers are not errors: they are
/// resolved internally by deferring the edge to a later round. Every variant
/// here aborts the computation.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum MstError {
    /// The caller requested a forest for a graph without nodes.
    #[error("cannot compute a spanning forest for an empty graph")]
    EmptyGraph,
    /// An edge referenced a node id that is not present in the graph.
    #[error("edge references node {node}, but node_count is {node_count}")]
    InvalidNodeId {
        /// The invalid node id referenced by an edge.
        node: usize,
        /// The number of nodes in the graph.
        node_count: usize,
    },
    /// An edge contained a non-finite weight.
    #[error("edge ({left}, {right}) has non-finite weight")]
    NonFiniteWeight {
        /// The left endpoint id (as provided).
        left: usize,
        /// The right endpoint id (as provided).
        right: usize,
    },
    /// The configured worker count was zero.
    #[error("thread count must be at least 1 (got {got})")]
    InvalidThreadCount {
        /// The invalid thread count supplied by the caller.
        got: usize,
    },
    /// The configured dispatch window was zero.
    #[error("dispatch window must be at least 1 (got {got})")]
    InvalidWindow {
        /// The invalid window supplied by the caller.
        got: usize,
    },
    /// The dedicated worker pool could not be created.
    #[error("failed to build worker pool: {message}")]
    ThreadPool {
        /// Message reported by the pool builder.
        message: Arc<str>,
    },
    /// A synchronisation primitive became poisoned after a panic.
    #[error("lock for {resource} is poisoned")]
    LockPoisoned {
        /// Name of the locked resource that was poisoned.
        resource: &'static str,
    },
    /// An internal invariant was violated, indicating a logic error.
    #[error("MST invariant violated: {invariant} (index {index}, bound {bound})")]
    InvariantViolation {
        /// Name of the violated invariant to assist debugging.
        invariant: &'static str,
        /// The node, edge or counter value that violated the invariant.
        index: usize,
        /// The bound the offending value was checked against.
        bound: usize,
    },
}

define_error_codes! {
    /// Stable codes describing [`MstError`] variants.
    enum MstErrorCode for MstError {
        /// The caller requested a forest for a graph without nodes.
        EmptyGraph => EmptyGraph => "MST_EMPTY_GRAPH",
        /// An edge referenced a node id that is not present in the graph.
        InvalidNodeId => InvalidNodeId { .. } => "MST_INVALID_NODE_ID",
        /// An edge contained a non-finite weight.
        NonFiniteWeight => NonFiniteWeight { .. } => "MST_NON_FINITE_WEIGHT",
        /// The configured worker count was zero.
        InvalidThreadCount => InvalidThreadCount { .. } => "MST_INVALID_THREAD_COUNT",
        /// The configured dispatch window was zero.
        InvalidWindow => InvalidWindow { .. } => "MST_INVALID_WINDOW",
        /// The dedicated worker pool could not be created.
        ThreadPool => ThreadPool { .. } => "MST_THREAD_POOL",
        /// A synchronisation primitive became poisoned after a panic.
        LockPoisoned => LockPoisoned { .. } => "MST_LOCK_POISONED",
        /// An internal invariant was violated.
        InvariantViolation => InvariantViolation { .. } => "MST_INVARIANT_VIOLATION",
    }
}

/// Convenient alias for results returned by the core API.
pub type Result<T> = core::result::Result<T, MstError>;
