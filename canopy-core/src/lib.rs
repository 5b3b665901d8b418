//! Canopy core library: parallel minimum spanning forests over a concurrent
//! union-find.
#![cfg_attr(docsrs, feature(doc_cfg))]

mod builder;
mod edge;
mod error;
mod kruskal;
mod mst;

#[cfg(test)]
pub(crate) mod test_utils;

pub use crate::{
    builder::{DEFAULT_WINDOW, KruskalBuilder, KruskalConfig, StrategyKind},
    edge::{EdgeList, WeightedEdge},
    error::{MstError, MstErrorCode, Result},
    kruskal::{parallel_kruskal, parallel_kruskal_with},
    mst::{MinimumSpanningForest, MstEdge, MstStats},
};
