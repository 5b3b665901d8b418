//! Benchmark setup error type.
//!
//! Lets setup functions propagate failures with `?` instead of `.expect()`.

use canopy_core::MstError;

use crate::graph::GraphError;

/// Errors that may occur during benchmark setup.
#[derive(Debug, thiserror::Error)]
pub enum BenchSetupError {
    /// Synthetic graph generation failed.
    #[error("synthetic graph generation failed: {0}")]
    Graph(#[from] GraphError),
    /// Configuration or MST computation failed.
    #[error("MST operation failed: {0}")]
    Mst(#[from] MstError),
}
