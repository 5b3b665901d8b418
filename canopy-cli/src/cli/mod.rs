//! Command-line interface orchestration for canopy.
//!
//! The `run` command generates a seeded synthetic graph, computes its minimum
//! spanning forest with the selected contraction strategy and reports the
//! totals and counters.

mod commands;
mod graph;

pub use commands::{
    Cli, CliError, Command, ExecutionSummary, RunCommand, StrategyArg, WeightProfile,
    render_summary, run_cli,
};
pub use graph::synthetic_graph;
