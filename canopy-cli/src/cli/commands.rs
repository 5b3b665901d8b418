//! Command implementations and argument parsing for the canopy CLI.

use std::io::{self, Write};

use canopy_core::{
    KruskalBuilder, MinimumSpanningForest, MstError, StrategyKind, parallel_kruskal_with,
};
use clap::{Args, Parser, Subcommand, ValueEnum};
use thiserror::Error;
use tracing::{Span, field, info, instrument};

use super::graph::synthetic_graph;

const DEFAULT_NODES: usize = 1_000;
const DEFAULT_EDGE_FACTOR: usize = 4;

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(
    name = "canopy",
    about = "Compute minimum spanning forests with concurrent union-find."
)]
pub struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported CLI commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Generate a synthetic graph and compute its spanning forest.
    Run(RunCommand),
}

/// Options accepted by the `run` command.
#[derive(Debug, Args, Clone)]
pub struct RunCommand {
    /// Number of nodes in the generated graph.
    #[arg(long, default_value_t = DEFAULT_NODES)]
    pub nodes: usize,

    /// Edges generated per node.
    #[arg(long = "edge-factor", default_value_t = DEFAULT_EDGE_FACTOR)]
    pub edge_factor: usize,

    /// Seed for the graph generator.
    #[arg(long, default_value_t = 0)]
    pub seed: u64,

    /// Edge weight distribution.
    #[arg(long, value_enum, default_value_t = WeightProfile::Unique)]
    pub weights: WeightProfile,

    /// Contraction strategy.
    #[arg(long, value_enum, default_value_t = StrategyArg::Optimistic)]
    pub strategy: StrategyArg,

    /// Worker threads; defaults to the global rayon pool.
    #[arg(long)]
    pub threads: Option<usize>,

    /// Maximum batch size for the optimistic strategy.
    #[arg(long)]
    pub window: Option<usize>,
}

/// Weight distributions offered by the synthetic generator.
#[derive(Debug, Clone, Copy, Eq, PartialEq, ValueEnum)]
pub enum WeightProfile {
    /// Every edge has a distinct weight.
    Unique,
    /// Every edge has weight `1.0`.
    Identical,
}

/// Command-line spelling of [`StrategyKind`].
#[derive(Debug, Clone, Copy, Eq, PartialEq, ValueEnum)]
pub enum StrategyArg {
    /// Per-node locks.
    Pessimistic,
    /// Lock-free claims validated after a barrier.
    Optimistic,
}

impl From<StrategyArg> for StrategyKind {
    fn from(value: StrategyArg) -> Self {
        match value {
            StrategyArg::Pessimistic => Self::Pessimistic,
            StrategyArg::Optimistic => Self::Optimistic,
        }
    }
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// `nodes * edge_factor` does not fit in `usize`.
    #[error("edge count overflows: {nodes} nodes with edge factor {edge_factor}")]
    EdgeCountOverflow {
        /// Requested node count.
        nodes: usize,
        /// Requested edges per node.
        edge_factor: usize,
    },
    /// Configuration or computation failed in the core library.
    #[error(transparent)]
    Core(#[from] MstError),
}

/// Summarises the outcome of executing a CLI command.
#[derive(Debug, Clone)]
pub struct ExecutionSummary {
    /// Strategy used for the run.
    pub strategy: StrategyKind,
    /// Node count of the generated graph.
    pub nodes: usize,
    /// Edge count of the generated graph.
    pub edges: usize,
    /// Resulting spanning forest.
    pub forest: MinimumSpanningForest,
}

/// Executes the CLI command represented by `cli`.
///
/// # Errors
/// Returns [`CliError`] when the configuration is invalid or the run fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use canopy_cli::cli::{Cli, Command, RunCommand, StrategyArg, WeightProfile, run_cli};
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let cli = Cli {
///     command: Command::Run(RunCommand {
///         nodes: 32,
///         edge_factor: 4,
///         seed: 1,
///         weights: WeightProfile::Unique,
///         strategy: StrategyArg::Pessimistic,
///         threads: Some(2),
///         window: None,
///     }),
/// };
/// let summary = run_cli(cli)?;
/// assert_eq!(summary.edges, 128);
/// assert_eq!(
///     summary.forest.edges().len() + summary.forest.component_count(),
///     32,
/// );
/// # Ok(())
/// # }
/// ```
#[instrument(
    name = "cli.run",
    err,
    skip(cli),
    fields(command = field::Empty),
)]
pub fn run_cli(cli: Cli) -> Result<ExecutionSummary, CliError> {
    match cli.command {
        Command::Run(run) => {
            Span::current().record("command", field::display("run"));
            run_command(run)
        }
    }
}

#[instrument(
    name = "cli.execute",
    err,
    skip(command),
    fields(
        nodes = command.nodes,
        edge_factor = command.edge_factor,
        seed = command.seed,
        strategy = field::Empty,
        edges = field::Empty,
    ),
)]
pub(super) fn run_command(command: RunCommand) -> Result<ExecutionSummary, CliError> {
    let RunCommand {
        nodes,
        edge_factor,
        seed,
        weights,
        strategy,
        threads,
        window,
    } = command;

    let mut builder = KruskalBuilder::new().with_strategy(strategy.into());
    if let Some(threads) = threads {
        builder = builder.with_threads(threads);
    }
    if let Some(window) = window {
        builder = builder.with_window(window);
    }
    let config = builder.build()?;

    let edge_count = nodes
        .checked_mul(edge_factor)
        .ok_or(CliError::EdgeCountOverflow { nodes, edge_factor })?;
    let graph = synthetic_graph(nodes, edge_count, weights, seed);

    let span = Span::current();
    span.record("strategy", field::display(config.strategy()));
    span.record("edges", graph.len());

    let forest = parallel_kruskal_with(nodes, &graph, &config)?;
    info!(
        total_weight = forest.total_weight(),
        components = forest.component_count(),
        "command completed"
    );
    Ok(ExecutionSummary {
        strategy: config.strategy(),
        nodes,
        edges: graph.len(),
        forest,
    })
}

/// Renders `summary` to `writer` in a human-readable text format.
///
/// # Errors
/// Returns [`io::Error`] if writing to the supplied writer fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use canopy_cli::cli::{ExecutionSummary, render_summary};
/// # use canopy_core::{EdgeList, StrategyKind, parallel_kruskal};
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let edges = EdgeList::from_tuples(&[(0, 1, 1.0), (1, 2, 2.0)]);
/// let summary = ExecutionSummary {
///     strategy: StrategyKind::Optimistic,
///     nodes: 3,
///     edges: edges.len(),
///     forest: parallel_kruskal(3, &edges)?,
/// };
/// let mut buffer = Vec::new();
/// render_summary(&summary, &mut buffer)?;
/// assert!(String::from_utf8(buffer)?.contains("total weight: 3"));
/// # Ok(())
/// # }
/// ```
pub fn render_summary(summary: &ExecutionSummary, mut writer: impl Write) -> io::Result<()> {
    let forest = &summary.forest;
    let stats = forest.stats();
    writeln!(writer, "strategy: {}", summary.strategy)?;
    writeln!(writer, "nodes: {}", summary.nodes)?;
    writeln!(writer, "edges: {}", summary.edges)?;
    writeln!(writer, "total weight: {}", forest.total_weight())?;
    writeln!(writer, "forest edges: {}", forest.edges().len())?;
    writeln!(writer, "components: {}", forest.component_count())?;
    writeln!(writer, "unions: {}", stats.union_count())?;
    writeln!(writer, "match iterations: {}", stats.match_iterations())?;
    writeln!(writer, "merge iterations: {}", stats.merge_iterations())?;
    writeln!(writer, "conflicts: {}", stats.conflicts())?;
    writeln!(writer, "redundant: {}", stats.redundant())?;
    writeln!(writer, "rounds: {}", stats.rounds())?;
    writeln!(writer, "batches: {}", stats.batches())?;
    Ok(())
}
