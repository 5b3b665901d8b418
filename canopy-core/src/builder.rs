//! Builder utilities for configuring spanning forest runs.
//!
//! Exposes the contraction strategy selection surface and the validation
//! performed before a [`KruskalConfig`] can be used.

use std::{fmt, num::NonZeroUsize, sync::Arc};

use rayon::{ThreadPool, ThreadPoolBuilder};
use tracing::{Dispatch, Span};

use crate::{Result, error::MstError};

/// Default number of edges the optimistic strategy may batch together.
pub const DEFAULT_WINDOW: usize = 1024;

/// Selects how concurrent workers coordinate when merging components.
///
/// # Examples
/// ```
/// use canopy_core::StrategyKind;
///
/// assert_eq!(StrategyKind::default(), StrategyKind::Optimistic);
/// assert_eq!(StrategyKind::Pessimistic.as_str(), "pessimistic");
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum StrategyKind {
    /// Lock both representatives before merging; retry when they move.
    Pessimistic,
    /// Claim representatives lock-free, then validate after a barrier.
    #[default]
    Optimistic,
}

impl StrategyKind {
    /// Returns the lowercase name used in logs and on the command line.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pessimistic => "pessimistic",
            Self::Optimistic => "optimistic",
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Configures and validates [`KruskalConfig`] instances.
///
/// # Examples
/// ```
/// use canopy_core::{KruskalBuilder, StrategyKind};
///
/// let config = KruskalBuilder::new()
///     .with_strategy(StrategyKind::Pessimistic)
///     .with_threads(2)
///     .build()
///     .expect("builder configuration is valid");
/// assert_eq!(config.strategy(), StrategyKind::Pessimistic);
/// assert_eq!(config.threads().map(|t| t.get()), Some(2));
/// ```
#[derive(Clone, Debug)]
pub struct KruskalBuilder {
    strategy: StrategyKind,
    threads: Option<usize>,
    window: usize,
}

impl Default for KruskalBuilder {
    fn default() -> Self {
        Self {
            strategy: StrategyKind::default(),
            threads: None,
            window: DEFAULT_WINDOW,
        }
    }
}

impl KruskalBuilder {
    /// Creates a builder populated with default parameters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the contraction strategy.
    #[must_use]
    pub fn with_strategy(mut self, strategy: StrategyKind) -> Self {
        self.strategy = strategy;
        self
    }

    /// Runs on a dedicated pool with `threads` workers instead of the global
    /// rayon pool.
    #[must_use]
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = Some(threads);
        self
    }

    /// Overrides the maximum batch size of the optimistic strategy.
    ///
    /// The pessimistic strategy always batches a single weight class and
    /// ignores this value.
    #[must_use]
    pub fn with_window(mut self, window: usize) -> Self {
        self.window = window;
        self
    }

    /// Returns the configured strategy.
    #[must_use]
    #[rustfmt::skip]
    pub fn strategy(&self) -> StrategyKind { self.strategy }

    /// Returns the requested thread count, if any.
    #[must_use]
    #[rustfmt::skip]
    pub fn threads(&self) -> Option<usize> { self.threads }

    /// Returns the configured window.
    #[must_use]
    #[rustfmt::skip]
    pub fn window(&self) -> usize { self.window }

    /// Validates the configuration and builds the worker pool, if one was
    /// requested.
    ///
    /// # Errors
    /// Returns [`MstError::InvalidThreadCount`] for zero threads,
    /// [`MstError::InvalidWindow`] for a zero window and
    /// [`MstError::ThreadPool`] when the dedicated pool cannot be created.
    ///
    /// # Examples
    /// ```
    /// use canopy_core::{KruskalBuilder, MstErrorCode};
    ///
    /// let err = KruskalBuilder::new().with_window(0).build().unwrap_err();
    /// assert_eq!(err.code(), MstErrorCode::InvalidWindow);
    /// ```
    pub fn build(self) -> Result<KruskalConfig> {
        let window =
            NonZeroUsize::new(self.window).ok_or(MstError::InvalidWindow { got: self.window })?;

        let threads = self
            .threads
            .map(|got| NonZeroUsize::new(got).ok_or(MstError::InvalidThreadCount { got }))
            .transpose()?;

        let pool = threads
            .map(|threads| {
                ThreadPoolBuilder::new()
                    .num_threads(threads.get())
                    .thread_name(|index| format!("canopy-worker-{index}"))
                    .build()
                    .map(Arc::new)
                    .map_err(|err| MstError::ThreadPool {
                        message: Arc::from(err.to_string()),
                    })
            })
            .transpose()?;

        Ok(KruskalConfig {
            strategy: self.strategy,
            threads,
            window,
            pool,
        })
    }
}

/// A validated run configuration.
///
/// Cloning is cheap: a dedicated worker pool is shared between clones.
///
/// # Examples
/// ```
/// use canopy_core::{DEFAULT_WINDOW, KruskalConfig, StrategyKind};
///
/// let config = KruskalConfig::default();
/// assert_eq!(config.strategy(), StrategyKind::Optimistic);
/// assert_eq!(config.window().get(), DEFAULT_WINDOW);
/// assert!(config.threads().is_none());
/// ```
#[derive(Clone, Debug)]
pub struct KruskalConfig {
    strategy: StrategyKind,
    threads: Option<NonZeroUsize>,
    window: NonZeroUsize,
    pool: Option<Arc<ThreadPool>>,
}

impl Default for KruskalConfig {
    fn default() -> Self {
        Self {
            strategy: StrategyKind::default(),
            threads: None,
            window: NonZeroUsize::new(DEFAULT_WINDOW).unwrap_or(NonZeroUsize::MIN),
            pool: None,
        }
    }
}

impl KruskalConfig {
    /// Returns a builder for a custom configuration.
    #[must_use]
    pub fn builder() -> KruskalBuilder {
        KruskalBuilder::new()
    }

    /// Returns the selected strategy.
    #[must_use]
    #[rustfmt::skip]
    pub fn strategy(&self) -> StrategyKind { self.strategy }

    /// Returns the dedicated pool size, or `None` for the global pool.
    #[must_use]
    #[rustfmt::skip]
    pub fn threads(&self) -> Option<NonZeroUsize> { self.threads }

    /// Returns the optimistic batch window.
    #[must_use]
    #[rustfmt::skip]
    pub fn window(&self) -> NonZeroUsize { self.window }

    /// Runs `op` on the dedicated pool, or on the current pool when none was
    /// requested.
    pub(crate) fn install<R: Send>(&self, op: impl FnOnce() -> R + Send) -> R {
        let Some(pool) = &self.pool else {
            return op();
        };

        // Pool workers do not inherit the caller's subscriber or span.
        let dispatch = tracing::dispatcher::get_default(Dispatch::clone);
        let span = Span::current();
        pool.install(move || tracing::dispatcher::with_default(&dispatch, || span.in_scope(op)))
    }
}
