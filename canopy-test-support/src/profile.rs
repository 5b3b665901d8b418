//! Environment overrides for property-test suites.
//!
//! CI and local runs tune case counts, forking and repetition counts through
//! environment variables. Invalid overrides are logged and ignored.

use std::env;

/// Overrides the number of proptest cases per property.
pub const PROGTEST_CASES_ENV_KEY: &str = "PROGTEST_CASES";
/// Runs proptest cases in forked subprocesses when truthy.
pub const CANOPY_PBT_FORK_ENV_KEY: &str = "CANOPY_PBT_FORK";
/// Overrides how often repeatability properties rerun the same input.
pub const CANOPY_MST_PBT_CONCURRENCY_REPS_ENV_KEY: &str = "CANOPY_MST_PBT_CONCURRENCY_REPS";

/// Runtime profile for property-test execution.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProptestRunProfile {
    cases: u32,
    fork: bool,
}

impl ProptestRunProfile {
    /// Loads a profile, falling back to the given defaults.
    ///
    /// # Examples
    ///
    /// ```
    /// use canopy_test_support::profile::ProptestRunProfile;
    ///
    /// let profile = ProptestRunProfile::load(64, false);
    /// assert!(profile.cases() > 0);
    /// ```
    #[must_use]
    pub fn load(default_cases: u32, default_fork: bool) -> Self {
        Self {
            cases: env_override(PROGTEST_CASES_ENV_KEY, default_cases, parse_positive),
            fork: env_override(CANOPY_PBT_FORK_ENV_KEY, default_fork, parse_bool),
        }
    }

    /// Number of cases to run per property.
    #[must_use]
    #[rustfmt::skip]
    pub fn cases(&self) -> u32 { self.cases }

    /// Whether to run cases in forked subprocesses.
    #[must_use]
    #[rustfmt::skip]
    pub fn fork(&self) -> bool { self.fork }
}

/// Returns the repetition count for repeatability properties.
///
/// # Examples
///
/// ```
/// use canopy_test_support::profile::concurrency_repetitions;
///
/// assert!(concurrency_repetitions(3) > 0);
/// ```
#[must_use]
pub fn concurrency_repetitions(default: usize) -> usize {
    env_override(CANOPY_MST_PBT_CONCURRENCY_REPS_ENV_KEY, default, |raw| {
        parse_positive::<u32>(raw).map(|value| value as usize)
    })
}

fn env_override<T, F>(key: &'static str, default: T, parser: F) -> T
where
    F: Fn(&str) -> Result<T, String>,
{
    let Ok(raw) = env::var(key) else {
        return default;
    };
    parser(&raw).unwrap_or_else(|reason| {
        tracing::warn!(
            env = key,
            raw = %raw,
            reason = %reason,
            "invalid property-test profile override; using default",
        );
        default
    })
}

fn parse_positive<T>(raw: &str) -> Result<T, String>
where
    T: std::str::FromStr + PartialEq + Default,
    T::Err: std::fmt::Display,
{
    let parsed = raw
        .trim()
        .parse::<T>()
        .map_err(|error| format!("parse error: {error}"))?;
    if parsed == T::default() {
        return Err("value must be > 0".to_owned());
    }
    Ok(parsed)
}

fn parse_bool(raw: &str) -> Result<bool, String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err("expected one of: true/false/1/0/yes/no/on/off".to_owned()),
    }
}
