//! Search configuration.

use std::time::Duration;

use tracing::warn;

use crate::error::ValidationError;
use crate::local_search::check_penalty_factor;

/// Configuration for a [`SearchController`](super::SearchController) run.
///
/// # Examples
///
/// ```
/// use u_tour::search::SearchConfig;
///
/// let config = SearchConfig::default()
///     .with_time_limit_secs(90.0)
///     .with_max_stagnant_passes(5_000)
///     .with_penalty_factor(0.2)
///     .with_parallel(false);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Wall-clock budget, measured from the start of the run.
    pub time_limit: Duration,

    /// Stop after this many consecutive passes without a new best. 0 = no limit.
    pub max_stagnant_passes: usize,

    /// Maximum total passes (hard budget). 0 = no limit.
    pub max_passes: usize,

    /// Penalty weight relative to the average arc cost of the first local optimum.
    pub penalty_factor: f64,

    /// Score neighborhood tasks on the rayon pool.
    pub parallel: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            time_limit: Duration::from_secs(30),
            max_stagnant_passes: 20_000,
            max_passes: 0,
            penalty_factor: 0.3,
            parallel: true,
        }
    }
}

impl SearchConfig {
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = limit;
        self
    }

    /// Sets the time limit in seconds.
    ///
    /// Negative or NaN values mean "no time", positive infinity means no limit.
    pub fn with_time_limit_secs(mut self, secs: f64) -> Self {
        self.time_limit = duration_from_secs(secs);
        self
    }

    pub fn with_max_stagnant_passes(mut self, n: usize) -> Self {
        self.max_stagnant_passes = n;
        self
    }

    pub fn with_max_passes(mut self, n: usize) -> Self {
        self.max_passes = n;
        self
    }

    pub fn with_penalty_factor(mut self, factor: f64) -> Self {
        self.penalty_factor = factor;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_penalty_factor(self.penalty_factor)
    }
}

fn duration_from_secs(secs: f64) -> Duration {
    if secs.is_nan() || secs < 0.0 {
        warn!(secs, "invalid time limit, searching without improvement time");
        return Duration::ZERO;
    }
    // only overflow is left to fail
    Duration::try_from_secs_f64(secs).unwrap_or(Duration::MAX)
}
