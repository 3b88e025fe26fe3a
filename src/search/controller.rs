//! Time-bounded search orchestration.
//!
//! # Algorithm
//!
//! 1. Use the prior solution if it matches the problem, otherwise construct one
//! 2. Until the deadline, pass budget, or stagnation limit is hit:
//!    a. Run one local search pass
//!    b. Record the true cost whenever it is a new best
//! 3. Return the best solution seen
//!
//! Limits are checked between passes only, so the returned solution is always
//! a complete, committed one.

use std::time::Instant;

use tracing::{info, warn};

use super::config::SearchConfig;
use crate::constructive::nearest_neighbor;
use crate::error::ValidationError;
use crate::local_search::{LocalSearchEngine, PassOutcome};
use crate::models::{ProblemModel, Solution};

/// Why a search run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// The time limit expired.
    Deadline,
    /// Too many consecutive passes without a new best.
    Stagnation,
    /// The pass budget was used up.
    PassLimit,
    /// There was nothing left to search.
    Exhausted,
}

/// Result of a search run.
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// Best solution found.
    pub best: Solution,
    /// True cost of the best solution.
    pub best_cost: f64,
    /// Local search passes executed.
    pub passes: usize,
    /// Passes that ended in a penalty step.
    pub penalty_steps: usize,
    /// The run started from the prior solution.
    pub warm_started: bool,
    pub termination: Termination,
    /// `(pass, cost)` for the starting solution (pass 0) and for every pass
    /// that found a new best. Costs strictly decrease.
    pub cost_history: Vec<(usize, f64)>,
}

/// Drives construction and guided local search for one problem.
///
/// # Examples
///
/// ```
/// use u_tour::models::ProblemModel;
/// use u_tour::search::{SearchConfig, SearchController};
///
/// let problem = ProblemModel::from_rows(
///     vec![
///         vec![0.0, 1.0, 4.0, 4.0],
///         vec![1.0, 0.0, 1.0, 4.0],
///         vec![4.0, 1.0, 0.0, 1.0],
///         vec![4.0, 4.0, 1.0, 0.0],
///     ],
///     1,
/// )
/// .unwrap();
///
/// let config = SearchConfig::default().with_time_limit_secs(1.0).with_max_passes(50);
/// let result = SearchController::new(&problem, config).unwrap().run(None);
/// assert_eq!(result.best.tours(), vec![vec![0, 1, 2, 3, 0]]);
/// assert_eq!(result.best_cost, 7.0);
/// ```
#[derive(Debug, Clone)]
pub struct SearchController<'a> {
    problem: &'a ProblemModel,
    config: SearchConfig,
}

impl<'a> SearchController<'a> {
    pub fn new(problem: &'a ProblemModel, config: SearchConfig) -> Result<Self, ValidationError> {
        config.validate()?;
        Ok(Self { problem, config })
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Runs the search, optionally starting from `prior`.
    ///
    /// A prior that does not match the problem is discarded and the run falls
    /// back to construction.
    pub fn run(&self, prior: Option<Solution>) -> SearchResult {
        let start = Instant::now();
        // overflow means the limit is effectively unbounded
        let deadline = start.checked_add(self.config.time_limit);

        let (initial, warm_started) = self.initial_solution(prior);
        let mut engine = LocalSearchEngine::with_checked_factor(
            self.problem,
            initial,
            self.config.penalty_factor,
            self.config.parallel,
        );
        info!(
            waypoints = self.problem.num_waypoints(),
            vehicles = self.problem.num_vehicles(),
            warm_started,
            cost = engine.best_cost(),
            "starting search"
        );

        let mut passes = 0;
        let mut stagnant = 0;
        let mut cost_history = vec![(0, engine.best_cost())];

        let termination = loop {
            if self.config.max_passes > 0 && passes >= self.config.max_passes {
                break Termination::PassLimit;
            }
            if deadline.is_some_and(|d| Instant::now() >= d) {
                break Termination::Deadline;
            }

            let outcome = engine.pass();
            passes += 1;

            match outcome {
                PassOutcome::Exhausted => break Termination::Exhausted,
                PassOutcome::Improved { new_best: true } => {
                    stagnant = 0;
                    cost_history.push((passes, engine.best_cost()));
                }
                _ => stagnant += 1,
            }
            if self.config.max_stagnant_passes > 0 && stagnant >= self.config.max_stagnant_passes
            {
                break Termination::Stagnation;
            }
        };

        let penalty_steps = engine.penalty_steps();
        let (best, best_cost) = engine.into_best();
        info!(
            cost = best_cost,
            passes,
            penalty_steps,
            ?termination,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "search finished"
        );

        SearchResult {
            best,
            best_cost,
            passes,
            penalty_steps,
            warm_started,
            termination,
            cost_history,
        }
    }

    fn initial_solution(&self, prior: Option<Solution>) -> (Solution, bool) {
        if let Some(prior) = prior {
            match prior.validate(self.problem) {
                Ok(()) => return (prior, true),
                Err(err) => warn!(%err, "discarding prior solution"),
            }
        }
        (nearest_neighbor(self.problem), false)
    }
}

/// Plans tours for `problem` within `time_limit_seconds`.
///
/// Starts from `prior` when it matches the problem, otherwise from the
/// nearest-neighbor construction. Always returns a solution that visits
/// every waypoint exactly once; with a zero time limit that is the starting
/// solution itself.
///
/// # Examples
///
/// ```
/// use u_tour::models::ProblemModel;
/// use u_tour::search::solve;
///
/// let problem = ProblemModel::from_rows(
///     vec![
///         vec![0.0, 2.0, 2.0],
///         vec![2.0, 0.0, 3.0],
///         vec![2.0, 3.0, 0.0],
///     ],
///     2,
/// )
/// .unwrap();
/// let solution = solve(&problem, None, 0.0);
/// assert_eq!(solution.num_routes(), 2);
/// assert_eq!(solution.num_served(), 2);
/// ```
pub fn solve(problem: &ProblemModel, prior: Option<Solution>, time_limit_seconds: f64) -> Solution {
    let config = SearchConfig::default().with_time_limit_secs(time_limit_seconds);
    // the default penalty factor is always valid
    SearchController { problem, config }.run(prior).best
}
