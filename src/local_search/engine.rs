//! Guided local search engine.
//!
//! # Algorithm
//!
//! Each call to [`LocalSearchEngine::pass`] runs the operators in a fixed
//! order (2-opt, Or-opt, relocate, exchange) under the penalty-augmented
//! cost. The first operator that yields an improving move wins; among the
//! independent scan tasks of that operator, the most improving result is
//! committed (ties go to the lowest task index). When no operator improves,
//! the arcs of the current solution with maximum utility
//! `d(i, j) / (1 + p(i, j))` are penalized.
//!
//! Scan tasks only read the solution and the cost model, so they can be
//! scored on the rayon pool; the engine is the single writer that commits the
//! chosen move. Sequential and parallel scoring select the same move.
//!
//! # Reference
//!
//! Voudouris, C. & Tsang, E. (1999). "Guided local search and its application
//! to the traveling salesman problem", *European Journal of Operational
//! Research* 113(2), 469-499.

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::{debug, instrument};

use super::exchange::first_improving_exchange;
use super::moves::ScoredMove;
use super::or_opt::first_improving_or_opt;
use super::penalty::{check_penalty_factor, utility, AugmentedCost, PenaltyMatrix};
use super::relocate::first_improving_relocate;
use super::two_opt::first_improving_two_opt;
use super::IMPROVEMENT_EPS;
use crate::error::ValidationError;
use crate::models::{ProblemModel, Solution};

/// Neighborhood operators in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    TwoOpt,
    OrOpt,
    Relocate,
    Exchange,
}

impl Operator {
    pub const ALL: [Operator; 4] = [
        Operator::TwoOpt,
        Operator::OrOpt,
        Operator::Relocate,
        Operator::Exchange,
    ];

    /// Independent scan tasks: a route, or a pair of routes.
    fn tasks(self, num_routes: usize) -> Vec<(usize, usize)> {
        match self {
            Operator::TwoOpt => (0..num_routes).map(|r| (r, r)).collect(),
            Operator::OrOpt => (0..num_routes)
                .flat_map(|a| (0..num_routes).map(move |b| (a, b)))
                .collect(),
            Operator::Relocate => (0..num_routes)
                .flat_map(|a| (0..num_routes).filter(move |&b| b != a).map(move |b| (a, b)))
                .collect(),
            Operator::Exchange => (0..num_routes)
                .flat_map(|a| (a + 1..num_routes).map(move |b| (a, b)))
                .collect(),
        }
    }

    fn scan(
        self,
        solution: &Solution,
        (a, b): (usize, usize),
        costs: &AugmentedCost<'_>,
    ) -> Option<ScoredMove> {
        match self {
            Operator::TwoOpt => first_improving_two_opt(solution, a, costs),
            Operator::OrOpt => first_improving_or_opt(solution, a, b, costs),
            Operator::Relocate => first_improving_relocate(solution, a, b, costs),
            Operator::Exchange => first_improving_exchange(solution, a, b, costs),
        }
    }
}

/// Result of a single [`LocalSearchEngine::pass`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PassOutcome {
    /// A move lowered the augmented cost and was committed.
    Improved {
        /// The committed move also produced a new best true cost.
        new_best: bool,
    },
    /// No improving move existed; `arcs` arcs were penalized.
    Penalized { arcs: usize },
    /// Nothing left to search: no arcs to penalize, or a zero-cost solution.
    Exhausted,
}

/// Guided local search over a mutable working solution.
///
/// Penalties live and die with the engine. The best solution by true
/// (unpenalized) cost is tracked separately from the working solution,
/// because augmented-cost moves may make the working solution worse.
///
/// # Examples
///
/// ```
/// use u_tour::models::{ProblemModel, Solution};
/// use u_tour::local_search::{LocalSearchEngine, PassOutcome};
///
/// let problem = ProblemModel::from_rows(
///     vec![
///         vec![0.0, 1.0, 1.4, 1.0],
///         vec![1.0, 0.0, 1.0, 1.4],
///         vec![1.4, 1.0, 0.0, 1.0],
///         vec![1.0, 1.4, 1.0, 0.0],
///     ],
///     1,
/// )
/// .unwrap();
/// let start = Solution::from_tours(vec![vec![0, 2, 1, 3, 0]]).unwrap();
///
/// let mut engine = LocalSearchEngine::new(&problem, start, 0.3, false).unwrap();
/// assert_eq!(engine.pass(), PassOutcome::Improved { new_best: true });
/// assert!((engine.best_cost() - 4.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone)]
pub struct LocalSearchEngine<'a> {
    problem: &'a ProblemModel,
    symmetric: bool,
    penalty_factor: f64,
    parallel: bool,
    penalties: PenaltyMatrix,
    lambda: f64,
    current: Solution,
    current_cost: f64,
    best: Solution,
    best_cost: f64,
    penalty_steps: usize,
}

impl<'a> LocalSearchEngine<'a> {
    /// Starts a search from `initial`, which must be valid for `problem`.
    ///
    /// `penalty_factor` scales penalties relative to the average arc cost of
    /// the first local optimum. With `parallel`, scan tasks are scored on the
    /// rayon pool when the `parallel` feature is enabled.
    ///
    /// Fails if `penalty_factor` is not positive and finite.
    pub fn new(
        problem: &'a ProblemModel,
        initial: Solution,
        penalty_factor: f64,
        parallel: bool,
    ) -> Result<Self, ValidationError> {
        check_penalty_factor(penalty_factor)?;
        Ok(Self::with_checked_factor(
            problem,
            initial,
            penalty_factor,
            parallel,
        ))
    }

    /// Like [`Self::new`], for a `penalty_factor` that was already validated.
    pub(crate) fn with_checked_factor(
        problem: &'a ProblemModel,
        initial: Solution,
        penalty_factor: f64,
        parallel: bool,
    ) -> Self {
        let cost = initial.cost(problem);
        Self {
            problem,
            symmetric: problem.is_symmetric(),
            penalty_factor,
            parallel,
            penalties: PenaltyMatrix::new(problem.num_nodes()),
            lambda: 0.0,
            current: initial.clone(),
            current_cost: cost,
            best: initial,
            best_cost: cost,
            penalty_steps: 0,
        }
    }

    /// Runs one pass: commits one improving move or takes one penalty step.
    #[instrument(skip_all, level = "trace")]
    pub fn pass(&mut self) -> PassOutcome {
        let found = {
            let costs = AugmentedCost::new(self.problem, &self.penalties, self.lambda);
            Operator::ALL
                .iter()
                .find_map(|&op| self.best_move(op, &costs))
        };

        match found {
            Some(scored) => {
                scored.mv.apply(&mut self.current);
                self.current_cost = self.current.cost(self.problem);
                let new_best = self.current_cost < self.best_cost - IMPROVEMENT_EPS;
                if new_best {
                    self.best.clone_from(&self.current);
                    self.best_cost = self.current_cost;
                    debug!(
                        cost = self.best_cost,
                        operator = scored.mv.operator_name(),
                        "new best solution"
                    );
                }
                PassOutcome::Improved { new_best }
            }
            None => self.penalize(),
        }
    }

    /// Scores every task of `op` and picks the most improving result.
    fn best_move(&self, op: Operator, costs: &AugmentedCost<'_>) -> Option<ScoredMove> {
        let tasks = op.tasks(self.current.num_routes());
        let results = self.score_tasks(op, &tasks, costs);

        let mut best: Option<ScoredMove> = None;
        for scored in results.into_iter().flatten() {
            if best.is_none_or(|b| scored.delta < b.delta) {
                best = Some(scored);
            }
        }
        best
    }

    #[cfg(feature = "parallel")]
    fn score_tasks(
        &self,
        op: Operator,
        tasks: &[(usize, usize)],
        costs: &AugmentedCost<'_>,
    ) -> Vec<Option<ScoredMove>> {
        if self.parallel && tasks.len() > 1 {
            tasks
                .par_iter()
                .map(|&task| op.scan(&self.current, task, costs))
                .collect()
        } else {
            tasks
                .iter()
                .map(|&task| op.scan(&self.current, task, costs))
                .collect()
        }
    }

    #[cfg(not(feature = "parallel"))]
    fn score_tasks(
        &self,
        op: Operator,
        tasks: &[(usize, usize)],
        costs: &AugmentedCost<'_>,
    ) -> Vec<Option<ScoredMove>> {
        tasks
            .iter()
            .map(|&task| op.scan(&self.current, task, costs))
            .collect()
    }

    /// Penalizes the maximum-utility arcs of the current solution.
    fn penalize(&mut self) -> PassOutcome {
        if self.current_cost <= 0.0 {
            return PassOutcome::Exhausted;
        }

        let arcs: Vec<(usize, usize)> = self
            .current
            .routes()
            .iter()
            .flat_map(|r| r.arcs())
            .collect();
        if arcs.is_empty() {
            return PassOutcome::Exhausted;
        }

        if self.lambda == 0.0 {
            self.lambda = self.penalty_factor * self.current_cost / arcs.len() as f64;
        }

        let score = |&(i, j): &(usize, usize)| {
            utility(self.problem.distance(i, j), self.penalties.get(i, j))
        };
        let max_utility = arcs.iter().map(score).fold(f64::NEG_INFINITY, f64::max);
        let selected: Vec<(usize, usize)> = arcs
            .iter()
            .copied()
            .filter(|arc| score(arc) >= max_utility)
            .collect();

        for &(i, j) in &selected {
            self.penalties.increment(i, j);
            if self.symmetric && i != j {
                self.penalties.increment(j, i);
            }
        }
        self.penalty_steps += 1;
        self.current_cost = self.current.cost(self.problem);

        debug!(
            arcs = selected.len(),
            lambda = self.lambda,
            step = self.penalty_steps,
            "penalized local optimum"
        );
        PassOutcome::Penalized {
            arcs: selected.len(),
        }
    }

    /// Best solution by true cost seen so far.
    pub fn best(&self) -> &Solution {
        &self.best
    }

    pub fn best_cost(&self) -> f64 {
        self.best_cost
    }

    /// Working solution, which may be worse than [`Self::best`].
    pub fn current(&self) -> &Solution {
        &self.current
    }

    pub fn current_cost(&self) -> f64 {
        self.current_cost
    }

    /// Number of penalty steps taken.
    pub fn penalty_steps(&self) -> usize {
        self.penalty_steps
    }

    pub fn penalties(&self) -> &PenaltyMatrix {
        &self.penalties
    }

    /// Consumes the engine, returning the best solution and its cost.
    pub fn into_best(self) -> (Solution, f64) {
        (self.best, self.best_cost)
    }
}
