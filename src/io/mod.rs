//! File adapters around the solver.
//!
//! - [`load_problem`] — JSON distance matrix and fleet size
//! - [`load_prior_solution`] — previously exported routes, for warm starts
//! - [`RouteExporter`] / [`persist_solution`] — ragged array of tours

mod export;
mod problem_file;

pub use export::{load_prior_solution, persist_solution, RouteExporter};
pub use problem_file::{load_problem, ProblemFile};
