//! # u-tour
//!
//! Tour planning for drone fleets: every vehicle leaves a shared depot,
//! visits its share of waypoints, and returns, with the total travel cost
//! minimized by guided local search under a time limit.
//!
//! ## Modules
//!
//! - [`models`] — Domain model types (ProblemModel, Route, Solution)
//! - [`distance`] — Dense travel-cost matrix
//! - [`evaluation`] — Arc cost models and route costing
//! - [`constructive`] — Fair-share nearest-neighbor construction
//! - [`local_search`] — Guided local search (2-opt, Or-opt, relocate, exchange)
//! - [`search`] — Time-bounded search controller and [`solve`](search::solve)
//! - [`io`] — JSON problem files, route export, warm-start loading
//! - [`error`] — Validation, feasibility, and I/O errors
//!
//! ## Example
//!
//! ```
//! use u_tour::models::ProblemModel;
//! use u_tour::search::solve;
//!
//! let problem = ProblemModel::from_rows(
//!     vec![
//!         vec![0.0, 1.0, 4.0, 4.0],
//!         vec![1.0, 0.0, 1.0, 4.0],
//!         vec![4.0, 1.0, 0.0, 1.0],
//!         vec![4.0, 4.0, 1.0, 0.0],
//!     ],
//!     1,
//! )
//! .unwrap();
//!
//! let solution = solve(&problem, None, 1.0);
//! assert_eq!(solution.tours(), vec![vec![0, 1, 2, 3, 0]]);
//! ```

pub mod constructive;
pub mod distance;
pub mod error;
pub mod evaluation;
pub mod io;
pub mod local_search;
pub mod models;
pub mod search;

pub use error::{Error, InfeasibleError, ValidationError};
pub use search::solve;
