//! Domain model types for drone tour planning.
//!
//! Provides the validated problem instance, routes as depot-anchored
//! waypoint sequences, and solutions that assign every waypoint to exactly
//! one vehicle.

mod problem;
mod route;
mod solution;

pub use problem::{ProblemModel, DEPOT};
pub use route::Route;
pub use solution::Solution;
