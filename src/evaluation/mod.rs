//! Cost evaluation for routes and solutions.
//!
//! - [`ArcCost`] — per-arc cost model (plain distances or penalized)
//! - [`route_cost`] — cost of one depot-anchored route
//! - [`RouteProfile`] — prefix sums for constant-time segment pricing

mod evaluator;

pub use evaluator::{route_cost, ArcCost, RouteProfile};
