//! Guided local search for improving solutions.
//!
//! - [`first_improving_two_opt`] — Intra-route segment reversal
//! - [`first_improving_or_opt`] — Segment relocation (1–3 waypoints within a route, 2–3 across routes)
//! - [`first_improving_relocate`] — Inter-route single-waypoint relocation
//! - [`first_improving_exchange`] — Inter-route waypoint swap
//! - [`LocalSearchEngine`] — Penalty bookkeeping and move selection

mod engine;
mod exchange;
mod moves;
mod or_opt;
mod penalty;
mod relocate;
mod two_opt;

pub use engine::{LocalSearchEngine, Operator, PassOutcome};
pub use exchange::first_improving_exchange;
pub use moves::{Move, ScoredMove};
pub use or_opt::{first_improving_or_opt, MAX_SEGMENT_LEN};
pub(crate) use penalty::check_penalty_factor;
pub use penalty::{utility, AugmentedCost, PenaltyMatrix};
pub use relocate::first_improving_relocate;
pub use two_opt::first_improving_two_opt;

/// Smallest cost decrease that counts as an improvement.
pub const IMPROVEMENT_EPS: f64 = 1e-9;
