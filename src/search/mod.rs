//! Anytime search: warm start, deadline, stagnation, and best tracking.
//!
//! - [`SearchConfig`] — Time limit, stagnation limit, pass budget, penalty factor
//! - [`SearchController`] — Runs construction plus guided local search
//! - [`solve`] — Single-call entry point

mod config;
mod controller;

pub use config::SearchConfig;
pub use controller::{solve, SearchController, SearchResult, Termination};
