//! Error types for problem validation, feasibility, and I/O.
//!
//! Deadline expiry is never an error: a search that runs out of time returns
//! its best solution so far.

use thiserror::Error;

/// A malformed problem instance or an inconsistent prior solution.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("distance matrix is empty")]
    EmptyMatrix,

    #[error("distance matrix row {row} has {len} entries, expected {expected}")]
    NotSquare {
        row: usize,
        len: usize,
        expected: usize,
    },

    #[error("distance matrix holds {len} entries, expected {size}x{size}")]
    DataLength { len: usize, size: usize },

    #[error("invalid distance {value} from {from} to {to}")]
    InvalidEntry { from: usize, to: usize, value: f64 },

    #[error("distance from waypoint {node} to itself is {value}, expected 0")]
    NonZeroDiagonal { node: usize, value: f64 },

    #[error("fleet size must be at least 1, got {0}")]
    InvalidFleetSize(i64),

    #[error("penalty factor must be positive and finite, got {0}")]
    InvalidPenaltyFactor(f64),

    #[error("solution has {found} routes, expected {expected}")]
    RouteCountMismatch { expected: usize, found: usize },

    #[error("route {route} does not start and end at the depot")]
    RouteNotAnchored { route: usize },

    #[error("route {route} visits the depot between its endpoints")]
    DepotInsideRoute { route: usize },

    #[error("route {route} visits waypoint {node}, but the problem has {num_nodes} nodes")]
    NodeOutOfRange {
        route: usize,
        node: usize,
        num_nodes: usize,
    },

    #[error("waypoint {node} is visited more than once")]
    DuplicateNode { node: usize },

    #[error("waypoint {node} is not visited by any route")]
    MissingNode { node: usize },
}

/// A waypoint that cannot be served because no path connects it with the depot.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("waypoint {node} is unreachable from the depot")]
pub struct InfeasibleError {
    pub node: usize,
}

/// Crate-level error.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Infeasible(#[from] InfeasibleError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
}
