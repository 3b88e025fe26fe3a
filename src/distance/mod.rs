//! Travel-cost matrices.
//!
//! Provides the dense matrix the engine reads all arc costs from.

mod matrix;

pub use matrix::DistanceMatrix;
