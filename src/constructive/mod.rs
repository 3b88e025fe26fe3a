//! Constructive heuristics for building initial solutions.
//!
//! - [`nearest_neighbor`] — Fair-share greedy nearest-neighbor, O(n²)

mod nearest_neighbor;

pub use nearest_neighbor::nearest_neighbor;
