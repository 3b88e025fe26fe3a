//! Validated routing problem instance.

use tracing::debug;

use crate::distance::DistanceMatrix;
use crate::error::{Error, InfeasibleError, ValidationError};

/// Index of the shared depot every route starts and ends at.
pub const DEPOT: usize = 0;

/// Immutable view of a travel-cost matrix and fleet size.
///
/// Construction validates the matrix (square, zero diagonal, no NaN or
/// negative costs), the fleet size, and that every waypoint is connected to
/// the depot in both directions. Missing arcs (`f64::INFINITY`) are replaced
/// by shortest-path costs, so every cost seen by the solver is finite. Arcs
/// present in the input keep their cost.
///
/// # Examples
///
/// ```
/// use u_tour::models::ProblemModel;
///
/// let problem = ProblemModel::from_rows(
///     vec![
///         vec![0.0, 1.0, 4.0],
///         vec![1.0, 0.0, 1.0],
///         vec![4.0, 1.0, 0.0],
///     ],
///     2,
/// )
/// .unwrap();
/// assert_eq!(problem.num_waypoints(), 2);
/// assert_eq!(problem.num_vehicles(), 2);
/// assert_eq!(problem.distance(0, 2), 4.0);
/// ```
#[derive(Debug, Clone)]
pub struct ProblemModel {
    distances: DistanceMatrix,
    num_vehicles: usize,
}

impl ProblemModel {
    /// Validates `distances` and `num_vehicles` into a problem instance.
    pub fn new(mut distances: DistanceMatrix, num_vehicles: usize) -> Result<Self, Error> {
        let n = distances.size();
        if n == 0 {
            return Err(ValidationError::EmptyMatrix.into());
        }
        if num_vehicles == 0 {
            return Err(ValidationError::InvalidFleetSize(0).into());
        }

        for from in 0..n {
            for to in 0..n {
                let value = distances.get(from, to);
                if value.is_nan() || value < 0.0 {
                    return Err(ValidationError::InvalidEntry { from, to, value }.into());
                }
                if from == to && value != 0.0 {
                    return Err(ValidationError::NonZeroDiagonal { node: from, value }.into());
                }
            }
        }

        if distances.has_missing_arcs() {
            debug!(nodes = n, "filling missing arcs with shortest paths");
            distances.fill_missing_arcs();
            if let Some(node) = (1..n).find(|&node| {
                distances.get(DEPOT, node).is_infinite() || distances.get(node, DEPOT).is_infinite()
            }) {
                return Err(InfeasibleError { node }.into());
            }
        }

        Ok(Self {
            distances,
            num_vehicles,
        })
    }

    /// Builds a problem from nested matrix rows.
    pub fn from_rows(rows: Vec<Vec<f64>>, num_vehicles: usize) -> Result<Self, Error> {
        Self::new(DistanceMatrix::from_rows(rows)?, num_vehicles)
    }

    /// Number of nodes including the depot.
    pub fn num_nodes(&self) -> usize {
        self.distances.size()
    }

    /// Number of waypoints to visit (excluding the depot).
    pub fn num_waypoints(&self) -> usize {
        self.distances.size() - 1
    }

    /// Fleet size.
    pub fn num_vehicles(&self) -> usize {
        self.num_vehicles
    }

    pub fn depot(&self) -> usize {
        DEPOT
    }

    /// Travel cost from `from` to `to`.
    #[inline]
    pub fn distance(&self, from: usize, to: usize) -> f64 {
        self.distances.get(from, to)
    }

    pub fn matrix(&self) -> &DistanceMatrix {
        &self.distances
    }

    /// Returns `true` if every arc costs the same in both directions.
    pub fn is_symmetric(&self) -> bool {
        self.distances.is_symmetric(1e-9)
    }
}
