//! Solution type and coverage validation.

use super::problem::DEPOT;
use super::{ProblemModel, Route};
use crate::error::ValidationError;
use crate::evaluation::{route_cost, ArcCost};

/// A complete assignment of waypoints to vehicle routes.
///
/// A valid solution for a [`ProblemModel`] holds exactly one route per
/// vehicle and visits every waypoint exactly once; see [`Solution::validate`].
///
/// # Examples
///
/// ```
/// use u_tour::models::Solution;
///
/// let sol = Solution::from_tours(vec![vec![0, 2, 1, 0], vec![0, 0]]).unwrap();
/// assert_eq!(sol.num_routes(), 2);
/// assert_eq!(sol.num_served(), 2);
/// assert_eq!(sol.tours(), vec![vec![0, 2, 1, 0], vec![0, 0]]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Solution {
    routes: Vec<Route>,
}

impl Solution {
    /// Creates a solution without routes.
    pub fn new() -> Self {
        Self { routes: Vec::new() }
    }

    pub fn with_routes(routes: Vec<Route>) -> Self {
        Self { routes }
    }

    /// Builds a solution from depot-anchored tours such as `[0, 3, 1, 0]`.
    ///
    /// Only checks that every tour starts and ends at the depot and does not
    /// pass through it in between. Coverage against a problem is checked by
    /// [`Solution::validate`].
    pub fn from_tours(tours: Vec<Vec<usize>>) -> Result<Self, ValidationError> {
        let mut routes = Vec::with_capacity(tours.len());
        for (route, tour) in tours.into_iter().enumerate() {
            let anchored = tour.len() >= 2
                && tour.first() == Some(&DEPOT)
                && tour.last() == Some(&DEPOT);
            if !anchored {
                return Err(ValidationError::RouteNotAnchored { route });
            }
            let inner = &tour[1..tour.len() - 1];
            if inner.contains(&DEPOT) {
                return Err(ValidationError::DepotInsideRoute { route });
            }
            routes.push(Route::with_waypoints(route, inner.to_vec()));
        }
        Ok(Self { routes })
    }

    /// Adds a route to this solution.
    pub fn add_route(&mut self, route: Route) {
        self.routes.push(route);
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub(crate) fn routes_mut(&mut self) -> &mut [Route] {
        &mut self.routes
    }

    /// Number of routes, used or not.
    pub fn num_routes(&self) -> usize {
        self.routes.len()
    }

    /// Total number of waypoints served across all routes.
    pub fn num_served(&self) -> usize {
        self.routes.iter().map(Route::len).sum()
    }

    /// Depot-anchored tours, one per route.
    pub fn tours(&self) -> Vec<Vec<usize>> {
        self.routes.iter().map(Route::tour).collect()
    }

    /// Sum of arc costs over all routes.
    pub fn cost<C: ArcCost + ?Sized>(&self, costs: &C) -> f64 {
        self.routes
            .iter()
            .map(|r| route_cost(r.waypoints(), costs))
            .sum()
    }

    /// Checks that this solution has one route per vehicle and visits every
    /// waypoint of `problem` exactly once.
    pub fn validate(&self, problem: &ProblemModel) -> Result<(), ValidationError> {
        if self.routes.len() != problem.num_vehicles() {
            return Err(ValidationError::RouteCountMismatch {
                expected: problem.num_vehicles(),
                found: self.routes.len(),
            });
        }

        let num_nodes = problem.num_nodes();
        let mut seen = vec![false; num_nodes];
        for (route_idx, route) in self.routes.iter().enumerate() {
            for &node in route.waypoints() {
                if node == DEPOT {
                    return Err(ValidationError::DepotInsideRoute { route: route_idx });
                }
                if node >= num_nodes {
                    return Err(ValidationError::NodeOutOfRange {
                        route: route_idx,
                        node,
                        num_nodes,
                    });
                }
                if seen[node] {
                    return Err(ValidationError::DuplicateNode { node });
                }
                seen[node] = true;
            }
        }

        match (1..num_nodes).find(|&node| !seen[node]) {
            Some(node) => Err(ValidationError::MissingNode { node }),
            None => Ok(()),
        }
    }
}
