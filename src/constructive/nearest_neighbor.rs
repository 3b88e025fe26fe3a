//! Fair-share nearest-neighbor construction.
//!
//! Builds routes greedily, one vehicle at a time: starting from the depot,
//! always append the unassigned waypoint closest to the route's last node.
//! Each vehicle takes its fair share of the waypoints before the next
//! vehicle starts, so every vehicle leaves the depot when there is enough
//! work to go around.
//!
//! # Complexity
//!
//! O(n²) where n = number of waypoints.
//!
//! # Reference
//!
//! This is the path-cheapest-arc first-solution strategy. Quality is
//! typically well above optimal, but it is fast, deterministic, and always
//! covers every waypoint.

use tracing::{debug, instrument};

use crate::models::{ProblemModel, Route, Solution, DEPOT};

/// Constructs a solution using the fair-share nearest-neighbor heuristic.
///
/// With `m` waypoints and `k` vehicles, vehicle `v` receives
/// `m / k` waypoints, plus one if `v < m % k`. Ties in distance go to the
/// lowest waypoint index. Always returns exactly `k` routes.
///
/// # Examples
///
/// ```
/// use u_tour::models::ProblemModel;
/// use u_tour::constructive::nearest_neighbor;
///
/// let problem = ProblemModel::from_rows(
///     vec![
///         vec![0.0, 1.0, 4.0, 4.0],
///         vec![1.0, 0.0, 1.0, 4.0],
///         vec![4.0, 1.0, 0.0, 1.0],
///         vec![4.0, 4.0, 1.0, 0.0],
///     ],
///     1,
/// )
/// .unwrap();
///
/// let solution = nearest_neighbor(&problem);
/// assert_eq!(solution.tours(), vec![vec![0, 1, 2, 3, 0]]);
/// ```
#[instrument(skip_all, level = "debug")]
pub fn nearest_neighbor(problem: &ProblemModel) -> Solution {
    let num_vehicles = problem.num_vehicles();
    let num_waypoints = problem.num_waypoints();
    let base_share = num_waypoints / num_vehicles;
    let extra = num_waypoints % num_vehicles;

    let mut unassigned: Vec<usize> = (1..problem.num_nodes()).collect();
    let mut solution = Solution::new();

    for vehicle in 0..num_vehicles {
        let share = base_share + usize::from(vehicle < extra);
        let mut route = Route::new(vehicle);
        let mut current = DEPOT;

        while route.len() < share {
            // `unassigned` stays sorted, so the first minimum is the lowest index.
            let Some(best) = problem.matrix().nearest_neighbor(current, &unassigned) else {
                break;
            };
            if let Ok(pos) = unassigned.binary_search(&best) {
                unassigned.remove(pos);
            }
            route.push(best);
            current = best;
        }

        debug!(vehicle, waypoints = route.len(), "constructed route");
        solution.add_route(route);
    }

    solution
}
