//! Route type.

use super::problem::DEPOT;

/// An ordered sequence of waypoints flown by a single vehicle.
///
/// A route starts and ends at the depot; only the waypoints in between are
/// stored. An empty route is the trivial tour `[0, 0]` of an unused vehicle.
///
/// # Examples
///
/// ```
/// use u_tour::models::Route;
///
/// let mut route = Route::new(0);
/// assert_eq!(route.tour(), vec![0, 0]);
///
/// route.push(3);
/// route.push(1);
/// assert_eq!(route.len(), 2);
/// assert_eq!(route.tour(), vec![0, 3, 1, 0]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    vehicle_id: usize,
    waypoints: Vec<usize>,
}

impl Route {
    /// Creates an empty route for the given vehicle.
    pub fn new(vehicle_id: usize) -> Self {
        Self {
            vehicle_id,
            waypoints: Vec::new(),
        }
    }

    /// Creates a route visiting `waypoints` in order.
    pub fn with_waypoints(vehicle_id: usize, waypoints: Vec<usize>) -> Self {
        Self {
            vehicle_id,
            waypoints,
        }
    }

    /// Appends a waypoint before the return to the depot.
    pub fn push(&mut self, waypoint: usize) {
        self.waypoints.push(waypoint);
    }

    /// Returns the vehicle assigned to this route.
    pub fn vehicle_id(&self) -> usize {
        self.vehicle_id
    }

    /// Returns the visited waypoints, depot excluded.
    pub fn waypoints(&self) -> &[usize] {
        &self.waypoints
    }

    pub(crate) fn waypoints_mut(&mut self) -> &mut Vec<usize> {
        &mut self.waypoints
    }

    /// Number of waypoints (excluding depot).
    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    /// Returns `true` if the vehicle stays at the depot.
    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    /// Node at tour position `pos`, where position 0 and `len() + 1` are the depot.
    #[inline]
    pub fn node_at(&self, pos: usize) -> usize {
        if pos == 0 || pos > self.waypoints.len() {
            DEPOT
        } else {
            self.waypoints[pos - 1]
        }
    }

    /// Depot-anchored tour, e.g. `[0, 4, 2, 0]`.
    pub fn tour(&self) -> Vec<usize> {
        let mut tour = Vec::with_capacity(self.waypoints.len() + 2);
        tour.push(DEPOT);
        tour.extend_from_slice(&self.waypoints);
        tour.push(DEPOT);
        tour
    }

    /// Arcs travelled by this route. Empty routes travel none.
    pub fn arcs(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let n = if self.is_empty() {
            0
        } else {
            self.waypoints.len() + 1
        };
        (0..n).map(move |pos| (self.node_at(pos), self.node_at(pos + 1)))
    }
}
