//! Arc cost models and route costing.

use crate::distance::DistanceMatrix;
use crate::models::{ProblemModel, DEPOT};

/// Cost of travelling a single arc.
///
/// The base model is the travel-cost matrix itself; guided local search
/// layers penalties on top of it. Implementations are shared across scoring
/// threads and must therefore be `Sync`.
pub trait ArcCost: Sync {
    /// Cost of the arc `from → to`.
    fn arc(&self, from: usize, to: usize) -> f64;
}

impl ArcCost for DistanceMatrix {
    #[inline]
    fn arc(&self, from: usize, to: usize) -> f64 {
        self.get(from, to)
    }
}

impl ArcCost for ProblemModel {
    #[inline]
    fn arc(&self, from: usize, to: usize) -> f64 {
        self.distance(from, to)
    }
}

/// Cost of the tour `depot → waypoints[0] → … → waypoints[n-1] → depot`.
///
/// An empty route costs nothing.
///
/// # Examples
///
/// ```
/// use u_tour::models::ProblemModel;
/// use u_tour::evaluation::route_cost;
///
/// let problem = ProblemModel::from_rows(
///     vec![
///         vec![0.0, 1.0, 4.0],
///         vec![1.0, 0.0, 1.0],
///         vec![4.0, 1.0, 0.0],
///     ],
///     1,
/// )
/// .unwrap();
/// assert_eq!(route_cost(&[1, 2], &problem), 6.0);
/// assert_eq!(route_cost(&[], &problem), 0.0);
/// ```
pub fn route_cost<C: ArcCost + ?Sized>(waypoints: &[usize], costs: &C) -> f64 {
    let (Some(&first), Some(&last)) = (waypoints.first(), waypoints.last()) else {
        return 0.0;
    };
    let inner: f64 = waypoints.windows(2).map(|w| costs.arc(w[0], w[1])).sum();
    costs.arc(DEPOT, first) + inner + costs.arc(last, DEPOT)
}

/// Prefix sums of arc costs along a route, in both travel directions.
///
/// Positions follow [`crate::models::Route::node_at`]: 0 is the departing
/// depot, `len + 1` the returning depot. `forward(a, b)` is the cost of
/// travelling positions `a..=b` in order, `backward(a, b)` the cost of the
/// same stretch travelled in reverse. Lets 2-opt price segment reversal on
/// asymmetric matrices in constant time.
#[derive(Debug, Clone, Default)]
pub struct RouteProfile {
    forward: Vec<f64>,
    backward: Vec<f64>,
}

impl RouteProfile {
    pub fn new<C: ArcCost + ?Sized>(waypoints: &[usize], costs: &C) -> Self {
        let node = |pos: usize| {
            if pos == 0 || pos > waypoints.len() {
                DEPOT
            } else {
                waypoints[pos - 1]
            }
        };
        let positions = waypoints.len() + 2;
        let mut forward = Vec::with_capacity(positions);
        let mut backward = Vec::with_capacity(positions);
        forward.push(0.0);
        backward.push(0.0);
        for pos in 1..positions {
            let (a, b) = (node(pos - 1), node(pos));
            forward.push(forward[pos - 1] + costs.arc(a, b));
            backward.push(backward[pos - 1] + costs.arc(b, a));
        }
        Self { forward, backward }
    }

    /// Cost of positions `a..=b` travelled in order.
    #[inline]
    pub fn forward(&self, a: usize, b: usize) -> f64 {
        self.forward[b] - self.forward[a]
    }

    /// Cost of positions `a..=b` travelled from `b` back to `a`.
    #[inline]
    pub fn backward(&self, a: usize, b: usize) -> f64 {
        self.backward[b] - self.backward[a]
    }

    /// Cost of the whole route.
    pub fn total(&self) -> f64 {
        self.forward.last().copied().unwrap_or(0.0)
    }
}
