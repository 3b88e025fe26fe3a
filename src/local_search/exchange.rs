//! Inter-route waypoint exchange.
//!
//! # Algorithm
//!
//! Swaps waypoint `u` of route A with waypoint `v` of route B. Each route
//! keeps its neighbors around the swapped position:
//!
//! ```text
//! delta = d(pa, v) + d(v, na) - d(pa, u) - d(u, na)
//!       + d(pb, u) + d(u, nb) - d(pb, v) - d(v, nb)
//! ```
//!
//! # Complexity
//!
//! O(n·m) per route pair.

use super::moves::{Move, ScoredMove};
use super::IMPROVEMENT_EPS;
use crate::evaluation::ArcCost;
use crate::models::Solution;

/// Returns the first improving swap between `route_a` and `route_b`.
///
/// Candidates are scanned by position in `route_a`, then in `route_b`.
pub fn first_improving_exchange<C: ArcCost + ?Sized>(
    solution: &Solution,
    route_a: usize,
    route_b: usize,
    costs: &C,
) -> Option<ScoredMove> {
    debug_assert_ne!(route_a, route_b);
    let a = &solution.routes()[route_a];
    let b = &solution.routes()[route_b];

    for pos_a in 0..a.len() {
        let u = a.waypoints()[pos_a];
        let (pa, na) = (a.node_at(pos_a), a.node_at(pos_a + 2));
        let out_a = costs.arc(pa, u) + costs.arc(u, na);

        for pos_b in 0..b.len() {
            let v = b.waypoints()[pos_b];
            let (pb, nb) = (b.node_at(pos_b), b.node_at(pos_b + 2));

            let delta = costs.arc(pa, v) + costs.arc(v, na) - out_a + costs.arc(pb, u)
                + costs.arc(u, nb)
                - costs.arc(pb, v)
                - costs.arc(v, nb);

            if delta < -IMPROVEMENT_EPS {
                return Some(ScoredMove {
                    mv: Move::Exchange {
                        route_a,
                        pos_a,
                        route_b,
                        pos_b,
                    },
                    delta,
                });
            }
        }
    }
    None
}
