//! Inter-route waypoint relocation.
//!
//! # Algorithm
//!
//! Tries moving each waypoint of one route into every gap of another route,
//! accepting the first move that lowers the total cost. Moving the last
//! waypoint out of a route leaves the vehicle at the depot.
//!
//! # Complexity
//!
//! O(n·m) per route pair.

use super::moves::{Move, ScoredMove};
use super::IMPROVEMENT_EPS;
use crate::evaluation::ArcCost;
use crate::models::Solution;

/// Returns the first improving relocation from `from_route` into `to_route`.
///
/// Candidates are scanned by source position, then insertion gap.
pub fn first_improving_relocate<C: ArcCost + ?Sized>(
    solution: &Solution,
    from_route: usize,
    to_route: usize,
    costs: &C,
) -> Option<ScoredMove> {
    debug_assert_ne!(from_route, to_route);
    let source = &solution.routes()[from_route];
    let target = &solution.routes()[to_route];

    for pos in 0..source.len() {
        let waypoint = source.waypoints()[pos];
        let prev = source.node_at(pos);
        let next = source.node_at(pos + 2);
        let removal = costs.arc(prev, next) - costs.arc(prev, waypoint) - costs.arc(waypoint, next);

        for insert_at in 0..=target.len() {
            let p = target.node_at(insert_at);
            let q = target.node_at(insert_at + 1);
            let insertion = costs.arc(p, waypoint) + costs.arc(waypoint, q) - costs.arc(p, q);
            let delta = removal + insertion;

            if delta < -IMPROVEMENT_EPS {
                return Some(ScoredMove {
                    mv: Move::Relocate {
                        from_route,
                        pos,
                        to_route,
                        insert_at,
                    },
                    delta,
                });
            }
        }
    }
    None
}
