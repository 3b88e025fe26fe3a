//! Neighborhood moves and their application.
//!
//! Positions index into a route's waypoints (depot excluded). Insertion
//! positions count gaps: `0` is right after the departing depot, `len` right
//! before the return.

use crate::models::Solution;

/// A candidate modification of a solution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Move {
    /// Reverse waypoints `from..=to` of `route`.
    TwoOpt { route: usize, from: usize, to: usize },
    /// Move `len` consecutive waypoints starting at `start` of `from_route`
    /// into gap `insert_at` of `to_route`.
    ///
    /// For an intra-route move the gap is counted after the segment has been
    /// removed.
    OrOpt {
        from_route: usize,
        start: usize,
        len: usize,
        to_route: usize,
        insert_at: usize,
    },
    /// Move one waypoint to gap `insert_at` of another route.
    Relocate {
        from_route: usize,
        pos: usize,
        to_route: usize,
        insert_at: usize,
    },
    /// Swap two waypoints between different routes.
    Exchange {
        route_a: usize,
        pos_a: usize,
        route_b: usize,
        pos_b: usize,
    },
}

impl Move {
    /// Applies this move to `solution`.
    ///
    /// The move must have been generated against the current state of
    /// `solution`; positions are not re-validated.
    pub fn apply(&self, solution: &mut Solution) {
        let routes = solution.routes_mut();
        match *self {
            Move::TwoOpt { route, from, to } => {
                routes[route].waypoints_mut()[from..=to].reverse();
            }
            Move::OrOpt {
                from_route,
                start,
                len,
                to_route,
                insert_at,
            } => {
                let segment: Vec<usize> = routes[from_route]
                    .waypoints_mut()
                    .drain(start..start + len)
                    .collect();
                routes[to_route]
                    .waypoints_mut()
                    .splice(insert_at..insert_at, segment);
            }
            Move::Relocate {
                from_route,
                pos,
                to_route,
                insert_at,
            } => {
                let waypoint = routes[from_route].waypoints_mut().remove(pos);
                routes[to_route].waypoints_mut().insert(insert_at, waypoint);
            }
            Move::Exchange {
                route_a,
                pos_a,
                route_b,
                pos_b,
            } => {
                let a = routes[route_a].waypoints()[pos_a];
                let b = routes[route_b].waypoints()[pos_b];
                routes[route_a].waypoints_mut()[pos_a] = b;
                routes[route_b].waypoints_mut()[pos_b] = a;
            }
        }
    }

    pub fn operator_name(&self) -> &'static str {
        match self {
            Move::TwoOpt { .. } => "two_opt",
            Move::OrOpt { .. } => "or_opt",
            Move::Relocate { .. } => "relocate",
            Move::Exchange { .. } => "exchange",
        }
    }
}

/// A move together with its cost change under the scoring cost model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredMove {
    pub mv: Move,
    pub delta: f64,
}
