//! Or-opt segment relocation.
//!
//! # Algorithm
//!
//! Moves a segment of consecutive waypoints, keeping its orientation, to
//! another gap. Removing the segment `s` from between `prev` and `next`
//! saves
//!
//! ```text
//! gain = d(prev, s.first) + d(s.last, next) - d(prev, next)
//! ```
//!
//! and inserting it between `p` and `q` costs
//!
//! ```text
//! cost = d(p, s.first) + d(s.last, q) - d(p, q)
//! ```
//!
//! Within one route, segments of 1–3 waypoints are tried. Across routes only
//! segments of 2–3 waypoints are tried; single waypoints are the job of the
//! relocate operator.
//!
//! # Complexity
//!
//! O(n·m) per route pair and segment length.
//!
//! # Reference
//!
//! Or, I. (1976). "Traveling Salesman-Type Combinatorial Problems and Their
//! Relation to the Logistics of Blood Banking". PhD thesis.

use super::moves::{Move, ScoredMove};
use super::IMPROVEMENT_EPS;
use crate::evaluation::ArcCost;
use crate::models::{Route, Solution, DEPOT};

/// Longest segment moved as a unit.
pub const MAX_SEGMENT_LEN: usize = 3;

/// Returns the first improving Or-opt move from `from_route` into `to_route`.
///
/// `from_route == to_route` scans intra-route moves. Candidates are scanned
/// by segment length, then segment start, then insertion gap.
pub fn first_improving_or_opt<C: ArcCost + ?Sized>(
    solution: &Solution,
    from_route: usize,
    to_route: usize,
    costs: &C,
) -> Option<ScoredMove> {
    let source = &solution.routes()[from_route];
    let min_len = if from_route == to_route { 1 } else { 2 };

    for len in min_len..=MAX_SEGMENT_LEN.min(source.len()) {
        for start in 0..=source.len() - len {
            let first = source.waypoints()[start];
            let last = source.waypoints()[start + len - 1];
            let prev = source.node_at(start);
            let next = source.node_at(start + len + 1);
            let gain = costs.arc(prev, first) + costs.arc(last, next) - costs.arc(prev, next);

            let found = if from_route == to_route {
                scan_same_route(source, start, len, first, last, gain, costs)
            } else {
                scan_other_route(&solution.routes()[to_route], first, last, gain, costs)
            };

            if let Some((insert_at, delta)) = found {
                return Some(ScoredMove {
                    mv: Move::OrOpt {
                        from_route,
                        start,
                        len,
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

/// Gaps are counted in the route with the segment already removed.
fn scan_same_route<C: ArcCost + ?Sized>(
    route: &Route,
    start: usize,
    len: usize,
    first: usize,
    last: usize,
    gain: f64,
    costs: &C,
) -> Option<(usize, f64)> {
    let remaining = route.len() - len;
    // waypoint `k` of the route with the segment cut out
    let kept = |k: usize| {
        if k < start {
            route.waypoints()[k]
        } else {
            route.waypoints()[k + len]
        }
    };

    for insert_at in 0..=remaining {
        if insert_at == start {
            continue;
        }
        let p = if insert_at == 0 {
            DEPOT
        } else {
            kept(insert_at - 1)
        };
        let q = if insert_at == remaining {
            DEPOT
        } else {
            kept(insert_at)
        };
        let delta = costs.arc(p, first) + costs.arc(last, q) - costs.arc(p, q) - gain;
        if delta < -IMPROVEMENT_EPS {
            return Some((insert_at, delta));
        }
    }
    None
}

fn scan_other_route<C: ArcCost + ?Sized>(
    target: &Route,
    first: usize,
    last: usize,
    gain: f64,
    costs: &C,
) -> Option<(usize, f64)> {
    for insert_at in 0..=target.len() {
        let p = target.node_at(insert_at);
        let q = target.node_at(insert_at + 1);
        let delta = costs.arc(p, first) + costs.arc(last, q) - costs.arc(p, q) - gain;
        if delta < -IMPROVEMENT_EPS {
            return Some((insert_at, delta));
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ProblemModel;

    /// Depot and waypoints on a line at x = 0..n.
    fn line(n: usize) -> ProblemModel {
        let rows = (0..n)
            .map(|i| (0..n).map(|j| (i as f64 - j as f64).abs()).collect())
            .collect();
        ProblemModel::from_rows(rows, 2).expect("valid")
    }

    fn check_delta(p: &ProblemModel, sol: &Solution, found: ScoredMove) {
        let mut after = sol.clone();
        found.mv.apply(&mut after);
        assert!((sol.cost(p) + found.delta - after.cost(p)).abs() < 1e-9);
        assert_eq!(after.validate(p), Ok(()));
    }

    #[test]
    fn test_or_opt_intra_moves_single_waypoint() {
        let p = line(5);
        // 0→2→3→1→4→0: waypoint 1 is out of place
        let sol = Solution::from_tours(vec![vec![0, 2, 3, 1, 4, 0], vec![0, 0]]).expect("anchored");
        let found = first_improving_or_opt(&sol, 0, 0, &p).expect("improves");
        assert!(found.delta < 0.0);
        check_delta(&p, &sol, found);
    }

    #[test]
    fn test_or_opt_intra_segment_keeps_orientation() {
        let p = line(6);
        // segment [3, 4] sits before [1, 2]
        let sol = Solution::from_tours(vec![vec![0, 3, 4, 1, 2, 5, 0], vec![0, 0]]).expect("anchored");
        let found = first_improving_or_opt(&sol, 0, 0, &p).expect("improves");
        check_delta(&p, &sol, found);
    }

    #[test]
    fn test_or_opt_inter_requires_two_waypoints() {
        let p = line(4);
        let sol = Solution::from_tours(vec![vec![0, 1, 2, 0], vec![0, 3, 0]]).expect("anchored");
        // single waypoint in route 1 is never moved by Or-opt across routes
        assert_eq!(first_improving_or_opt(&sol, 1, 0, &p), None);
    }

    #[test]
    fn test_or_opt_inter_merges_segment() {
        let p = line(6);
        // two out-and-back trips to the far end: merging them saves distance
        let sol = Solution::from_tours(vec![vec![0, 1, 2, 5, 0], vec![0, 3, 4, 0]]).expect("anchored");
        let found = first_improving_or_opt(&sol, 1, 0, &p).expect("improves");
        assert!(matches!(found.mv, Move::OrOpt { len: 2, to_route: 0, .. }));
        check_delta(&p, &sol, found);
    }

    #[test]
    fn test_or_opt_no_move_on_optimal_line() {
        let p = line(5);
        let sol = Solution::from_tours(vec![vec![0, 1, 2, 3, 4, 0], vec![0, 0]]).expect("anchored");
        assert_eq!(first_improving_or_opt(&sol, 0, 0, &p), None);
    }
}
