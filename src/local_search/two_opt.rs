//! Intra-route 2-opt.
//!
//! # Algorithm
//!
//! For a segment of waypoints at tour positions `a..=b`, reversing it
//! replaces the arcs `prev → r[a]` and `r[b] → next` with `prev → r[b]` and
//! `r[a] → next`, and flips the direction of every arc inside the segment:
//!
//! ```text
//! delta = d(prev, r[b]) + rev(a..=b) + d(r[a], next)
//!       - d(prev, r[a]) - fwd(a..=b) - d(r[b], next)
//! ```
//!
//! `fwd` and `rev` come from a [`RouteProfile`], so asymmetric costs are
//! priced exactly in O(1) per candidate.
//!
//! # Complexity
//!
//! O(n²) per scan.
//!
//! # Reference
//!
//! Croes, G.A. (1958). "A method for solving traveling salesman problems",
//! *Operations Research* 6(6), 791-812.

use super::moves::{Move, ScoredMove};
use super::IMPROVEMENT_EPS;
use crate::evaluation::{ArcCost, RouteProfile};
use crate::models::Solution;

/// Returns the first segment reversal in `route` that lowers its cost.
///
/// Candidates are scanned by segment start, then segment end, both ascending.
pub fn first_improving_two_opt<C: ArcCost + ?Sized>(
    solution: &Solution,
    route: usize,
    costs: &C,
) -> Option<ScoredMove> {
    let r = &solution.routes()[route];
    let n = r.len();
    if n < 2 {
        return None;
    }
    let profile = RouteProfile::new(r.waypoints(), costs);

    for from in 0..n - 1 {
        // tour position of waypoint `from`
        let a = from + 1;
        let prev = r.node_at(a - 1);
        let first = r.node_at(a);
        for to in from + 1..n {
            let b = to + 1;
            let last = r.node_at(b);
            let next = r.node_at(b + 1);

            let old = costs.arc(prev, first) + profile.forward(a, b) + costs.arc(last, next);
            let new = costs.arc(prev, last) + profile.backward(a, b) + costs.arc(first, next);
            let delta = new - old;

            if delta < -IMPROVEMENT_EPS {
                return Some(ScoredMove {
                    mv: Move::TwoOpt { route, from, to },
                    delta,
                });
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluation::route_cost;
    use crate::models::ProblemModel;

    fn square() -> ProblemModel {
        // unit square corners: depot (0,0), 1 (0,1), 2 (1,1), 3 (1,0)
        let d = 2f64.sqrt();
        ProblemModel::from_rows(
            vec![
                vec![0.0, 1.0, d, 1.0],
                vec![1.0, 0.0, 1.0, d],
                vec![d, 1.0, 0.0, 1.0],
                vec![1.0, d, 1.0, 0.0],
            ],
            1,
        )
        .expect("valid")
    }

    #[test]
    fn test_two_opt_removes_crossing() {
        let p = square();
        let mut sol = Solution::from_tours(vec![vec![0, 2, 1, 3, 0]]).expect("anchored");
        let before = sol.cost(&p);

        let found = first_improving_two_opt(&sol, 0, &p).expect("crossing tour improves");
        found.mv.apply(&mut sol);
        let after = sol.cost(&p);

        assert!((before + found.delta - after).abs() < 1e-9);
        assert!((after - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_two_opt_already_optimal() {
        let p = square();
        let sol = Solution::from_tours(vec![vec![0, 1, 2, 3, 0]]).expect("anchored");
        assert_eq!(first_improving_two_opt(&sol, 0, &p), None);
    }

    #[test]
    fn test_two_opt_short_routes() {
        let p = square();
        let sol = Solution::from_tours(vec![vec![0, 2, 0]]).expect("anchored");
        assert_eq!(first_improving_two_opt(&sol, 0, &p), None);
    }

    #[test]
    fn test_two_opt_delta_exact_on_asymmetric() {
        let p = ProblemModel::from_rows(
            vec![
                vec![0.0, 1.0, 9.0, 9.0],
                vec![9.0, 0.0, 1.0, 9.0],
                vec![9.0, 9.0, 0.0, 1.0],
                vec![1.0, 9.0, 9.0, 0.0],
            ],
            1,
        )
        .expect("valid");
        let mut sol = Solution::from_tours(vec![vec![0, 3, 2, 1, 0]]).expect("anchored");
        let before = route_cost(sol.routes()[0].waypoints(), &p);

        let found = first_improving_two_opt(&sol, 0, &p).expect("reversal helps");
        found.mv.apply(&mut sol);
        let after = route_cost(sol.routes()[0].waypoints(), &p);
        assert!((before + found.delta - after).abs() < 1e-9);
        // [3, 2] reversed: 0→2→3→1→0
        assert_eq!(sol.tours(), vec![vec![0, 2, 3, 1, 0]]);
        assert_eq!(after, 28.0);
    }
}
