//! Arc penalties for guided local search.
//!
//! Each arc `(i, j)` carries a counter that grows every time the arc is part
//! of a local optimum with maximum utility. Moves are then scored under the
//! augmented cost `d(i, j) + lambda * penalty(i, j)`.

use crate::error::ValidationError;
use crate::evaluation::ArcCost;
use crate::models::ProblemModel;

/// Rejects penalty factors that would leave λ at zero or non-finite.
pub(crate) fn check_penalty_factor(factor: f64) -> Result<(), ValidationError> {
    if !factor.is_finite() || factor <= 0.0 {
        return Err(ValidationError::InvalidPenaltyFactor(factor));
    }
    Ok(())
}

/// Dense per-arc penalty counters, row-major like the distance matrix.
///
/// Increments saturate instead of overflowing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PenaltyMatrix {
    data: Vec<u32>,
    size: usize,
}

impl PenaltyMatrix {
    /// Creates an all-zero penalty matrix for `size` nodes.
    pub fn new(size: usize) -> Self {
        Self {
            data: vec![0; size * size],
            size,
        }
    }

    #[inline]
    pub fn get(&self, from: usize, to: usize) -> u32 {
        self.data[from * self.size + to]
    }

    /// Raises the penalty of arc `from → to` by one.
    pub fn increment(&mut self, from: usize, to: usize) {
        let cell = &mut self.data[from * self.size + to];
        *cell = cell.saturating_add(1);
    }

    /// Sum of all counters.
    pub fn total(&self) -> u64 {
        self.data.iter().map(|&p| u64::from(p)).sum()
    }
}

/// Distance plus scaled penalty.
#[derive(Debug, Clone, Copy)]
pub struct AugmentedCost<'a> {
    problem: &'a ProblemModel,
    penalties: &'a PenaltyMatrix,
    lambda: f64,
}

impl<'a> AugmentedCost<'a> {
    pub fn new(problem: &'a ProblemModel, penalties: &'a PenaltyMatrix, lambda: f64) -> Self {
        Self {
            problem,
            penalties,
            lambda,
        }
    }
}

impl ArcCost for AugmentedCost<'_> {
    #[inline]
    fn arc(&self, from: usize, to: usize) -> f64 {
        let base = self.problem.distance(from, to);
        if self.lambda == 0.0 {
            return base;
        }
        base + self.lambda * f64::from(self.penalties.get(from, to))
    }
}

/// GLS utility of an arc: its cost discounted by how often it was penalized.
#[inline]
pub fn utility(distance: f64, penalty: u32) -> f64 {
    distance / (1.0 + f64::from(penalty))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn problem() -> ProblemModel {
        ProblemModel::from_rows(
            vec![
                vec![0.0, 2.0, 3.0],
                vec![2.0, 0.0, 4.0],
                vec![3.0, 4.0, 0.0],
            ],
            1,
        )
        .expect("valid")
    }

    #[test]
    fn test_penalty_starts_at_zero() {
        let pm = PenaltyMatrix::new(3);
        assert_eq!(pm.get(1, 2), 0);
        assert_eq!(pm.total(), 0);
    }

    #[test]
    fn test_increment_is_directed() {
        let mut pm = PenaltyMatrix::new(3);
        pm.increment(1, 2);
        pm.increment(1, 2);
        assert_eq!(pm.get(1, 2), 2);
        assert_eq!(pm.get(2, 1), 0);
        assert_eq!(pm.total(), 2);
    }

    #[test]
    fn test_augmented_cost() {
        let p = problem();
        let mut pm = PenaltyMatrix::new(3);
        pm.increment(0, 2);
        let costs = AugmentedCost::new(&p, &pm, 0.5);
        assert_eq!(costs.arc(0, 2), 3.5);
        assert_eq!(costs.arc(2, 0), 3.0);

        let plain = AugmentedCost::new(&p, &pm, 0.0);
        assert_eq!(plain.arc(0, 2), 3.0);
    }

    #[test]
    fn test_utility_decays_with_penalty() {
        assert_eq!(utility(6.0, 0), 6.0);
        assert_eq!(utility(6.0, 2), 2.0);
    }
}
