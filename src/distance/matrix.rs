//! Dense travel-cost matrix.

use crate::error::ValidationError;

/// A dense n×n travel-cost matrix stored in row-major order.
///
/// Index 0 is the depot. An entry of `f64::INFINITY` marks a pair of
/// waypoints without a direct arc; [`DistanceMatrix::fill_missing_arcs`]
/// replaces such entries by shortest-path costs.
///
/// # Examples
///
/// ```
/// use u_tour::distance::DistanceMatrix;
///
/// let dm = DistanceMatrix::from_rows(vec![
///     vec![0.0, 5.0, 8.0],
///     vec![5.0, 0.0, 4.0],
///     vec![8.0, 4.0, 0.0],
/// ])
/// .unwrap();
/// assert_eq!(dm.get(0, 1), 5.0);
/// assert_eq!(dm.size(), 3);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    data: Vec<f64>,
    size: usize,
}

impl DistanceMatrix {
    /// Creates a matrix of the given size, initialized to zero.
    pub fn new(size: usize) -> Self {
        Self {
            data: vec![0.0; size * size],
            size,
        }
    }

    /// Creates a matrix from row-major data of length `size * size`.
    pub fn from_data(size: usize, data: Vec<f64>) -> Result<Self, ValidationError> {
        if data.len() != size * size {
            return Err(ValidationError::DataLength {
                len: data.len(),
                size,
            });
        }
        Ok(Self { data, size })
    }

    /// Creates a matrix from nested rows, rejecting ragged input.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, ValidationError> {
        let size = rows.len();
        let mut data = Vec::with_capacity(size * size);
        for (row, values) in rows.into_iter().enumerate() {
            if values.len() != size {
                return Err(ValidationError::NotSquare {
                    row,
                    len: values.len(),
                    expected: size,
                });
            }
            data.extend(values);
        }
        Ok(Self { data, size })
    }

    /// Returns the cost of travelling from `from` to `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    #[inline]
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.size + to]
    }

    /// Sets the cost of travelling from `from` to `to`.
    pub fn set(&mut self, from: usize, to: usize, distance: f64) {
        self.data[from * self.size + to] = distance;
    }

    /// Number of locations in this matrix.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Iterates over rows.
    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        // `max(1)` keeps `chunks` happy on the empty matrix.
        self.data.chunks(self.size.max(1))
    }

    /// Returns `true` if the matrix is symmetric within the given tolerance.
    pub fn is_symmetric(&self, tol: f64) -> bool {
        for i in 0..self.size {
            for j in (i + 1)..self.size {
                let (a, b) = (self.get(i, j), self.get(j, i));
                if a == b {
                    continue;
                }
                if (a - b).abs() > tol {
                    return false;
                }
            }
        }
        true
    }

    /// Returns `true` if some pair of distinct locations has no direct arc.
    pub fn has_missing_arcs(&self) -> bool {
        self.data.iter().any(|d| d.is_infinite())
    }

    /// Replaces every missing arc by the cheapest path cost through direct arcs.
    ///
    /// Finite entries keep their input cost, even where a cheaper detour
    /// exists. Entries that stay infinite have no connecting path at all.
    pub fn fill_missing_arcs(&mut self) {
        let mut closed = self.clone();
        closed.metric_closure();
        for (cell, &shortest) in self.data.iter_mut().zip(&closed.data) {
            if cell.is_infinite() {
                *cell = shortest;
            }
        }
    }

    /// Replaces every entry by the cheapest path cost through direct arcs.
    ///
    /// Entries that stay infinite afterwards have no connecting path at all.
    pub fn metric_closure(&mut self) {
        let n = self.size;
        for k in 0..n {
            for i in 0..n {
                let ik = self.get(i, k);
                if ik.is_infinite() {
                    continue;
                }
                for j in 0..n {
                    let via = ik + self.get(k, j);
                    if via < self.get(i, j) {
                        self.set(i, j, via);
                    }
                }
            }
        }
    }

    /// Returns the nearest neighbor of `from` among the given candidates.
    ///
    /// Ties go to the lowest index. Returns `None` if `candidates` is empty.
    pub fn nearest_neighbor(&self, from: usize, candidates: &[usize]) -> Option<usize> {
        candidates
            .iter()
            .copied()
            .min_by(|&a, &b| {
                self.get(from, a)
                    .total_cmp(&self.get(from, b))
                    .then(a.cmp(&b))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> DistanceMatrix {
        DistanceMatrix::from_rows(vec![
            vec![0.0, 5.0, 8.0],
            vec![5.0, 0.0, 4.0],
            vec![8.0, 4.0, 0.0],
        ])
        .expect("valid")
    }

    #[test]
    fn test_from_rows() {
        let dm = sample();
        assert_eq!(dm.size(), 3);
        assert_eq!(dm.get(0, 2), 8.0);
        assert_eq!(dm.get(2, 1), 4.0);
    }

    #[test]
    fn test_from_rows_ragged() {
        let err = DistanceMatrix::from_rows(vec![vec![0.0, 1.0], vec![1.0]]).unwrap_err();
        assert_eq!(
            err,
            ValidationError::NotSquare {
                row: 1,
                len: 1,
                expected: 2
            }
        );
    }

    #[test]
    fn test_from_data_invalid_size() {
        assert!(DistanceMatrix::from_data(2, vec![0.0, 1.0, 2.0]).is_err());
    }

    #[test]
    fn test_symmetric() {
        assert!(sample().is_symmetric(1e-10));
        let mut dm = DistanceMatrix::new(2);
        dm.set(0, 1, 10.0);
        dm.set(1, 0, 15.0);
        assert!(!dm.is_symmetric(1e-10));
    }

    #[test]
    fn test_nearest_neighbor_breaks_ties_by_index() {
        let dm = DistanceMatrix::from_rows(vec![
            vec![0.0, 3.0, 2.0, 2.0],
            vec![3.0, 0.0, 1.0, 1.0],
            vec![2.0, 1.0, 0.0, 1.0],
            vec![2.0, 1.0, 1.0, 0.0],
        ])
        .expect("valid");
        assert_eq!(dm.nearest_neighbor(0, &[3, 2, 1]), Some(2));
        assert_eq!(dm.nearest_neighbor(0, &[1]), Some(1));
        assert_eq!(dm.nearest_neighbor(0, &[]), None);
    }

    #[test]
    fn test_metric_closure_fills_missing_arcs() {
        let inf = f64::INFINITY;
        let mut dm = DistanceMatrix::from_rows(vec![
            vec![0.0, 2.0, inf],
            vec![2.0, 0.0, 3.0],
            vec![inf, 3.0, 0.0],
        ])
        .expect("valid");
        assert!(dm.has_missing_arcs());
        dm.metric_closure();
        assert!(!dm.has_missing_arcs());
        assert_eq!(dm.get(0, 2), 5.0);
        assert_eq!(dm.get(2, 0), 5.0);
    }

    #[test]
    fn test_metric_closure_keeps_disconnected() {
        let inf = f64::INFINITY;
        let mut dm =
            DistanceMatrix::from_rows(vec![vec![0.0, inf], vec![inf, 0.0]]).expect("valid");
        dm.metric_closure();
        assert!(dm.get(0, 1).is_infinite());
    }

    #[test]
    fn test_fill_missing_arcs_keeps_direct_costs() {
        let inf = f64::INFINITY;
        // 0→1 costs more than the detour through 2
        let mut dm = DistanceMatrix::from_rows(vec![
            vec![0.0, 10.0, 1.0, 4.0],
            vec![1.0, 0.0, 1.0, inf],
            vec![1.0, 1.0, 0.0, 1.0],
            vec![4.0, 4.0, 1.0, 0.0],
        ])
        .expect("valid");
        dm.fill_missing_arcs();
        assert!(!dm.has_missing_arcs());
        assert_eq!(dm.get(0, 1), 10.0);
        assert_eq!(dm.get(0, 3), 4.0);
        assert_eq!(dm.get(1, 3), 2.0);
    }
}
