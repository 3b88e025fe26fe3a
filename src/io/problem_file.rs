//! JSON problem files.
//!
//! ```json
//! { "matrix": [[0, 3, null], [3, 0, 2], [null, 2, 0]], "num_vehicles": 2 }
//! ```
//!
//! `null` marks a pair of waypoints without a direct arc.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::distance::DistanceMatrix;
use crate::error::{Error, ValidationError};
use crate::models::ProblemModel;

/// On-disk form of a problem instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProblemFile {
    pub matrix: Vec<Vec<Option<f64>>>,
    pub num_vehicles: i64,
}

impl ProblemFile {
    /// Wraps a dense matrix; infinite entries are written as `null`.
    pub fn new(matrix: &DistanceMatrix, num_vehicles: usize) -> Self {
        let matrix = matrix
            .rows()
            .map(|row| {
                row.iter()
                    .map(|&d| if d.is_infinite() { None } else { Some(d) })
                    .collect()
            })
            .collect();
        Self {
            matrix,
            num_vehicles: num_vehicles as i64,
        }
    }

    /// Validates this file into a [`ProblemModel`].
    pub fn into_problem(self) -> Result<ProblemModel, Error> {
        let num_vehicles = usize::try_from(self.num_vehicles)
            .ok()
            .filter(|&k| k > 0)
            .ok_or(ValidationError::InvalidFleetSize(self.num_vehicles))?;
        let rows = self
            .matrix
            .into_iter()
            .map(|row| row.into_iter().map(|d| d.unwrap_or(f64::INFINITY)).collect())
            .collect();
        ProblemModel::from_rows(rows, num_vehicles)
    }

    /// Writes this file as pretty-printed JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), Error> {
        let mut writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.flush()?;
        Ok(())
    }
}

/// Loads and validates a problem from a JSON file.
#[instrument(skip_all, level = "debug")]
pub fn load_problem(path: impl AsRef<Path>) -> Result<ProblemModel, Error> {
    let path = path.as_ref();
    let file: ProblemFile = serde_json::from_reader(BufReader::new(File::open(path)?))?;
    debug!(path = %path.display(), nodes = file.matrix.len(), "loaded problem file");
    file.into_problem()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_with_missing_arcs() {
        let json = r#"{ "matrix": [[0, 3, null], [3, 0, 2], [null, 2, 0]], "num_vehicles": 2 }"#;
        let file: ProblemFile = serde_json::from_str(json).expect("parses");
        let problem = file.into_problem().expect("valid");
        assert_eq!(problem.num_vehicles(), 2);
        assert_eq!(problem.distance(0, 2), 5.0);
    }

    #[test]
    fn test_non_positive_fleet_rejected() {
        for k in [0, -3] {
            let file = ProblemFile {
                matrix: vec![vec![Some(0.0)]],
                num_vehicles: k,
            };
            let err = file.into_problem().unwrap_err();
            assert!(matches!(
                err,
                Error::Validation(ValidationError::InvalidFleetSize(v)) if v == k
            ));
        }
    }

    #[test]
    fn test_new_writes_null_for_missing_arcs() {
        let dm = DistanceMatrix::from_rows(vec![vec![0.0, f64::INFINITY], vec![1.0, 0.0]])
            .expect("square");
        let file = ProblemFile::new(&dm, 1);
        assert_eq!(file.matrix, vec![vec![Some(0.0), None], vec![Some(1.0), Some(0.0)]]);
        assert_eq!(file.num_vehicles, 1);
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let err = load_problem("/nonexistent/problem.json").unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
