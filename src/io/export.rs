//! Route export and warm-start loading.
//!
//! Routes are stored as a JSON ragged array with one depot-anchored tour per
//! vehicle, e.g. `[[0, 3, 1, 0], [0, 0]]`. Downstream mission tools map the
//! indices back to coordinates.

use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::Error;
use crate::models::Solution;

/// Writes solutions to a fixed destination.
///
/// # Examples
///
/// ```
/// use u_tour::io::RouteExporter;
/// use u_tour::models::Solution;
///
/// let solution = Solution::from_tours(vec![vec![0, 2, 1, 0], vec![0, 0]]).unwrap();
/// let mut out = Vec::new();
/// RouteExporter::write_to(&mut out, &solution).unwrap();
/// assert_eq!(String::from_utf8(out).unwrap(), "[[0,2,1,0],[0,0]]");
/// ```
#[derive(Debug, Clone)]
pub struct RouteExporter {
    path: PathBuf,
}

impl RouteExporter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Serializes every route of `solution`, unused vehicles included.
    pub fn write_to<W: Write>(writer: W, solution: &Solution) -> io::Result<()> {
        serde_json::to_writer(writer, &solution.tours()).map_err(io::Error::from)
    }

    /// Writes `solution` to the destination.
    ///
    /// The data goes to a sibling temporary file first and is renamed into
    /// place, so a failed write leaves any previous file untouched.
    pub fn export(&self, solution: &Solution) -> io::Result<()> {
        let tmp = self.path.with_extension("json.tmp");
        let result = (|| {
            let mut writer = BufWriter::new(File::create(&tmp)?);
            Self::write_to(&mut writer, solution)?;
            writer.flush()?;
            writer.get_ref().sync_all()?;
            fs::rename(&tmp, &self.path)
        })();

        if result.is_err() {
            // best effort, the original error is what matters
            let _ = fs::remove_file(&tmp);
        }
        result?;

        info!(
            path = %self.path.display(),
            routes = solution.num_routes(),
            "exported routes"
        );
        Ok(())
    }
}

/// Writes `solution` to `path` as a ragged array of tours.
pub fn persist_solution(solution: &Solution, path: impl AsRef<Path>) -> io::Result<()> {
    RouteExporter::new(path.as_ref()).export(solution)
}

/// Reads a previously exported solution.
///
/// A missing file means there is no prior solution. The result is only
/// checked for depot anchoring; coverage is checked against the problem by
/// the search controller.
pub fn load_prior_solution(path: impl AsRef<Path>) -> Result<Option<Solution>, Error> {
    let path = path.as_ref();
    let file = match File::open(path) {
        Ok(file) => file,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "no prior solution");
            return Ok(None);
        }
        Err(err) => return Err(err.into()),
    };
    let tours: Vec<Vec<usize>> = serde_json::from_reader(BufReader::new(file))?;
    Ok(Some(Solution::from_tours(tours)?))
}
