//! Shared test fixtures.

use crate::prelude::*;
use crate::trainer::dataset::Table;
use crate::trainer::regression::{fit, Predictor};

/// Generated by `Score = 5 + 3 * StudyHours + 0.5 * Attendance`.
pub const LINEAR_CSV: &str = "\
StudyHours,Attendance,Score
1,50,33
2,80,51
3,60,44
5,90,65
4,70,52
";

/// `Attendance = 40 + 10 * StudyHours`, so the features are perfectly collinear.
pub const COLLINEAR_CSV: &str = "\
StudyHours,Attendance,Score
1,50,40
2,60,55
3,70,70
4,80,85
";

pub fn fit_csv(csv: &str) -> Result<Predictor> {
    Ok(fit(&Table::from_reader(csv.as_bytes())?)?)
}
