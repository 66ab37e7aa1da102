//! Ordinary least squares regression of the score on the study hours and attendance.

use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};

use crate::error::{PredictionError, TrainingError};
use crate::math::{dot, mean};
use crate::prelude::*;
use crate::trainer::dataset::Table;

/// Predictor columns, in the order the coefficients are stored.
pub const FEATURES: [&str; 2] = ["StudyHours", "Attendance"];

pub const TARGET: &str = "Score";

/// Singular values below this fraction of the largest one are treated as zero.
const RCOND: f64 = 1e-10;

/// Fitted linear model: `intercept + coefficients · features`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Predictor {
    pub features: Vec<String>,
    pub target: String,
    pub intercept: f64,
    pub coefficients: Vec<f64>,
}

impl Predictor {
    pub fn predict(&self, features: &[f64]) -> Result<f64, PredictionError> {
        if features.len() != self.coefficients.len() {
            return Err(PredictionError::FeatureCount {
                expected: self.coefficients.len(),
                actual: features.len(),
            });
        }
        match self.intercept + dot(&self.coefficients, features) {
            prediction if prediction.is_finite() => Ok(prediction),
            prediction => Err(PredictionError::NonFinite(prediction)),
        }
    }

    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.features.len() == self.coefficients.len()
    }
}

/// Fits the model with an intercept.
///
/// The columns get centered, then the least squares problem is solved via SVD,
/// which yields the minimum-norm solution when the features are collinear.
#[instrument(level = "info", skip_all, fields(n_rows = table.len()))]
pub fn fit(table: &Table) -> Result<Predictor, TrainingError> {
    let columns = FEATURES
        .iter()
        .map(|&name| table.column(name))
        .collect::<StdResult<Vec<_>, _>>()?;
    let target = table.column(TARGET)?;
    if target.is_empty() {
        return Err(TrainingError::EmptyDataset);
    }

    let n_rows = target.len();
    let means: Vec<f64> = columns.iter().map(|column| mean(column)).collect();
    let target_mean = mean(&target);
    let x = DMatrix::from_fn(n_rows, FEATURES.len(), |i, j| columns[j][i] - means[j]);
    let y = DVector::from_iterator(n_rows, target.iter().map(|yi| yi - target_mean));

    let svd = x.svd(true, true);
    let eps = RCOND * svd.singular_values.max();
    debug!(singular_values = ?svd.singular_values.as_slice(), eps);
    let coefficients: Vec<f64> = svd
        .solve(&y, eps)
        .map_err(TrainingError::Solve)?
        .iter()
        .copied()
        .collect();
    let intercept = target_mean - dot(&means, &coefficients);
    if !intercept.is_finite() || coefficients.iter().any(|coefficient| !coefficient.is_finite()) {
        return Err(TrainingError::Solve("the solution is not finite"));
    }

    info!(intercept, ?coefficients, "fitted");
    Ok(Predictor {
        features: FEATURES.iter().map(ToString::to_string).collect(),
        target: TARGET.to_string(),
        intercept,
        coefficients,
    })
}
