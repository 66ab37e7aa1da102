//! Error taxonomy.
//!
//! Startup errors are fatal and abort the process.
//! Prediction and validation errors are recovered at the request boundary.

use std::path::PathBuf;

use itertools::Itertools;
use serde::Serialize;
use thiserror::Error;

/// Fatal error raised while preparing the predictor.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("dataset `{}` is not found or is not a readable CSV file", .path.display())]
    DatasetNotFound {
        path: PathBuf,

        #[source]
        source: csv::Error,
    },

    #[error("failed to train the model")]
    Training(#[from] TrainingError),

    #[error("failed to persist the model")]
    Persistence(#[from] PersistenceError),
}

#[derive(Debug, Error)]
pub enum TrainingError {
    #[error("the dataset has no `{0}` column")]
    MissingColumn(&'static str),

    #[error("row #{row}: `{column}` has a missing or non-numeric value `{value}`")]
    InvalidValue {
        /// One-based data row number, header excluded.
        row: usize,
        column: &'static str,
        value: String,
    },

    #[error("the dataset has no rows")]
    EmptyDataset,

    #[error("least squares solve failed: {0}")]
    Solve(&'static str),
}

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("failed to access `{}`", .path.display())]
    Io {
        path: PathBuf,

        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode the model into `{}`", .path.display())]
    Encode {
        path: PathBuf,

        #[source]
        source: serde_pickle::Error,
    },

    #[error("failed to decode the model from `{}`", .path.display())]
    Decode {
        path: PathBuf,

        #[source]
        source: serde_pickle::Error,
    },

    #[error("`{}` holds {n_coefficients} coefficients for {n_features} features", .path.display())]
    Inconsistent {
        path: PathBuf,
        n_features: usize,
        n_coefficients: usize,
    },

    #[error("the model loaded from `{}` differs from the trained one", .path.display())]
    Mismatch { path: PathBuf },
}

#[derive(Debug, Error, PartialEq)]
pub enum PredictionError {
    #[error("expected {expected} features, got {actual}")]
    FeatureCount { expected: usize, actual: usize },

    #[error("the prediction is not a finite number: {0}")]
    NonFinite(f64),
}

/// Structural request validation failure, one entry per offending field.
#[derive(Debug, Error, PartialEq, Serialize)]
#[error("{}", .0.iter().join("; "))]
#[serde(transparent)]
pub struct ValidationError(pub Vec<FieldError>);

#[derive(Debug, Error, PartialEq, Serialize)]
#[error("{}: {msg}", .loc.join("."))]
pub struct FieldError {
    #[serde(rename = "type")]
    pub kind: &'static str,

    pub loc: Vec<String>,
    pub msg: String,
}

impl FieldError {
    pub fn new(kind: &'static str, loc: &[&str], msg: impl Into<String>) -> Self {
        Self {
            kind,
            loc: loc.iter().map(ToString::to_string).collect(),
            msg: msg.into(),
        }
    }
}

impl From<FieldError> for ValidationError {
    fn from(error: FieldError) -> Self {
        Self(vec![error])
    }
}
