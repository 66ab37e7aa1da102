//! Prepares the predictor at startup: loads the dataset, fits the model,
//! and round-trips it through the model artifact.

use std::path::Path;

use crate::error::{PersistenceError, StartupError};
use crate::prelude::*;
use crate::tracing::format_elapsed;
use crate::trainer::dataset::Table;
use crate::trainer::regression::Predictor;

pub mod dataset;
pub mod persistence;
pub mod regression;

/// Runs the whole startup sequence.
///
/// The returned predictor is the one read back from the artifact,
/// and it is guaranteed to be equal to the freshly trained one.
#[instrument(level = "info", skip_all, fields(dataset_path = ?dataset_path, model_path = ?model_path))]
pub fn prepare(dataset_path: &Path, model_path: &Path) -> Result<Predictor, StartupError> {
    let start_instant = Instant::now();

    let trained = regression::fit(&Table::load(dataset_path)?)?;
    persistence::save(&trained, model_path)?;
    let loaded = persistence::load(model_path)?;
    if loaded != trained {
        return Err(PersistenceError::Mismatch {
            path: model_path.to_path_buf(),
        }
        .into());
    }

    info!(
        intercept = loaded.intercept,
        coefficients = ?loaded.coefficients,
        elapsed = format_elapsed(start_instant).as_str(),
        "the predictor is ready",
    );
    Ok(loaded)
}
