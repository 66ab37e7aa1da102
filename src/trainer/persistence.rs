//! Model artifact storage.
//!
//! The artifact is a pickle of the [`Predictor`]. There is no checksum:
//! a corrupted file that still decodes yields a corrupted predictor.

use std::fs;
use std::path::Path;

use crate::error::PersistenceError;
use crate::prelude::*;
use crate::trainer::regression::Predictor;

/// Writes the artifact, replacing the existing file.
#[instrument(level = "info", skip_all, fields(path = ?path))]
pub fn save(predictor: &Predictor, path: &Path) -> Result<(), PersistenceError> {
    let blob = serde_pickle::to_vec(predictor, Default::default()).map_err(|source| {
        PersistenceError::Encode {
            path: path.to_path_buf(),
            source,
        }
    })?;
    fs::write(path, &blob).map_err(|source| PersistenceError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    info!(n_bytes = blob.len(), "saved");
    Ok(())
}

#[instrument(level = "info", skip_all, fields(path = ?path))]
pub fn load(path: &Path) -> Result<Predictor, PersistenceError> {
    let blob = fs::read(path).map_err(|source| PersistenceError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let predictor: Predictor =
        serde_pickle::from_slice(&blob, Default::default()).map_err(|source| {
            PersistenceError::Decode {
                path: path.to_path_buf(),
                source,
            }
        })?;
    if !predictor.is_consistent() {
        return Err(PersistenceError::Inconsistent {
            path: path.to_path_buf(),
            n_features: predictor.features.len(),
            n_coefficients: predictor.coefficients.len(),
        });
    }
    info!(n_bytes = blob.len(), "loaded");
    Ok(predictor)
}
