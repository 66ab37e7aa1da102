use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use csv::{ReaderBuilder, StringRecord, Trim};

use crate::error::{StartupError, TrainingError};
use crate::prelude::*;

/// Training table as read from the CSV file: header record followed by the data rows.
///
/// Column presence and numeric values are only checked when a column gets extracted.
/// Rows may be shorter than the header: the missing cells read as empty.
pub struct Table {
    headers: StringRecord,
    rows: Vec<StringRecord>,
}

impl Table {
    #[instrument(level = "info", skip_all, fields(path = ?path))]
    pub fn load(path: &Path) -> Result<Self, StartupError> {
        let table = File::open(path)
            .map_err(csv::Error::from)
            .and_then(Self::from_reader)
            .map_err(|source| StartupError::DatasetNotFound {
                path: path.to_path_buf(),
                source,
            })?;
        info!(n_rows = table.len(), n_columns = table.headers.len(), "loaded");
        Ok(table)
    }

    pub fn from_reader(reader: impl Read) -> csv::Result<Self> {
        let mut reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .from_reader(reader);
        let headers = reader.headers()?.clone();
        let rows = reader.records().collect::<StdResult<Vec<_>, _>>()?;
        Ok(Self { headers, rows })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Extracts the named column as finite numbers.
    pub fn column(&self, name: &'static str) -> Result<Vec<f64>, TrainingError> {
        let index = self
            .headers
            .iter()
            .position(|header| header == name)
            .ok_or(TrainingError::MissingColumn(name))?;
        self.rows
            .iter()
            .enumerate()
            .map(|(i, row)| {
                let value = row.get(index).unwrap_or_default();
                match f64::from_str(value) {
                    Ok(number) if number.is_finite() => Ok(number),
                    _ => Err(TrainingError::InvalidValue {
                        row: i + 1,
                        column: name,
                        value: value.to_string(),
                    }),
                }
            })
            .collect()
    }
}
