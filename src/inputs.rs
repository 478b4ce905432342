//! Reading the input sheet.
//!
//! The input is a CSV file with a header row that names at least the
//! `URL_ID` and `URL` columns. Other columns are ignored. Cells are trimmed.

use crate::errors::InputError;
use crate::models::InputRecord;
use csv::{ReaderBuilder, Trim};
use std::path::Path;
use tokio::fs;
use tracing::{info, instrument};

const REQUIRED_COLUMNS: [&str; 2] = ["URL_ID", "URL"];

/// Read all records from the input sheet at `path`.
///
/// # Returns
///
/// The records in file order.
///
/// # Errors
///
/// Returns an [`InputError`] if the file cannot be read, lacks a `URL_ID`
/// or `URL` column, or contains a malformed row.
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub async fn read_input(path: &Path) -> Result<Vec<InputRecord>, InputError> {
    let bytes = fs::read(path).await.map_err(|source| InputError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let records = parse_input(&bytes, path)?;
    info!(count = records.len(), "Read input records");
    Ok(records)
}

fn parse_input(bytes: &[u8], path: &Path) -> Result<Vec<InputRecord>, InputError> {
    let mut reader = ReaderBuilder::new().trim(Trim::All).from_reader(bytes);

    let headers = reader.headers().map_err(|source| InputError::Header {
        path: path.to_path_buf(),
        source,
    })?;
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(InputError::MissingColumn {
                path: path.to_path_buf(),
                column,
            });
        }
    }

    reader
        .deserialize::<InputRecord>()
        .map(|row| {
            row.map_err(|source| InputError::Row {
                path: path.to_path_buf(),
                source,
            })
        })
        .collect()
}
