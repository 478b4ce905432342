//! CSV output of the result table.
//!
//! The column order is fixed:
//!
//! ```text
//! URL_ID, URL, WORD COUNT, AVG WORD LENGTH, AVG NUMBER OF WORDS PER SENTENCE,
//! POSITIVE SCORE, NEGATIVE SCORE, POLARITY SCORE, SUBJECTIVITY SCORE, PERSONAL PRONOUNS
//! ```
//!
//! The header row is written even when the table is empty.

use crate::errors::OutputError;
use crate::models::MetricsRecord;
use csv::WriterBuilder;
use std::path::Path;
use tokio::fs;
use tracing::{info, instrument};

pub const COLUMNS: [&str; 10] = [
    "URL_ID",
    "URL",
    "WORD COUNT",
    "AVG WORD LENGTH",
    "AVG NUMBER OF WORDS PER SENTENCE",
    "POSITIVE SCORE",
    "NEGATIVE SCORE",
    "POLARITY SCORE",
    "SUBJECTIVITY SCORE",
    "PERSONAL PRONOUNS",
];

/// Render the table as CSV bytes.
pub fn render_table(table: &[MetricsRecord]) -> Result<Vec<u8>, csv::Error> {
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    writer.write_record(COLUMNS)?;
    for row in table {
        writer.serialize(row)?;
    }
    writer.into_inner().map_err(|e| e.into_error().into())
}

/// Write the result table to `path` as CSV, replacing any existing file.
///
/// # Arguments
///
/// * `table` - Rows to write, already sorted by id
/// * `path` - Destination file
///
/// # Errors
///
/// Returns [`OutputError::Csv`] if a row cannot be encoded and
/// [`OutputError::Io`] if the file cannot be written.
#[instrument(level = "info", skip_all, fields(path = %path.display(), rows = table.len()))]
pub async fn write_table(table: &[MetricsRecord], path: &Path) -> Result<(), OutputError> {
    let bytes = render_table(table).map_err(|source| OutputError::Csv {
        path: path.to_path_buf(),
        source,
    })?;
    fs::write(path, bytes).await.map_err(|source| OutputError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    info!("Wrote result table");
    Ok(())
}
