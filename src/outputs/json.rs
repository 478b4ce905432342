//! JSON run report.
//!
//! An optional second encoding of the run: when it ran, how long it took,
//! which records failed and why, and the sorted result table.
//!
//! ```json
//! {
//!   "local_date": "2026-10-19",
//!   "local_time": "14:03:27.120",
//!   "elapsed_ms": 8312,
//!   "input_count": 3,
//!   "successful": 2,
//!   "failed": 1,
//!   "failures": [{ "id": "2", "url": "http://...", "error": "..." }],
//!   "results": [{ "URL_ID": "1", "URL": "http://...", "WORD COUNT": 512, ... }]
//! }
//! ```

use crate::errors::OutputError;
use crate::models::{FailedRecord, MetricsRecord};
use crate::pipeline::BatchOutcome;
use chrono::Local;
use serde::Serialize;
use std::path::Path;
use std::time::Duration;
use tokio::fs;
use tracing::{info, instrument};

#[derive(Debug, Serialize)]
pub struct RunReport<'a> {
    pub local_date: String,
    pub local_time: String,
    pub elapsed_ms: u64,
    pub input_count: usize,
    pub successful: usize,
    pub failed: usize,
    pub failures: &'a [FailedRecord],
    pub results: &'a [MetricsRecord],
}

impl<'a> RunReport<'a> {
    pub fn new(outcome: &'a BatchOutcome, input_count: usize, elapsed: Duration) -> Self {
        let now = Local::now();
        Self {
            local_date: now.date_naive().to_string(),
            local_time: now.time().format("%H:%M:%S%.3f").to_string(),
            elapsed_ms: elapsed.as_millis() as u64,
            input_count,
            successful: outcome.table.len(),
            failed: outcome.failures.len(),
            failures: &outcome.failures,
            results: &outcome.table,
        }
    }
}

#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub async fn write_report(report: &RunReport<'_>, path: &Path) -> Result<(), OutputError> {
    let json = serde_json::to_string_pretty(report)?;
    fs::write(path, json).await.map_err(|source| OutputError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    info!("Wrote JSON run report");
    Ok(())
}
