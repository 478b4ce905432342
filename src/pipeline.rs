//! Batch orchestration: fetch and score every input record on a bounded pool.
//!
//! Each record becomes one job: fetch the page, extract its text, compute the
//! metrics. At most `concurrency` jobs are in flight; the rest wait until a
//! slot frees. Jobs hand their result back to the single collecting future,
//! so nothing is shared mutably between them.
//!
//! A failed job is logged and dropped from the table. It never stops the
//! batch. Once every job has finished the table is sorted ascending by id,
//! so the output order does not depend on completion order.

use crate::errors::ProcessError;
use crate::lexicon::Lexicon;
use crate::metrics;
use crate::models::{FailedRecord, InputRecord, MetricsRecord};
use crate::scrapers::ArticleFetcher;
use crate::utils::truncate_for_log;
use futures::stream::{self, StreamExt};
use itertools::{Either, Itertools};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};

pub const DEFAULT_CONCURRENCY: usize = 10;

/// Everything a batch produced.
#[derive(Debug, Default)]
pub struct BatchOutcome {
    /// One row per successful record, ascending by id.
    pub table: Vec<MetricsRecord>,
    /// Records that produced no row, ascending by id.
    pub failures: Vec<FailedRecord>,
}

impl BatchOutcome {
    pub fn attempted(&self) -> usize {
        self.table.len() + self.failures.len()
    }
}

/// Run every record through fetch and scoring.
///
/// # Arguments
///
/// * `records` - Input rows; later rows repeating an earlier `URL_ID` are skipped
/// * `fetcher` - Source of article text for each URL
/// * `lexicon` - Word lists shared read-only with every scoring job
/// * `concurrency` - Maximum jobs in flight (values below 1 are treated as 1)
///
/// # Returns
///
/// A [`BatchOutcome`] whose table holds one row per successful record and
/// whose failures list every record that was dropped, both ascending by id.
/// Per-record failures are logged here and never abort the batch.
#[instrument(level = "info", skip_all, fields(records = records.len(), concurrency = concurrency))]
pub async fn run<F>(
    records: Vec<InputRecord>,
    fetcher: &F,
    lexicon: Arc<Lexicon>,
    concurrency: usize,
) -> BatchOutcome
where
    F: ArticleFetcher,
{
    let concurrency = concurrency.max(1);
    let records = dedupe_records(records);
    info!(count = records.len(), concurrency, "Starting batch");

    let results: Vec<(InputRecord, Result<MetricsRecord, ProcessError>)> = stream::iter(records)
        .map(|record| {
            let lexicon = Arc::clone(&lexicon);
            async move {
                let result = process_record(fetcher, lexicon, &record).await;
                match &result {
                    Ok(_) => info!(
                        id = %record.id,
                        url = %record.url,
                        "Article {} extracted and processed successfully",
                        record.id
                    ),
                    Err(e) => error!(
                        id = %record.id,
                        url = %record.url,
                        error = %e,
                        "Error processing article {}",
                        record.id
                    ),
                }
                (record, result)
            }
        })
        .buffer_unordered(concurrency)
        .collect()
        .await;

    let (mut table, mut failures): (Vec<MetricsRecord>, Vec<FailedRecord>) =
        results
            .into_iter()
            .partition_map(|(record, result)| match result {
                Ok(row) => Either::Left(row),
                Err(e) => Either::Right(FailedRecord {
                    id: record.id,
                    url: record.url,
                    error: e.to_string(),
                }),
            });

    table.sort_by(|a, b| a.id.cmp(&b.id));
    failures.sort_by(|a, b| a.id.cmp(&b.id));

    info!(
        successful = table.len(),
        failed = failures.len(),
        "Completed batch"
    );
    BatchOutcome { table, failures }
}

/// Fetch one record and score its text.
#[instrument(level = "debug", skip_all, fields(id = %record.id, url = %record.url))]
async fn process_record<F>(
    fetcher: &F,
    lexicon: Arc<Lexicon>,
    record: &InputRecord,
) -> Result<MetricsRecord, ProcessError>
where
    F: ArticleFetcher,
{
    let article = fetcher.fetch(&record.url).await?;
    debug!(
        title = %truncate_for_log(&article.title, 120),
        bytes = article.body.len(),
        "Extracted article text"
    );

    // Scoring a long page is CPU-bound; keep it off the fetch loop.
    let metrics =
        tokio::task::spawn_blocking(move || metrics::compute(&article.body, &lexicon)).await?;
    debug!(
        words = metrics.word_count,
        sentences = metrics.sentence_count,
        "Scored article"
    );
    Ok(MetricsRecord::from_metrics(record, &metrics))
}

/// Keep the first record for each id.
fn dedupe_records(records: Vec<InputRecord>) -> Vec<InputRecord> {
    let mut seen = HashSet::new();
    records
        .into_iter()
        .filter(|record| {
            let fresh = seen.insert(record.id.clone());
            if !fresh {
                warn!(id = %record.id, url = %record.url, "Duplicate URL_ID; skipping record");
            }
            fresh
        })
        .collect()
}
