//! # Article Metrics
//!
//! Fetches web articles listed in a CSV sheet, strips their HTML and scores
//! each one with lexicon-based readability and sentiment metrics, writing one
//! result row per article.
//!
//! ## Usage
//!
//! ```sh
//! article_metrics -i Input.csv -o Output.csv
//! ```
//!
//! ## Architecture
//!
//! The application follows a pipeline architecture:
//! 1. **Input**: Read `(URL_ID, URL)` records from the input sheet
//! 2. **Fetching**: Download each page and extract its visible text
//! 3. **Scoring**: Count words against the stopword and opinion lexicons
//!    (fetch and scoring run on a bounded pool, 10 at a time by default)
//! 4. **Output**: Sort rows by id and write the CSV table (and optional JSON report)
//!
//! A record whose page cannot be fetched is logged and left out of the table;
//! it never stops the batch.

use clap::Parser;
use std::error::Error;
use std::sync::Arc;
use tracing::{debug, error, info, instrument};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod cli;
mod config;
mod errors;
mod inputs;
mod lexicon;
mod metrics;
mod models;
mod outputs;
mod pipeline;
mod scrapers;
mod utils;

use cli::Cli;
use config::Settings;
use lexicon::Lexicon;
use outputs::{json, table};
use scrapers::page::HttpFetcher;
use utils::ensure_output_writable;

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("article_metrics starting up");

    let args = Cli::parse();
    let settings = Settings::resolve(&args).await?;
    debug!(?settings, "Resolved settings");

    // Fail before fetching anything if the results cannot be written.
    if let Err(e) = ensure_output_writable(&settings.output).await {
        error!(path = %settings.output.display(), error = %e, "Output location is not writable");
        return Err(e.into());
    }
    if let Some(report_path) = &settings.json_report {
        ensure_output_writable(report_path).await?;
    }

    let lexicon = Arc::new(Lexicon::load(settings.lexicon_paths()).await?);

    let records = match inputs::read_input(&settings.input).await {
        Ok(records) => records,
        Err(e) => {
            error!(path = %settings.input.display(), error = %e, "Failed to read input");
            return Err(e.into());
        }
    };
    let input_count = records.len();

    let fetcher = HttpFetcher::new(settings.timeout)?;
    let outcome = pipeline::run(records, &fetcher, lexicon, settings.concurrency).await;

    info!(
        total = input_count,
        attempted = outcome.attempted(),
        successful = outcome.table.len(),
        failed = outcome.failures.len(),
        "Completed article processing"
    );

    table::write_table(&outcome.table, &settings.output).await?;
    info!("Results saved to {}", settings.output.display());

    if let Some(report_path) = &settings.json_report {
        let report = json::RunReport::new(&outcome, input_count, start_time.elapsed());
        if let Err(e) = json::write_report(&report, report_path).await {
            error!(path = %report_path.display(), error = %e, "Failed to write JSON report");
        }
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        "Execution complete"
    );

    Ok(())
}
