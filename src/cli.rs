//! Command-line interface definitions.
//!
//! Every option can also be given through an environment variable or a YAML
//! config file (see [`crate::config`]). Options left unset here fall back to
//! the config file, then to the built-in defaults.

use clap::Parser;
use std::path::PathBuf;

/// Fetch web articles and score their readability and sentiment.
///
/// # Examples
///
/// ```sh
/// # Defaults: read Input.csv, write Output.csv, 10 concurrent fetches
/// article_metrics
///
/// # Explicit paths, a JSON report and a smaller pool
/// article_metrics -i urls.csv -o scores.csv -j report.json -n 4
///
/// # Domain-specific opinion word lists instead of the built-in ones
/// article_metrics --positive-words finance-pos.txt --negative-words finance-neg.txt
/// ```
#[derive(Parser, Debug, Default)]
#[command(author, version, about)]
pub struct Cli {
    /// Input CSV with URL_ID and URL columns [default: Input.csv]
    #[arg(short, long, env = "ARTICLE_METRICS_INPUT")]
    pub input: Option<PathBuf>,

    /// Output CSV for the result table [default: Output.csv]
    #[arg(short, long, env = "ARTICLE_METRICS_OUTPUT")]
    pub output: Option<PathBuf>,

    /// Optional JSON run report with failures and run metadata
    #[arg(short, long, env = "ARTICLE_METRICS_JSON_REPORT")]
    pub json_report: Option<PathBuf>,

    /// Number of articles fetched and scored concurrently [default: 10]
    #[arg(short = 'n', long, env = "ARTICLE_METRICS_CONCURRENCY")]
    pub concurrency: Option<usize>,

    /// Per-request timeout in seconds [default: 30]
    #[arg(long, env = "ARTICLE_METRICS_TIMEOUT_SECS")]
    pub timeout_secs: Option<u64>,

    /// Stopword list replacing the built-in one
    #[arg(long, env = "ARTICLE_METRICS_STOPWORDS")]
    pub stopwords: Option<PathBuf>,

    /// Positive opinion word list replacing the built-in one
    #[arg(long, env = "ARTICLE_METRICS_POSITIVE_WORDS")]
    pub positive_words: Option<PathBuf>,

    /// Negative opinion word list replacing the built-in one
    #[arg(long, env = "ARTICLE_METRICS_NEGATIVE_WORDS")]
    pub negative_words: Option<PathBuf>,

    /// Optional path to a YAML config file
    #[arg(short, long, env = "ARTICLE_METRICS_CONFIG")]
    pub config: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::parse_from([
            "article_metrics",
            "--input",
            "urls.csv",
            "--output",
            "scores.csv",
            "--concurrency",
            "4",
            "--timeout-secs",
            "15",
        ]);

        assert_eq!(cli.input, Some(PathBuf::from("urls.csv")));
        assert_eq!(cli.output, Some(PathBuf::from("scores.csv")));
        assert_eq!(cli.concurrency, Some(4));
        assert_eq!(cli.timeout_secs, Some(15));
    }

    #[test]
    fn test_cli_short_flags() {
        let cli = Cli::parse_from([
            "article_metrics",
            "-i",
            "/tmp/in.csv",
            "-o",
            "/tmp/out.csv",
            "-j",
            "/tmp/report.json",
            "-n",
            "2",
            "-c",
            "/tmp/run.yaml",
        ]);

        assert_eq!(cli.input, Some(PathBuf::from("/tmp/in.csv")));
        assert_eq!(cli.json_report, Some(PathBuf::from("/tmp/report.json")));
        assert_eq!(cli.concurrency, Some(2));
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/run.yaml")));
    }

    #[test]
    fn test_cli_lexicon_flags() {
        let cli = Cli::parse_from([
            "article_metrics",
            "--stopwords",
            "stop.txt",
            "--positive-words",
            "pos.txt",
            "--negative-words",
            "neg.txt",
        ]);

        assert_eq!(cli.stopwords, Some(PathBuf::from("stop.txt")));
        assert_eq!(cli.positive_words, Some(PathBuf::from("pos.txt")));
        assert_eq!(cli.negative_words, Some(PathBuf::from("neg.txt")));
    }
}
