//! Run settings resolved from the CLI, an optional YAML file and defaults.
//!
//! Precedence, highest first: command-line flag or its environment variable,
//! config file value, built-in default.
//!
//! ```yaml
//! input: urls.csv
//! output: out/Output.csv
//! json_report: out/report.json
//! concurrency: 8
//! timeout_secs: 20
//! positive_words: lexicon/positive-words.txt
//! negative_words: lexicon/negative-words.txt
//! ```

use crate::cli::Cli;
use crate::errors::ConfigError;
use crate::lexicon::LexiconPaths;
use crate::pipeline::DEFAULT_CONCURRENCY;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::fs;
use tracing::{info, instrument};

pub const DEFAULT_INPUT: &str = "Input.csv";
pub const DEFAULT_OUTPUT: &str = "Output.csv";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Values read from the YAML config file. Every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileSettings {
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub json_report: Option<PathBuf>,
    pub concurrency: Option<usize>,
    pub timeout_secs: Option<u64>,
    pub stopwords: Option<PathBuf>,
    pub positive_words: Option<PathBuf>,
    pub negative_words: Option<PathBuf>,
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub input: PathBuf,
    pub output: PathBuf,
    pub json_report: Option<PathBuf>,
    pub concurrency: usize,
    pub timeout: Duration,
    pub stopwords: Option<PathBuf>,
    pub positive_words: Option<PathBuf>,
    pub negative_words: Option<PathBuf>,
}

impl Settings {
    /// Resolve settings for `cli`, reading its config file if one is named.
    pub async fn resolve(cli: &Cli) -> Result<Self, ConfigError> {
        let file = match &cli.config {
            Some(path) => load_file(path).await?,
            None => FileSettings::default(),
        };
        Self::merge(cli, file)
    }

    fn merge(cli: &Cli, file: FileSettings) -> Result<Self, ConfigError> {
        let concurrency = cli
            .concurrency
            .or(file.concurrency)
            .unwrap_or(DEFAULT_CONCURRENCY);
        if concurrency == 0 {
            return Err(ConfigError::ZeroConcurrency);
        }
        let timeout_secs = cli
            .timeout_secs
            .or(file.timeout_secs)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);
        if timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout);
        }

        Ok(Self {
            input: cli
                .input
                .clone()
                .or(file.input)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_INPUT)),
            output: cli
                .output
                .clone()
                .or(file.output)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT)),
            json_report: cli.json_report.clone().or(file.json_report),
            concurrency,
            timeout: Duration::from_secs(timeout_secs),
            stopwords: cli.stopwords.clone().or(file.stopwords),
            positive_words: cli.positive_words.clone().or(file.positive_words),
            negative_words: cli.negative_words.clone().or(file.negative_words),
        })
    }

    pub fn lexicon_paths(&self) -> LexiconPaths<'_> {
        LexiconPaths {
            stopwords: self.stopwords.as_deref(),
            positive: self.positive_words.as_deref(),
            negative: self.negative_words.as_deref(),
        }
    }
}

#[instrument(level = "info", skip_all, fields(path = %path.display()))]
async fn load_file(path: &Path) -> Result<FileSettings, ConfigError> {
    let text = fs::read_to_string(path)
        .await
        .map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
    let settings = parse_file(&text, path)?;
    info!("Loaded configuration");
    Ok(settings)
}

fn parse_file(text: &str, path: &Path) -> Result<FileSettings, ConfigError> {
    if text.trim().is_empty() {
        return Ok(FileSettings::default());
    }
    serde_yaml::from_str(text).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
