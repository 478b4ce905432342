//! Error types for every stage of a run.
//!
//! Per-record failures ([`FetchError`], wrapped in [`ProcessError`]) are
//! recovered by the batch: the record is logged and skipped. Everything else
//! here aborts the run from `main`.

use std::path::PathBuf;
use thiserror::Error;

/// A single URL could not be turned into article text.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid URL {url:?}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("HTTP status {status} from {url}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("reading body of {url} failed: {source}")]
    Body {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

/// Outcome of one record's fetch-and-score job when it does not produce a row.
#[derive(Debug, Error)]
pub enum ProcessError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("scoring task failed: {0}")]
    Scoring(#[from] tokio::task::JoinError),
}

#[derive(Debug, Error)]
pub enum InputError {
    #[error("cannot read input file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot read header row of {path}: {source}")]
    Header {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("input file {path} is missing required column {column:?}")]
    MissingColumn { path: PathBuf, column: &'static str },

    #[error("malformed row in {path}: {source}")]
    Row {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

#[derive(Debug, Error)]
pub enum OutputError {
    #[error("output location {path} is not writable: {source}")]
    NotWritable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("writing {path} failed: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("writing {path} failed: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("serializing report failed: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum LexiconError {
    #[error("cannot read lexicon file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("concurrency must be at least 1")]
    ZeroConcurrency,

    #[error("timeout must be at least 1 second")]
    ZeroTimeout,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_process_error_is_transparent() {
        let inner = FetchError::InvalidUrl {
            url: "not a url".to_string(),
            source: url::ParseError::RelativeUrlWithoutBase,
        };
        let expected = inner.to_string();
        let err: ProcessError = inner.into();
        assert_eq!(err.to_string(), expected);
        assert!(expected.contains("not a url"));
    }

    #[test]
    fn test_missing_column_message() {
        let err = InputError::MissingColumn {
            path: PathBuf::from("Input.csv"),
            column: "URL_ID",
        };
        assert_eq!(
            err.to_string(),
            "input file Input.csv is missing required column \"URL_ID\""
        );
    }
}
