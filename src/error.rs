// src/error.rs

use std::path::PathBuf;

/// A single retrieval attempt failed; the run has no page to work with.
#[derive(thiserror::Error, Debug)]
pub enum FetchError {
    #[error("invalid source URL {url:?}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("GET {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("GET {url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("reading body from {url}: {source}")]
    Body {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

#[derive(thiserror::Error, Debug)]
pub enum ExtractError {
    #[error("invalid table selector {selector:?}: {reason}")]
    InvalidSelector { selector: String, reason: String },
}

#[derive(thiserror::Error, Debug)]
pub enum PersistError {
    #[error("creating directory {path:?}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("writing {path:?}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("reading {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("{path:?} has no header row")]
    NoHeader { path: PathBuf },
}

/// Failure of one chart. The sibling chart is still attempted.
#[derive(thiserror::Error, Debug)]
pub enum RenderError {
    #[error("no column labelled {label:?} (have {available:?})")]
    MissingColumn {
        label: String,
        available: Vec<String>,
    },

    #[error("row {row}: {value:?} is not a valid {expected}")]
    NotNumeric {
        row: usize,
        value: String,
        expected: &'static str,
    },

    #[error("table has no rows to plot")]
    NoRows,

    #[error("values sum to zero; nothing to apportion")]
    ZeroTotal,

    #[error("creating chart directory {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("drawing {path:?}: {message}")]
    Draw { path: PathBuf, message: String },
}

/// Conditions that abort the pipeline instead of degrading to "no data".
#[derive(thiserror::Error, Debug)]
pub enum PipelineError {
    #[error("extraction failed: {0}")]
    Extract(#[from] ExtractError),

    #[error("persistence failed: {0}")]
    Persist(#[from] PersistError),
}
