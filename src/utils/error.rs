//! Error types for the ecoscrape crawler
//!
//! This module defines custom error types used throughout the application.
//! Soft per-item conditions are not errors; they travel as
//! [`crate::crawler::SkipReason`] values instead.

use thiserror::Error;

/// Errors that can occur during HTTP fetching operations
#[derive(Error, Debug)]
pub enum FetchError {
    /// HTTP request error (connection refused, DNS, TLS, ...)
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-200 response from a listing or JSON endpoint
    #[error("{message}")]
    Status { code: u16, message: String },

    /// Request timeout
    #[error("Request timeout")]
    Timeout,

    /// Content decoding error
    #[error("Decoding error: {0}")]
    Decode(String),

    /// Response body was not the expected JSON document
    #[error("Invalid JSON payload: {0}")]
    Json(#[from] serde_json::Error),
}

impl FetchError {
    /// Timeouts and 5xx responses are worth retrying on a later run
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Timeout => true,
            Self::Http(e) => e.is_timeout() || e.is_connect(),
            Self::Status { code, .. } => *code >= 500,
            Self::Decode(_) | Self::Json(_) => false,
        }
    }
}

/// Errors that can occur during parsing operations
#[derive(Error, Debug)]
pub enum ParseError {
    /// Listing payload is missing the list of entries
    #[error("Listing payload has no result list")]
    MissingResult,

    /// Date string did not match the expected layout
    #[error("Invalid date: {0}")]
    InvalidDate(String),
}

/// Errors raised by the tabular dataset sink
#[derive(Error, Debug)]
pub enum StorageError {
    /// File system error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV reading or writing error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Existing file has a different header row than expected
    #[error("Dataset schema mismatch: expected {expected:?}, found {found:?}")]
    SchemaMismatch {
        expected: Vec<String>,
        found: Vec<String>,
    },

    /// Row width does not match the header
    #[error("Row has {found} fields, dataset has {expected} columns")]
    RowWidth { expected: usize, found: usize },

    /// Requested column does not exist
    #[error("Column not found: {0}")]
    MissingColumn(String),
}

/// General crawler errors
#[derive(Error, Debug)]
pub enum CrawlerError {
    /// Fetch error
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    /// Dataset error while appending
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl CrawlerError {
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Fetch(e) => e.is_recoverable(),
            Self::Parse(_) | Self::Storage(_) => false,
        }
    }
}
