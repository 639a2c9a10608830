//! Error types for the stream processor
//!
//! Operators never fail while data is flowing. Errors are raised when an
//! operator or pipeline is constructed with an invalid configuration, and
//! when a data source cannot produce well-formed samples.

use thiserror::Error;

/// Main processor error type
#[derive(Error, Debug)]
pub enum ProcessorError {
    /// Window-related errors
    #[error("window error: {0}")]
    Window(#[from] WindowError),

    /// Data source errors
    #[error("source error: {0}")]
    Source(#[from] SourceError),

    /// Configuration errors
    #[error("configuration error: {source}")]
    Configuration {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ProcessorError {
    /// Build a configuration error from a message
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        ProcessorError::Configuration {
            source: message.into().into(),
        }
    }
}

/// Window construction errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum WindowError {
    /// Window size is invalid
    #[error("invalid window size: {size}, must be at least 1")]
    InvalidWindowSize { size: usize },
}

/// Sample source errors
#[derive(Error, Debug)]
pub enum SourceError {
    /// The underlying CSV reader failed
    #[error("failed to read record {record}: {source}")]
    Read {
        record: u64,
        #[source]
        source: csv::Error,
    },

    /// The configured column is absent from a record
    #[error("record {record} has no column {column}")]
    MissingColumn { record: u64, column: usize },

    /// The sample value is not an integer
    #[error("record {record}: cannot parse sample '{value}'")]
    InvalidSample { record: u64, value: String },
}

/// Result type alias for processor operations
pub type Result<T> = std::result::Result<T, ProcessorError>;

/// Result type alias for window operations
pub type WindowResult<T> = std::result::Result<T, WindowError>;

/// Result type alias for source operations
pub type SourceResult<T> = std::result::Result<T, SourceError>;

impl From<csv::Error> for ProcessorError {
    fn from(err: csv::Error) -> Self {
        ProcessorError::Source(SourceError::Read {
            record: err.position().map(|p| p.record()).unwrap_or(0),
            source: err,
        })
    }
}
