//! Error types for reqscope.
//!
//! Pipeline stages return `anyhow::Result` and attach context at each step.
//! Failures that callers may want to tell apart (a missing column, a
//! dataset that cannot be split into quantile buckets, a bad config) are
//! raised as [`EdaError`] values, so they survive the context chain and can
//! be recovered with `downcast_ref`:
//!
//! ```no_run
//! use reqscope::error::EdaError;
//!
//! fn explain(err: &anyhow::Error) -> &'static str {
//!     match err.downcast_ref::<EdaError>() {
//!         Some(EdaError::MissingColumn(_)) => "dataset is missing a required column",
//!         Some(EdaError::Binning(_)) => "path lengths are too uniform to bucket",
//!         _ => "unexpected failure",
//!     }
//! }
//! ```

use std::fmt;

/// Main error type for reqscope operations.
#[derive(Debug)]
pub enum EdaError {
    /// I/O errors (dataset, summary, chart files)
    Io(std::io::Error),

    /// Polars failures and unsupported column types
    DataProcessing(String),

    /// A column the analysis depends on is absent from the dataset
    MissingColumn(String),

    /// Quantile binning produced duplicate bucket edges
    Binning(String),

    /// Chart rendering failures
    Render(String),

    /// Invalid configuration values or unreadable config files
    Config(String),

    /// File not found or invalid path
    InvalidPath(String),

    /// Generic error with context
    Other(String),
}

impl fmt::Display for EdaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::DataProcessing(msg) => write!(f, "Data processing error: {msg}"),
            Self::MissingColumn(name) => write!(f, "Missing required column: '{name}'"),
            Self::Binning(msg) => write!(f, "Binning error: {msg}"),
            Self::Render(msg) => write!(f, "Chart rendering error: {msg}"),
            Self::Config(msg) => write!(f, "Configuration error: {msg}"),
            Self::InvalidPath(msg) => write!(f, "Invalid path: {msg}"),
            Self::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for EdaError {}

impl From<std::io::Error> for EdaError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<anyhow::Error> for EdaError {
    fn from(err: anyhow::Error) -> Self {
        Self::Other(err.to_string())
    }
}

impl From<serde_json::Error> for EdaError {
    fn from(err: serde_json::Error) -> Self {
        Self::Config(format!("JSON error: {err}"))
    }
}

impl From<polars::error::PolarsError> for EdaError {
    fn from(err: polars::error::PolarsError) -> Self {
        Self::DataProcessing(err.to_string())
    }
}

/// Result type alias for reqscope operations.
pub type Result<T> = std::result::Result<T, EdaError>;

/// Extension trait to add context to results.
pub trait ResultExt<T> {
    /// Add context to an error.
    fn context(self, msg: impl Into<String>) -> Result<T>;

    /// Add context using a closure (lazy evaluation).
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<EdaError>,
{
    fn context(self, msg: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let err: EdaError = e.into();
            EdaError::Other(format!("{}: {}", msg.into(), err))
        })
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| {
            let err: EdaError = e.into();
            EdaError::Other(format!("{}: {}", f(), err))
        })
    }
}
