//! Engine error type for embedders.
//!
//! Use [`EngineError`] when you want to map sparkling, Polars and worker-pool
//! errors to a single type (e.g. for a CLI) without depending on Polars error types.

use polars::error::PolarsError;
use std::fmt;

/// Unified error type for sparkling operations.
#[derive(Debug)]
pub enum EngineError {
    /// User-facing error (invalid input, unsupported operation).
    User(String),
    /// Session or runtime configuration could not be applied.
    Config(String),
    /// Internal / compute error.
    Internal(String),
    /// I/O error while writing output.
    Io(String),
    /// Resource not found (column, session).
    NotFound(String),
    /// Other / unclassified.
    Other(String),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::User(s) => write!(f, "user error: {s}"),
            EngineError::Config(s) => write!(f, "config error: {s}"),
            EngineError::Internal(s) => write!(f, "internal error: {s}"),
            EngineError::Io(s) => write!(f, "io error: {s}"),
            EngineError::NotFound(s) => write!(f, "not found: {s}"),
            EngineError::Other(s) => write!(f, "{s}"),
        }
    }
}

impl std::error::Error for EngineError {}

impl From<sparkling_core::EngineError> for EngineError {
    fn from(e: sparkling_core::EngineError) -> Self {
        use sparkling_core::EngineError as Core;
        match e {
            Core::User(s) => EngineError::User(s),
            Core::Config(s) => EngineError::Config(s),
            Core::Internal(s) => EngineError::Internal(s),
            Core::Io(s) => EngineError::Io(s),
            Core::NotFound(s) => EngineError::NotFound(s),
            Core::Other(s) => EngineError::Other(s),
        }
    }
}

impl From<PolarsError> for EngineError {
    fn from(e: PolarsError) -> Self {
        let msg = e.to_string();
        match &e {
            PolarsError::ColumnNotFound(_) => EngineError::NotFound(msg),
            PolarsError::InvalidOperation(_) | PolarsError::Duplicate(_) => EngineError::User(msg),
            PolarsError::ShapeMismatch(_) | PolarsError::ComputeError(_) => {
                EngineError::Internal(msg)
            }
            PolarsError::IO { .. } => EngineError::Io(msg),
            _ => EngineError::Other(msg),
        }
    }
}

impl From<rayon::ThreadPoolBuildError> for EngineError {
    fn from(e: rayon::ThreadPoolBuildError) -> Self {
        EngineError::Internal(format!("failed to start worker pool: {e}"))
    }
}

impl From<serde_json::Error> for EngineError {
    fn from(e: serde_json::Error) -> Self {
        EngineError::Internal(e.to_string())
    }
}

impl From<std::io::Error> for EngineError {
    fn from(e: std::io::Error) -> Self {
        EngineError::Io(e.to_string())
    }
}
