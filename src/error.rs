//! Error types for passenger-config operations.
//!
//! This module defines [`PassengerError`], the primary error type used
//! throughout the crate, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Use `PassengerError` for failures that callers report distinctly
//! - Use `anyhow::Error` (via `PassengerError::Other`) for ad-hoc I/O context
//! - Report-level gaps (no interpreter, no Apache) are notices, not errors

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for passenger-config operations.
#[derive(Debug, Error)]
pub enum PassengerError {
    /// The locations.ini file does not exist.
    #[error("Location configuration file not found: {path}")]
    LocationsNotFound { path: PathBuf },

    /// The locations.ini file is malformed.
    #[error("Failed to parse {path} at line {line}: {message}")]
    LocationsParse {
        path: PathBuf,
        line: usize,
        message: String,
    },

    /// A required field is missing from the locations.ini file.
    #[error("Option '{field}' missing in {path}")]
    MissingLocation { path: PathBuf, field: String },

    /// The Passenger source root could not be determined.
    #[error("Unable to determine the Passenger root directory: {message}")]
    SourceRootUnknown { message: String },

    /// No Ruby interpreter is configured or available on PATH.
    #[error("No Ruby interpreter found")]
    RubyNotFound,

    /// An external command failed.
    #[error("Command failed with exit code {code:?}: {command}")]
    CommandFailed { command: String, code: Option<i32> },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for passenger-config operations.
pub type Result<T> = std::result::Result<T, PassengerError>;
