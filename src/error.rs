//! Error types and handling infrastructure for svtable.
//!
//! This module provides a centralized error handling system using `thiserror` for
//! custom error types. The binary layers `anyhow` on top for context.
//!
//! Errors fall into four groups:
//!
//! - **Usage**: bad path, parsing after end of data, invalid arguments
//! - **Structural**: the file violates its row/field/quote contract
//! - **Resource**: I/O and encoding failures, surfaced verbatim
//! - **Configuration**: parser settings that cannot work together

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// The kind of structural violation found while tokenizing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataErrorKind {
    /// A quote appeared after literal content in an unquoted field
    QuoteNotAllowed,
    /// A closing quote was followed by something other than a delimiter or
    /// line break, or the input ended inside an open quote
    QuoteExpected,
    /// A row has a different number of fields than the header
    WrongFieldCount { found: usize, expected: usize },
    /// A line terminator with nothing before it
    EmptyLine,
}

/// Line-numbered diagnostic for a structural violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataError {
    /// 1-based line (row) number
    pub line: u64,
    pub kind: DataErrorKind,
}

impl fmt::Display for DataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            DataErrorKind::QuoteNotAllowed => write!(
                f,
                "Quote is not allowed in a not quoted field value. Line {}.",
                self.line
            ),
            DataErrorKind::QuoteExpected => write!(f, "Quote expected in line {}.", self.line),
            DataErrorKind::WrongFieldCount { found, expected } => write!(
                f,
                "Wrong number of fields({}) in line number {}. Expected {}.",
                found, self.line, expected
            ),
            DataErrorKind::EmptyLine => write!(f, "Empty line number {}", self.line),
        }
    }
}

/// The main error type for svtable operations.
#[derive(Error, Debug)]
pub enum SvError {
    /// File system related errors (read failures, seek failures, etc.)
    #[error("File operation failed: {message}")]
    FileError {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// File not found specifically (common case for user feedback)
    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Path exists but is not a regular file
    #[error("Path is not a regular file: {path}")]
    NotAFile { path: PathBuf },

    /// Permission denied accessing file
    #[error("Permission denied accessing file: {path}")]
    PermissionDenied { path: PathBuf },

    /// Encoding could not be resolved or the decoder could not make progress
    #[error("Encoding error: {message}")]
    EncodingError { message: String },

    /// The data violates the SV format contract
    #[error("Invalid data: {0}")]
    InvalidData(DataError),

    /// A parse was requested on a session that already reached end of data
    #[error("End of stream reached.")]
    EndOfData,

    /// Parser configuration that cannot work
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    /// Invalid command line arguments
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    /// The background parsing task panicked or was cancelled
    #[error("Worker task failed: {message}")]
    WorkerError { message: String },
}

/// Standard Result type for svtable operations.
pub type Result<T> = std::result::Result<T, SvError>;

impl SvError {
    /// Create a FileError from an io::Error with additional context
    pub fn file_error(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::FileError {
            message: message.into(),
            source,
        }
    }

    /// Create an InvalidData error for the given 1-based line
    pub fn invalid_data(line: u64, kind: DataErrorKind) -> Self {
        Self::InvalidData(DataError { line, kind })
    }

    /// Create an EncodingError with a descriptive message
    pub fn encoding(message: impl Into<String>) -> Self {
        Self::EncodingError {
            message: message.into(),
        }
    }

    /// Create a ConfigError with a descriptive message
    pub fn config(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    /// Create a WorkerError with a descriptive message
    pub fn worker(message: impl Into<String>) -> Self {
        Self::WorkerError {
            message: message.into(),
        }
    }
}

// Automatic conversion from io::Error to SvError
impl From<std::io::Error> for SvError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => {
                // The path is not known here; call sites with a path build
                // FileNotFound directly
                Self::FileError {
                    message: "File not found".to_string(),
                    source: err,
                }
            }
            std::io::ErrorKind::PermissionDenied => Self::FileError {
                message: "Permission denied".to_string(),
                source: err,
            },
            _ => Self::FileError {
                message: "IO operation failed".to_string(),
                source: err,
            },
        }
    }
}
