//! Status Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.

use derive_more::{Display, Error};
use std::io::Error as IoError;
use std::path::PathBuf;

/// A status-check error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for status-check operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong
/// internally. Every error is local to a single check invocation; nothing
/// here cascades or poisons later checks.
#[derive(Debug, Display, Error)]
pub enum ErrorKind {
    /// No file exists at the resolved path
    #[display("file not found: {}", _0.display())]
    NotFound(#[error(not(source))] PathBuf),
    /// Metadata for the resolved path could not be read
    #[display("permission denied: {}", _0.display())]
    PermissionDenied(#[error(not(source))] PathBuf),
    /// Storage box has no `location` option configured
    #[display("storage box `{_0}` has no location option")]
    MissingLocation(#[error(not(source))] String),
    /// The configured `location` option is not an absolute path
    #[display("invalid storage location: {}", _0.display())]
    InvalidLocation(#[error(not(source))] PathBuf),
    /// Relative path contains invalid characters or escapes the location
    #[display("invalid path: {}", _0.display())]
    InvalidPath(#[error(not(source))] PathBuf),
    /// Check attempted on a file record the host has not verified
    #[display("file record `{_0}` is not verified")]
    Unverified(#[error(not(source))] String),
    /// Underlying I/O error
    #[display("I/O error: {_0}")]
    Io(IoError),
}

impl From<IoError> for ErrorKind {
    fn from(err: IoError) -> Self {
        Self::Io(err)
    }
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Io(_))
    }
}
