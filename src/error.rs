//! Error taxonomy.
//!
//! Every fallible operation returns [`FitError`]. The two primary categories
//! are malformed arguments and malformed instance text; I/O failures while
//! reading an instance file are kept separate so callers can tell a bad path
//! from bad content.

use std::path::PathBuf;

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type FitResult<T> = Result<T, FitError>;

/// Errors raised while building or querying a fitting problem.
#[derive(Debug, Error)]
pub enum FitError {
    /// Missing or mismatched observation arrays, malformed candidates, or
    /// invalid configuration values.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Instance text violates the count or numeric-token contract.
    #[error("instance format error: {0}")]
    Format(String),

    /// The instance file could not be read.
    #[error("failed to read instance '{}'", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Coarse error category, for callers that only branch on the kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidArgument,
    Format,
    Io,
}

impl FitError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    pub fn format(message: impl Into<String>) -> Self {
        Self::Format(message.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            FitError::InvalidArgument(_) => ErrorKind::InvalidArgument,
            FitError::Format(_) => ErrorKind::Format,
            FitError::Io { .. } => ErrorKind::Io,
        }
    }
}
