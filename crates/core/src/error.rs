//! Error types for SiteState
//!
//! This module defines all error types used throughout the system.
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.
//!
//! Store operations never surface these errors to end users. The store adapter
//! catches them at its boundary and reports only the [`ErrorKind`] alongside a
//! safe default, so callers can still see what went wrong.

use std::io;
use thiserror::Error;

/// Result type alias for SiteState operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for SiteState
#[derive(Debug, Error)]
pub enum Error {
    /// Stored text could not be encoded or decoded as JSON
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// A write would push the namespace past its byte quota
    #[error("Quota exceeded writing '{key}': {required} bytes required, {quota} bytes allowed")]
    QuotaExceeded {
        /// Key being written
        key: String,
        /// Namespace size in bytes if the write went through
        required: usize,
        /// Configured quota in bytes
        quota: usize,
    },

    /// The underlying storage refused access
    #[error("Access denied: {0}")]
    AccessDenied(String),

    /// I/O error (file-backed namespaces)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// On-disk data could not be understood
    #[error("Data corruption: {0}")]
    Corruption(String),

    /// Caller supplied an invalid argument
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Configuration file could not be read, parsed or written
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Coarse classification of an [`Error`]
///
/// This is what the store adapter hands back next to its degraded result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed stored text or unencodable value
    Serialization,
    /// Byte quota exceeded
    Quota,
    /// Storage unavailable or access denied (includes I/O failures)
    Access,
    /// Invalid caller input
    InvalidInput,
    /// Configuration problem
    Config,
}

impl Error {
    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Serialization(_) | Error::Corruption(_) => ErrorKind::Serialization,
            Error::QuotaExceeded { .. } => ErrorKind::Quota,
            Error::AccessDenied(_) | Error::Io(_) => ErrorKind::Access,
            Error::InvalidInput(_) => ErrorKind::InvalidInput,
            Error::Config(_) => ErrorKind::Config,
        }
    }

    /// Create an access-denied error
    pub fn access_denied(msg: impl Into<String>) -> Self {
        Error::AccessDenied(msg.into())
    }

    /// Create an invalid-input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Error::InvalidInput(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Error::Config(msg.into())
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}
