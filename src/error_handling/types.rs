//! Error type definitions.

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),

    /// The configured provider base URL could not be parsed.
    #[error("Invalid provider base URL '{0}'")]
    BaseUrlError(String),
}

/// A query rejected before any network call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The query matches none of the accepted address patterns.
    #[error("'{0}' is not a valid IP address or domain")]
    InvalidFormat(String),
}

/// Transport failure categories, derived from `reqwest` errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum TransportErrorKind {
    Builder,
    Connect,
    Timeout,
    HttpStatus,
    Decode,
    Other,
}

impl std::fmt::Display for TransportErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TransportErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransportErrorKind::Builder => "HTTP request builder error",
            TransportErrorKind::Connect => "HTTP connect error",
            TransportErrorKind::Timeout => "HTTP timeout",
            TransportErrorKind::HttpStatus => "HTTP status error",
            TransportErrorKind::Decode => "Response decode error",
            TransportErrorKind::Other => "HTTP request error",
        }
    }
}

/// Failure of a single lookup.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LookupError {
    /// The request could not complete or returned a non-success status.
    #[error("{kind}: {message}")]
    Transport {
        kind: TransportErrorKind,
        message: String,
    },

    /// The service answered but reported no match for the query.
    #[error("No location found: {0}")]
    NotFound(String),
}

impl LookupError {
    /// True for the service-reported "not found" outcome.
    pub fn is_not_found(&self) -> bool {
        matches!(self, LookupError::NotFound(_))
    }
}

impl From<ReqwestError> for LookupError {
    fn from(err: ReqwestError) -> Self {
        LookupError::Transport {
            kind: super::categorize_reqwest_error(&err),
            message: err.to_string(),
        }
    }
}

/// Error types for the key-value store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Reading or writing the backing file failed.
    #[error("Store I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The backing file is not a JSON object of strings.
    #[error("Store serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The in-memory map lock was poisoned.
    #[error("Store lock poisoned")]
    LockPoisoned,
}
