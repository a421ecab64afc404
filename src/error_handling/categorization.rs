//! Error categorization.

use super::types::TransportErrorKind;

/// Categorizes a `reqwest::Error` into a `TransportErrorKind`.
///
/// Status errors are checked first since `error_for_status` produces them,
/// then the remaining `reqwest` error classes.
pub fn categorize_reqwest_error(error: &reqwest::Error) -> TransportErrorKind {
    if error.status().is_some() || error.is_status() {
        return TransportErrorKind::HttpStatus;
    }

    if error.is_builder() {
        TransportErrorKind::Builder
    } else if error.is_timeout() {
        TransportErrorKind::Timeout
    } else if error.is_connect() {
        TransportErrorKind::Connect
    } else if error.is_decode() {
        TransportErrorKind::Decode
    } else {
        TransportErrorKind::Other
    }
}
