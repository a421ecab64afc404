//! Error types and error categorization.
//!
//! Errors are split by where they surface:
//! - **Validation**: malformed query, caught before any network call
//! - **Lookup**: transport failure or a service-reported "not found"
//! - **Store**: persistence port failures (logged, never fatal)
//! - **Initialization**: logger and HTTP client setup

mod categorization;
mod types;

// Re-export public API
pub use categorization::categorize_reqwest_error;
pub use types::{
    InitializationError, LookupError, StoreError, TransportErrorKind, ValidationError,
};
