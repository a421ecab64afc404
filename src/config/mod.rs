//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (history cap, storage keys, endpoints, map defaults)
//! - Library configuration (`Config`) and CLI option types (`Opt`)

mod constants;
mod types;

// Re-export all constants
pub use constants::*;
pub use types::{Config, LogFormat, LogLevel, Opt, ProviderKind, ResponseOrdering};
