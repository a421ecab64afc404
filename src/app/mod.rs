//! Terminal front end.
//!
//! This module hosts the controller in a line-oriented session: command
//! parsing, rendering of the info card and map frame, and the event loop.

pub mod command;
pub mod render;
pub mod session;

// Re-export public API
pub use command::{parse_command, Command};
pub use session::{drive, run_session, SessionOptions, SessionReport};
