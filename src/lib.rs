//! ip_tracker library: IP address and domain geolocation
//!
//! This library resolves an IP address or domain to a location record through a
//! public geolocation service, keeps a short persisted search history and a
//! theme preference, and turns the current record into a map frame.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use ip_tracker::geolocation::init_provider;
//! use ip_tracker::initialization::init_client;
//! use ip_tracker::storage::MemoryStore;
//! use ip_tracker::{Config, QueryController};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::default();
//! let client = init_client(&config)?;
//! let provider = init_provider(&config, client)?;
//! let (controller, _events) =
//!     QueryController::new(provider, Arc::new(MemoryStore::new()), &config);
//!
//! if let ip_tracker::controller::Submission::Dispatched(handle) = controller.submit("8.8.8.8") {
//!     handle.wait().await?;
//! }
//! println!("{}", controller.record());
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! Lookups are spawned onto a Tokio runtime. Use `#[tokio::main]` in your
//! application or call the controller from within an async context.

pub mod app;
pub mod config;
pub mod controller;
pub mod error_handling;
pub mod geolocation;
pub mod initialization;
pub mod map;
pub mod storage;
pub mod validation;

// Re-export public API
pub use app::{run_session, SessionOptions, SessionReport};
pub use config::{Config, LogFormat, LogLevel, Opt};
pub use controller::{ControllerEvent, QueryController};
pub use geolocation::LocationRecord;
