//! Geolocation lookups over public REST services.
//!
//! Every service sits behind the `GeoProvider` trait: given an optional target
//! (IP, domain, or `None` for the caller's own address) it returns a
//! `LocationRecord` or a typed `LookupError`. Service-specific field paths are
//! confined to the adapters.

mod ip_api;
mod ipwhois;
mod provider;
mod types;

// Re-export public API
pub use ip_api::IpApiProvider;
pub use ipwhois::IpWhoisProvider;
pub use provider::{init_provider, GeoProvider, Provider};
pub use types::{LocationRecord, UNKNOWN};
