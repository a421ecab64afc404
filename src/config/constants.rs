//! Configuration constants.
//!
//! This module defines the constants used throughout the application:
//! history limits, storage keys, provider endpoints and map defaults.

use std::time::Duration;

/// Maximum number of entries kept in the search history.
pub const HISTORY_CAP: usize = 4;

/// How long the "just updated" pulse stays on after a successful lookup.
pub const PULSE_DURATION: Duration = Duration::from_millis(1000);

/// Store key holding the search history (JSON array of strings).
pub const HISTORY_KEY: &str = "searchHistory";

/// Store key holding the theme preference (`"light"` or `"dark"`).
pub const THEME_KEY: &str = "theme";

/// Default location of the JSON key-value store.
pub const DEFAULT_STORE_PATH: &str = "./ip_tracker.json";

/// Per-request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Default User-Agent string for lookup requests.
pub const DEFAULT_USER_AGENT: &str = concat!("ip_tracker/", env!("CARGO_PKG_VERSION"));

// Provider endpoints
/// ip-api.com base URL (free tier is HTTP only)
pub const IP_API_BASE: &str = "http://ip-api.com";
/// ipwho.is base URL
pub const IPWHOIS_BASE: &str = "https://ipwho.is";

// Map defaults
/// Zoom level the map starts at
pub const DEFAULT_ZOOM: u8 = 13;
/// Highest zoom level the basemap serves
pub const MAX_ZOOM: u8 = 20;
/// Basemap tile template; `{style}` is replaced per theme.
pub const TILE_URL_TEMPLATE: &str =
    "https://{s}.basemaps.cartocdn.com/rastertiles/{style}/{z}/{x}/{y}{r}.png";
/// Basemap style used with the dark theme
pub const TILE_STYLE_DARK: &str = "dark_all";
/// Basemap style used with the light theme
pub const TILE_STYLE_LIGHT: &str = "voyager";
/// Attribution required by the basemap provider
pub const TILE_ATTRIBUTION: &str = "© OpenStreetMap contributors © CARTO";
