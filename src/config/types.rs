//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and configuration.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};

use crate::config::constants::{
    DEFAULT_STORE_PATH, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT, HISTORY_CAP, PULSE_DURATION,
};

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Which public geolocation service answers lookups.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ProviderKind {
    /// ip-api.com (accepts IPs and domains)
    #[value(name = "ip-api")]
    IpApi,
    /// ipwho.is
    #[value(name = "ipwhois")]
    IpWhois,
}

/// How overlapping lookups are reconciled.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ResponseOrdering {
    /// Whichever response resolves last overwrites the record.
    LastResolvedWins,
    /// Responses older than the newest applied submission are discarded.
    LatestSubmissionWins,
}

/// Library configuration (no CLI dependencies).
///
/// # Examples
///
/// ```no_run
/// use ip_tracker::Config;
/// use std::path::PathBuf;
///
/// let config = Config {
///     store_path: PathBuf::from("/tmp/tracker.json"),
///     allow_domains: false,
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Log level
    pub log_level: LogLevel,

    /// Log format
    pub log_format: LogFormat,

    /// JSON file backing the key-value store
    pub store_path: PathBuf,

    /// Geolocation service
    pub provider: ProviderKind,

    /// Overrides the provider's base URL
    pub api_base: Option<String>,

    /// Per-request timeout in seconds
    pub timeout_seconds: u64,

    /// HTTP User-Agent header value
    pub user_agent: String,

    /// Maximum number of history entries
    pub history_cap: usize,

    /// Accept domain names in addition to IP addresses
    pub allow_domains: bool,

    /// Policy for overlapping lookups
    pub response_ordering: ResponseOrdering,

    /// Duration of the "just updated" pulse in milliseconds
    pub pulse_millis: u64,
}

impl Config {
    /// Pulse duration as a `Duration`.
    pub fn pulse_duration(&self) -> Duration {
        Duration::from_millis(self.pulse_millis)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
            store_path: PathBuf::from(DEFAULT_STORE_PATH),
            provider: ProviderKind::IpApi,
            api_base: None,
            timeout_seconds: DEFAULT_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            history_cap: HISTORY_CAP,
            allow_domains: true,
            response_ordering: ResponseOrdering::LastResolvedWins,
            pulse_millis: PULSE_DURATION.as_millis() as u64,
        }
    }
}

/// Command-line options.
///
/// # Examples
///
/// ```bash
/// # Start a session with defaults
/// ip_tracker
///
/// # Use ipwho.is and keep state elsewhere
/// ip_tracker --provider ipwhois --store-path ~/.ip_tracker.json
///
/// # Look up a few addresses right away
/// ip_tracker 8.8.8.8 1.1.1.1
/// ```
#[derive(Debug, Parser)]
#[command(
    name = "ip_tracker",
    about = "Looks up the geolocation of an IP address or domain and shows it on a map."
)]
pub struct Opt {
    /// Queries to submit after the initial lookup
    #[arg(value_parser)]
    pub queries: Vec<String>,

    /// Log level: error|warn|info|debug|trace
    #[arg(long, value_enum, default_value_t = LogLevel::Warn)]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,

    /// JSON file holding search history and theme
    #[arg(long, value_parser, default_value = DEFAULT_STORE_PATH)]
    pub store_path: PathBuf,

    /// Geolocation service: ip-api|ipwhois
    #[arg(long, value_enum, default_value_t = ProviderKind::IpApi)]
    pub provider: ProviderKind,

    /// Base URL override for the geolocation service
    #[arg(long)]
    pub api_base: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_seconds: u64,

    /// HTTP User-Agent header value
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Only accept IP addresses
    #[arg(long)]
    pub no_domains: bool,

    /// Policy for overlapping lookups
    #[arg(long, value_enum, default_value_t = ResponseOrdering::LastResolvedWins)]
    pub response_ordering: ResponseOrdering,

    /// Exit after the queries given on the command line have resolved
    #[arg(long)]
    pub once: bool,
}

impl From<Opt> for Config {
    fn from(opt: Opt) -> Self {
        Self {
            log_level: opt.log_level,
            log_format: opt.log_format,
            store_path: opt.store_path,
            provider: opt.provider,
            api_base: opt.api_base,
            timeout_seconds: opt.timeout_seconds,
            user_agent: opt.user_agent,
            allow_domains: !opt.no_domains,
            response_ordering: opt.response_ordering,
            ..Default::default()
        }
    }
}
