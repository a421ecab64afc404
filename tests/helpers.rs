// Shared test helpers for mock geolocation services and store setup.

use std::path::PathBuf;
use std::sync::Arc;

use serde_json::{json, Value};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use ip_tracker::config::{LogFormat, LogLevel, ProviderKind, ResponseOrdering};
use ip_tracker::geolocation::{init_provider, Provider};
use ip_tracker::initialization::init_client;
use ip_tracker::Config;

/// ip-api.com style body for Google's public resolver.
#[allow(dead_code)]
pub fn ip_api_google() -> Value {
    json!({
        "status": "success",
        "country": "United States",
        "countryCode": "US",
        "regionName": "California",
        "city": "Mountain View",
        "zip": "94043",
        "lat": 37.4056,
        "lon": -122.0775,
        "isp": "Google LLC",
        "query": "8.8.8.8"
    })
}

/// ip-api.com style body for the caller's own address.
#[allow(dead_code)]
pub fn ip_api_self() -> Value {
    json!({
        "status": "success",
        "country": "Portugal",
        "city": "Lisbon",
        "zip": "1000-001",
        "lat": 38.7223,
        "lon": -9.1393,
        "isp": "Example Telecom",
        "query": "203.0.113.7"
    })
}

/// Mounts `body` as the answer to `GET {route}`.
#[allow(dead_code)]
pub async fn mount_json(server: &MockServer, route: &str, body: Value) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

/// Creates a Config pointing at the mock server with state in `dir`.
#[allow(dead_code)]
pub fn create_test_config(server: &MockServer, dir: &TempDir, provider: ProviderKind) -> Config {
    Config {
        log_level: LogLevel::Error, // Reduce noise in tests
        log_format: LogFormat::Plain,
        store_path: store_path(dir),
        provider,
        api_base: Some(server.uri()),
        timeout_seconds: 5,
        user_agent: "ip_tracker_test/1.0".to_string(),
        history_cap: 4,
        allow_domains: true,
        response_ordering: ResponseOrdering::LastResolvedWins,
        pulse_millis: 50,
    }
}

#[allow(dead_code)]
pub fn store_path(dir: &TempDir) -> PathBuf {
    dir.path().join("ip_tracker.json")
}

/// Builds the provider the way the session does.
#[allow(dead_code)]
pub fn create_provider(config: &Config) -> Provider {
    let client = init_client(config).expect("Failed to build HTTP client");
    init_provider(config, Arc::clone(&client)).expect("Failed to build provider")
}
