//! Tests for a non-interactive session run against a mock service.

mod helpers;

use serde_json::json;
use tempfile::TempDir;
use wiremock::MockServer;

use helpers::{create_test_config, ip_api_google, ip_api_self, mount_json, store_path};
use ip_tracker::config::ProviderKind;
use ip_tracker::storage::{load_history, JsonFileStore};
use ip_tracker::{run_session, SessionOptions, SessionReport};

#[tokio::test]
async fn test_run_session_once() {
    let server = MockServer::start().await;
    mount_json(&server, "/json", ip_api_self()).await;
    mount_json(&server, "/json/8.8.8.8", ip_api_google()).await;
    mount_json(
        &server,
        "/json/unknown.invalid",
        json!({"status": "fail", "message": "invalid query"}),
    )
    .await;
    let dir = TempDir::new().unwrap();
    let config = create_test_config(&server, &dir, ProviderKind::IpApi);

    let options = SessionOptions {
        queries: vec![
            "8.8.8.8".to_string(),
            "unknown.invalid".to_string(),
            "bad query".to_string(),
        ],
        once: true,
    };
    let report = run_session(config, options).await.expect("session runs");

    assert_eq!(
        report,
        SessionReport {
            lookups_issued: 3,
            lookups_succeeded: 2,
            lookups_failed: 1,
            lookups_discarded: 0,
            validation_rejections: 1,
        }
    );

    let store = JsonFileStore::open(store_path(&dir)).unwrap();
    let history = load_history(&store, 4);
    assert_eq!(
        history.entries(),
        &["unknown.invalid".to_string(), "8.8.8.8".to_string()]
    );
}

#[tokio::test]
async fn test_run_session_rejects_bad_base_url() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let mut config = create_test_config(&server, &dir, ProviderKind::IpApi);
    config.api_base = Some("not a url".to_string());

    let err = run_session(config, SessionOptions::default())
        .await
        .unwrap_err();
    assert!(format!("{err:#}").contains("geolocation provider"));
}
