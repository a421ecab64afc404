//! End-to-end tests: controller, HTTP provider and JSON file store together.

mod helpers;

use std::sync::Arc;

use serde_json::json;
use tempfile::TempDir;
use wiremock::MockServer;

use helpers::{create_provider, create_test_config, ip_api_google, ip_api_self, mount_json, store_path};
use ip_tracker::config::ProviderKind;
use ip_tracker::controller::{LookupOutcome, Submission};
use ip_tracker::map::{MapProps, MapView};
use ip_tracker::config::HISTORY_KEY;
use ip_tracker::storage::{JsonFileStore, KeyValueStore};
use ip_tracker::{ControllerEvent, QueryController};

async fn wait_for(submission: Submission) -> LookupOutcome {
    match submission {
        Submission::Dispatched(handle) => handle.wait().await.expect("lookup task panicked"),
        Submission::Rejected(e) => panic!("query rejected: {e}"),
    }
}

#[tokio::test]
async fn test_lookup_updates_record_history_and_store() {
    let server = MockServer::start().await;
    mount_json(&server, "/json", ip_api_self()).await;
    mount_json(&server, "/json/8.8.8.8", ip_api_google()).await;
    let dir = TempDir::new().unwrap();
    let config = create_test_config(&server, &dir, ProviderKind::IpApi);

    let store = Arc::new(JsonFileStore::open(store_path(&dir)).unwrap());
    let (controller, _events) = QueryController::new(create_provider(&config), store, &config);

    controller.initial_load().wait().await.unwrap();
    assert_eq!(controller.record().ip, "203.0.113.7");
    assert!(controller.history().is_empty());

    let outcome = wait_for(controller.submit("8.8.8.8")).await;
    assert!(matches!(outcome, LookupOutcome::Applied(_)));
    let record = controller.record();
    assert_eq!(record.ip, "8.8.8.8");
    assert_eq!(record.location_label(), "Mountain View, United States");
    assert_eq!(controller.history(), vec!["8.8.8.8".to_string()]);

    // A fresh store over the same file sees the persisted history
    let reopened = JsonFileStore::open(store_path(&dir)).unwrap();
    let raw = reopened.get(HISTORY_KEY).unwrap().expect("history persisted");
    let persisted: Vec<String> = serde_json::from_str(&raw).unwrap();
    assert_eq!(persisted, vec!["8.8.8.8".to_string()]);

    let mut view = MapView::new();
    let frame = view
        .render(&MapProps::from_snapshot(&controller.snapshot()))
        .expect("coordinates present");
    assert_eq!(frame.center.latitude, 37.4056);
    assert_eq!(frame.marker.popup, "8.8.8.8 / Mountain View, United States");
}

#[tokio::test]
async fn test_history_and_theme_survive_restart() {
    let server = MockServer::start().await;
    mount_json(&server, "/json/8.8.8.8", ip_api_google()).await;
    mount_json(&server, "/json/1.1.1.1", ip_api_google()).await;
    let dir = TempDir::new().unwrap();
    let config = create_test_config(&server, &dir, ProviderKind::IpApi);

    let theme = {
        let store = Arc::new(JsonFileStore::open(store_path(&dir)).unwrap());
        let (controller, _events) =
            QueryController::new(create_provider(&config), store, &config);
        wait_for(controller.submit("8.8.8.8")).await;
        wait_for(controller.submit("1.1.1.1")).await;
        controller.toggle_theme()
    };

    let store = Arc::new(JsonFileStore::open(store_path(&dir)).unwrap());
    let (controller, _events) = QueryController::new(create_provider(&config), store, &config);
    assert_eq!(
        controller.history(),
        vec!["1.1.1.1".to_string(), "8.8.8.8".to_string()]
    );
    assert_eq!(controller.theme(), theme);

    controller.clear_history();
    let reopened = JsonFileStore::open(store_path(&dir)).unwrap();
    assert_eq!(reopened.get(HISTORY_KEY).unwrap(), None);
}

#[tokio::test]
async fn test_not_found_keeps_previous_record() {
    let server = MockServer::start().await;
    mount_json(&server, "/json/8.8.8.8", ip_api_google()).await;
    mount_json(
        &server,
        "/json/10.0.0.1",
        json!({"status": "fail", "message": "private range"}),
    )
    .await;
    let dir = TempDir::new().unwrap();
    let config = create_test_config(&server, &dir, ProviderKind::IpApi);
    let store = Arc::new(JsonFileStore::open(store_path(&dir)).unwrap());
    let (controller, mut events) = QueryController::new(create_provider(&config), store, &config);

    wait_for(controller.submit("8.8.8.8")).await;
    let outcome = wait_for(controller.submit("10.0.0.1")).await;
    assert!(matches!(outcome, LookupOutcome::Failed(_)));
    assert_eq!(controller.record().ip, "8.8.8.8");
    // The query was valid, so it stays in the history
    assert_eq!(controller.history()[0], "10.0.0.1");

    let mut toasts = Vec::new();
    while let Ok(event) = events.try_recv() {
        if let ControllerEvent::Notify(n) = event {
            toasts.push(n.message);
        }
    }
    assert_eq!(
        toasts,
        vec!["No location found for 10.0.0.1 (private range)".to_string()]
    );
}

#[tokio::test]
async fn test_invalid_query_never_reaches_service() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let config = create_test_config(&server, &dir, ProviderKind::IpApi);
    let store = Arc::new(JsonFileStore::open(store_path(&dir)).unwrap());
    let (controller, _events) = QueryController::new(create_provider(&config), store, &config);

    assert!(!controller.submit("not an ip").is_dispatched());
    assert!(!controller.submit("999.1").is_dispatched());
    assert!(controller.history().is_empty());
    assert_eq!(controller.stats().issued, 0);
    assert!(server.received_requests().await.unwrap_or_default().is_empty());
}
