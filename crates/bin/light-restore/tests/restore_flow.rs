//! End-to-end restore runs through the Home Assistant adapter.
//!
//! Each test binds a fake Home Assistant on an ephemeral port, wires the real
//! REST client into the real restore service and inspects the service calls
//! the fake received.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::{DateTime, Local, TimeDelta};
use light_restore_adapter_hass::{HassClient, HassConfig};
use light_restore_app::services::restore_service::RestoreService;
use light_restore_app::settings::RestoreSettings;
use light_restore_domain::night_window::NightWindow;
use serde_json::{Value, json};
use url::Url;

#[derive(Default)]
struct Hub {
    uptime: Mutex<String>,
    history_end_times: Mutex<Vec<String>>,
    calls: Mutex<Vec<(String, String)>>,
}

type Shared = Arc<Hub>;

fn light_states() -> Vec<Value> {
    vec![
        json!({ "entity_id": "light.a", "state": "off", "attributes": {} }),
        json!({ "entity_id": "light.b", "state": "on", "attributes": {} }),
        json!({ "entity_id": "light.c", "state": "off", "attributes": {} }),
        json!({
            "entity_id": "light.group_x",
            "state": "on",
            "attributes": { "entity_id": ["light.a", "light.b"] }
        }),
        json!({ "entity_id": "light.porch", "state": "off", "attributes": {} }),
    ]
}

async fn api_root() -> Json<Value> {
    Json(json!({ "message": "API running." }))
}

async fn list_states(State(hub): State<Shared>) -> Json<Value> {
    let mut states = light_states();
    states.push(json!({
        "entity_id": "sensor.time_online",
        "state": hub.uptime.lock().unwrap().clone(),
        "attributes": { "unit_of_measurement": "minutes" }
    }));
    Json(Value::Array(states))
}

async fn one_state(State(hub): State<Shared>, Path(entity_id): Path<String>) -> Response {
    let Json(all) = list_states(State(hub)).await;
    all.as_array()
        .into_iter()
        .flatten()
        .find(|state| state["entity_id"] == entity_id.as_str())
        .cloned()
        .map_or_else(
            || StatusCode::NOT_FOUND.into_response(),
            |state| Json(state).into_response(),
        )
}

async fn history(
    State(hub): State<Shared>,
    Path(_start): Path<String>,
    Query(query): Query<BTreeMap<String, String>>,
) -> Json<Value> {
    if let Some(end) = query.get("end_time") {
        hub.history_end_times.lock().unwrap().push(end.clone());
    }
    let last = match query.get("filter_entity_id").map(String::as_str) {
        Some("light.a") => "on",
        Some("light.b") => "unavailable",
        _ => return Json(json!([])),
    };
    Json(json!([[
        { "state": "off", "last_changed": "2024-05-01T06:00:00+00:00" },
        { "state": last, "last_changed": "2024-05-01T19:30:00+00:00" }
    ]]))
}

async fn call_service(
    State(hub): State<Shared>,
    Path((_domain, service)): Path<(String, String)>,
    Json(body): Json<Value>,
) -> Json<Value> {
    let entity_id = body["entity_id"].as_str().unwrap_or_default().to_string();
    hub.calls.lock().unwrap().push((entity_id, service));
    Json(json!([]))
}

async fn spawn_hub(uptime: &str) -> (Url, Shared) {
    let hub = Shared::default();
    *hub.uptime.lock().unwrap() = uptime.to_string();
    let app = Router::new()
        .route("/api/", get(api_root))
        .route("/api/states", get(list_states))
        .route("/api/states/{entity_id}", get(one_state))
        .route("/api/history/period/{start}", get(history))
        .route("/api/services/{domain}/{service}", post(call_service))
        .with_state(hub.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (Url::parse(&format!("http://{addr}")).unwrap(), hub)
}

async fn ready_client(url: Url) -> HassClient {
    let config = HassConfig {
        url,
        ..HassConfig::default()
    };
    let client = HassClient::new(&config, "token").unwrap();
    client
        .wait_until_ready(3, Duration::from_millis(10))
        .await
        .unwrap();
    client
}

fn settings() -> RestoreSettings {
    RestoreSettings {
        ignored_entities: BTreeSet::from(["light.porch".to_string()]),
        ..RestoreSettings::default()
    }
}

fn calls(hub: &Hub) -> BTreeMap<String, String> {
    hub.calls.lock().unwrap().iter().cloned().collect()
}

#[tokio::test]
async fn should_restore_lights_from_history() {
    let (url, hub) = spawn_hub("5").await;
    let service = RestoreService::new(ready_client(url).await, settings());

    let report = service.run().await.unwrap();

    assert!(!report.night_mode);
    assert!(report.is_clean());
    assert_eq!(report.turned_on, vec!["light.a"]);
    assert_eq!(report.turned_off, vec!["light.b", "light.c"]);

    let calls = calls(&hub);
    assert_eq!(calls.len(), 3);
    assert_eq!(calls["light.a"], "turn_on");
    assert_eq!(calls["light.b"], "turn_off");
    assert_eq!(calls["light.c"], "turn_off");
    assert!(!calls.contains_key("light.group_x"));
    assert!(!calls.contains_key("light.porch"));
}

#[tokio::test]
async fn should_end_history_window_at_restart_instant() {
    let (url, hub) = spawn_hub("5").await;
    let service = RestoreService::new(ready_client(url).await, settings());

    service.run().await.unwrap();

    let expected = Local::now() - TimeDelta::seconds(300);
    let end_times = hub.history_end_times.lock().unwrap();
    assert_eq!(end_times.len(), 3);
    for end in end_times.iter() {
        let end = DateTime::parse_from_rfc3339(end).unwrap();
        let drift = (end.with_timezone(&Local) - expected).num_seconds().abs();
        assert!(drift < 30, "history end {end} too far from restart");
    }
}

#[tokio::test]
async fn should_force_everything_off_inside_night_window() {
    let (url, hub) = spawn_hub("not-a-number").await;
    let now = Local::now().time();
    let settings = RestoreSettings {
        night_window: Some(NightWindow::new(
            now - TimeDelta::hours(1),
            now + TimeDelta::hours(1),
        )),
        ..settings()
    };
    let service = RestoreService::new(ready_client(url).await, settings);

    let report = service.run().await.unwrap();

    assert!(report.night_mode);
    assert!(report.turned_on.is_empty());
    assert_eq!(report.turned_off, vec!["light.a", "light.b", "light.c"]);
    assert!(hub.history_end_times.lock().unwrap().is_empty());
    assert!(calls(&hub).values().all(|service| service == "turn_off"));
}

#[tokio::test]
async fn should_abort_without_commands_when_uptime_unreadable() {
    let (url, hub) = spawn_hub("unknown").await;
    let service = RestoreService::new(ready_client(url).await, settings());

    assert!(service.run().await.is_err());
    assert!(calls(&hub).is_empty());
}
