//! Both stores driven through `BackendClient` against a mock HTTP server.

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::api::{BackendClient, User, AUTH_COOKIE_KEY};
use crate::app::{AppContext, AppState, Screen};
use crate::calendar::{CalendarEvent, EventId};
use crate::storage::{Config, FileSessionStorage, MemorySessionStorage, SessionStorage};
use crate::store::{AuthStore, EventStore, AUTH_STORAGE_KEY};

fn utc(day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, day, 0, 0, 0).unwrap()
}

fn client_for(base_url: &str) -> Arc<BackendClient> {
    Arc::new(
        BackendClient::new(&Config::default().api)
            .unwrap()
            .with_base_url(base_url),
    )
}

fn wire_event(id: u64, title: &str, start: u32, end: u32) -> serde_json::Value {
    json!({
        "id": id,
        "title": title,
        "start": utc(start).to_rfc3339(),
        "end": utc(end).to_rfc3339(),
        "color": "#123456",
    })
}

async fn loaded_store(server: &MockServer) -> EventStore {
    Mock::given(method("GET"))
        .and(path("/calendars/1/events"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "event": [wire_event(7, "Standup", 1, 2)]
        })))
        .mount(server)
        .await;

    let store = EventStore::new(client_for(&server.uri()));
    store.get_events("1").await.unwrap();
    store
}

#[tokio::test]
async fn created_event_takes_server_id() {
    let server = MockServer::start().await;
    let store = loaded_store(&server).await;
    Mock::given(method("POST"))
        .and(path("/calendars/1/events"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "event": wire_event(8, "Review", 3, 4)
        })))
        .expect(1)
        .mount(&server)
        .await;

    let draft = CalendarEvent::new(EventId::provisional(), "Review", utc(3), utc(4), "#abcdef").unwrap();
    let stored = store.create_event(draft, "1").await.unwrap();

    assert_eq!(stored.id, EventId::from(8));
    let ids: Vec<String> = store.events().iter().map(|e| e.id.to_string()).collect();
    assert_eq!(ids, vec!["7", "8"]);
}

#[tokio::test]
async fn moved_event_keeps_one_entry_and_its_color() {
    let server = MockServer::start().await;
    let store = loaded_store(&server).await;
    Mock::given(method("PUT"))
        .and(path("/calendars/1/events/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "event": {
                "id": 7,
                "title": "Standup",
                "start": utc(5).to_rfc3339(),
                "end": utc(6).to_rfc3339(),
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let moved = store
        .find(&EventId::from(7))
        .unwrap()
        .with_range(utc(5), utc(6))
        .unwrap();
    store.update_event(moved, "1").await.unwrap();

    let events = store.events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].start, utc(5));
    assert_eq!(events[0].color, "#123456");
}

#[tokio::test]
async fn deleted_event_leaves_the_list() {
    let server = MockServer::start().await;
    let store = loaded_store(&server).await;
    Mock::given(method("DELETE"))
        .and(path("/calendars/1/events/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "deleted"})))
        .expect(1)
        .mount(&server)
        .await;

    store.delete_event(&EventId::from(7), "1").await.unwrap();

    assert!(store.is_empty());
}

#[tokio::test]
async fn rejected_create_leaves_list_untouched() {
    let server = MockServer::start().await;
    let store = loaded_store(&server).await;
    Mock::given(method("POST"))
        .and(path("/calendars/1/events"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({"error": "Title is required"})))
        .mount(&server)
        .await;

    let draft = CalendarEvent::new(EventId::provisional(), "x", utc(3), utc(4), "#abcdef").unwrap();
    let err = store.create_event(draft, "1").await.unwrap_err();

    assert_eq!(err.error, "Title is required");
    assert_eq!(store.len(), 1);
}

#[tokio::test]
async fn unreachable_backend_reports_errors_as_values() {
    let client = client_for("http://127.0.0.1:9");
    let auth = AuthStore::new(client.clone(), Arc::new(MemorySessionStorage::new()));
    let events = EventStore::new(client);

    let response = auth.login(&User::new("ada@example.com", "pw")).await;
    let verify = auth.verify_code(&["1", "2", "3", "4"]).await;
    let load = events.get_events("1").await;

    assert_eq!(response.id, 0);
    assert!(response.error.is_some_and(|e| !e.is_empty()));
    assert!(verify.error().is_some());
    assert!(load.is_err());
    assert!(!auth.is_authenticated());
}

#[tokio::test]
async fn signed_in_identity_survives_restart() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/login"))
        .and(body_json(json!({"email": "ada@example.com", "password": "pw"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 12})))
        .expect(1)
        .mount(&server)
        .await;
    let dir = tempfile::tempdir().unwrap();
    let client = client_for(&server.uri());

    let first = AuthStore::new(client.clone(), Arc::new(FileSessionStorage::new(dir.path().to_path_buf())));
    let response = first.login(&User::new("ada@example.com", "pw")).await;
    assert!(response.is_success());

    let second = AuthStore::new(client, Arc::new(FileSessionStorage::new(dir.path().to_path_buf())));
    let identity = second.identity();
    assert_eq!(identity.email, "ada@example.com");
    assert_eq!(identity.id, 12);
}

fn session_config(server: &MockServer, dir: &std::path::Path) -> Config {
    let mut config = Config::default();
    config.api.base_url = server.uri();
    config.session.storage_dir = Some(dir.to_path_buf());
    config.ui.default_calendar = Some("1".to_string());
    config
}

/// Events are only served to requests carrying the login cookie.
async fn cookie_guarded_backend(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("set-cookie", "token=abc; Path=/; HttpOnly")
                .set_body_json(json!({"id": 12})),
        )
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/calendars/1/events"))
        .and(header("cookie", "token=abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "event": [wire_event(7, "Standup", 1, 2)]
        })))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/calendars/1/events"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"error": "http: named cookie not present"})),
        )
        .mount(server)
        .await;
}

#[tokio::test]
async fn restored_session_loads_calendar_after_restart() {
    let server = MockServer::start().await;
    cookie_guarded_backend(&server).await;
    let dir = tempfile::tempdir().unwrap();

    let first = AppContext::connect(session_config(&server, dir.path())).unwrap();
    let response = first.auth.login(&User::new("ada@example.com", "pw")).await;
    assert!(response.is_success());
    drop(first);

    let ctx = AppContext::connect(session_config(&server, dir.path())).unwrap();
    let mut app = AppState::new(&ctx);
    app.start(&ctx).await;

    assert_eq!(app.screen, Screen::Main);
    assert_eq!(app.status, None);
    assert_eq!(ctx.events.len(), 1);
}

#[tokio::test]
async fn expired_cookie_sends_user_back_to_sign_in() {
    let server = MockServer::start().await;
    cookie_guarded_backend(&server).await;
    let dir = tempfile::tempdir().unwrap();
    let storage = FileSessionStorage::new(dir.path().to_path_buf());
    storage
        .set(AUTH_STORAGE_KEY, r#"{"email":"ada@example.com","id":12}"#)
        .unwrap();
    storage.set(AUTH_COOKIE_KEY, "token=stale").unwrap();

    let ctx = AppContext::connect(session_config(&server, dir.path())).unwrap();
    let mut app = AppState::new(&ctx);
    assert_eq!(app.screen, Screen::Main);
    app.start(&ctx).await;

    assert_eq!(app.screen, Screen::Auth);
    assert!(app.status.as_ref().is_some_and(|s| s.is_error()));
    assert_eq!(storage.get(AUTH_STORAGE_KEY).unwrap(), None);
    assert_eq!(storage.get(AUTH_COOKIE_KEY).unwrap(), None);
    assert_eq!(AppState::new(&ctx).screen, Screen::Auth);
}
