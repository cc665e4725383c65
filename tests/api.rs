//! HTTP surface driven through `tower::ServiceExt::oneshot`

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use futures::StreamExt;
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

use stage_timer::config::Policies;
use stage_timer::services::StaticDisplays;
use stage_timer::store::StateStore;
use stage_timer::tasks::SystemClock;
use stage_timer::{create_router, AppState, Controller};

fn app(dir: &TempDir) -> (Router, Arc<AppState>) {
    let controller = Controller::new(
        StateStore::new(dir.path().join("state.json")),
        Box::new(StaticDisplays::single_primary()),
        Policies::default(),
    );
    let state = Arc::new(AppState::new(
        controller,
        Arc::new(SystemClock),
        20554,
        "127.0.0.1".to_string(),
    ));
    (create_router(Arc::clone(&state)), state)
}

fn post(uri: &str, body: Value) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn get_json(router: &Router, uri: &str) -> Value {
    let response = router
        .clone()
        .oneshot(Request::get(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn control_commands_are_accepted() {
    let dir = TempDir::new().unwrap();
    let (router, _state) = app(&dir);

    let response = router
        .clone()
        .oneshot(post("/timer/control", json!({"action": "start"})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::ACCEPTED);

    let snapshot = get_json(&router, "/state").await;
    assert_eq!(snapshot["timer"]["running"], true);
    assert_eq!(snapshot["timer"]["paused"], false);
}

#[tokio::test]
async fn bad_fields_are_ignored_not_rejected() {
    let dir = TempDir::new().unwrap();
    let (router, _state) = app(&dir);

    let response = router
        .clone()
        .oneshot(post(
            "/overlay",
            json!({"fontSizePx": "huge", "color": "#12345", "showClock": true}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::ACCEPTED);

    let snapshot = get_json(&router, "/state").await;
    assert_eq!(snapshot["overlay"]["fontSizePx"], 120);
    assert_eq!(snapshot["overlay"]["colorHex"], "#FFFFFF");
    assert_eq!(snapshot["overlay"]["showClock"], true);
}

#[tokio::test]
async fn malformed_body_never_reaches_the_core() {
    let dir = TempDir::new().unwrap();
    let (router, _state) = app(&dir);

    let request = Request::post("/cue")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = router.clone().oneshot(request).await.unwrap();
    assert!(response.status().is_client_error());

    let snapshot = get_json(&router, "/state").await;
    assert_eq!(snapshot["overlay"]["cueText"], "");
}

#[tokio::test]
async fn displays_and_health() {
    let dir = TempDir::new().unwrap();
    let (router, _state) = app(&dir);

    let displays = get_json(&router, "/displays").await;
    assert_eq!(displays[0]["id"], 1);
    assert_eq!(displays[0]["name"], "Primary");
    assert_eq!(displays[0]["workArea"]["width"], 1920);

    let health = get_json(&router, "/health").await;
    assert_eq!(health["status"], "ok");
    assert_eq!(health["channels"], 0);
}

#[tokio::test]
async fn event_stream_starts_with_full_sync() {
    let dir = TempDir::new().unwrap();
    let (router, state) = app(&dir);

    let response = router
        .oneshot(Request::get("/events").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "text/event-stream"
    );
    assert_eq!(state.channel_count().unwrap(), 1);

    let mut body = response.into_body().into_data_stream();
    let first = body.next().await.unwrap().unwrap();
    let text = String::from_utf8(first.to_vec()).unwrap();
    assert!(text.starts_with("event: state:sync\n"));
    assert!(text.contains("\"displays\""));

    drop(body);
    assert_eq!(state.channel_count().unwrap(), 0);
}
