use std::sync::Arc;
use std::time::Duration;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use futures::StreamExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use trapdoor::state::{AppState, CountdownEngine};
use trapdoor::{create_router, TriggerAction};

fn router(seconds: u64) -> Router {
    let engine = CountdownEngine::new(
        seconds,
        TriggerAction::new("/nonexistent/trapdoor/on_complete.sh"),
    )
    .with_push_interval(Duration::from_millis(50));
    create_router(Arc::new(AppState::new(engine, 5001, "127.0.0.1".to_string())))
}

async fn call(app: &Router, method: &str, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, body)
}

#[tokio::test]
async fn status_reports_the_initial_countdown() {
    let app = router(60);
    let (status, body) = call(&app, "GET", "/status").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["running"], false);
    assert_eq!(body["current_time"], 60);
    assert_eq!(body["initial_time"], 60);
    assert_eq!(body["triggered"], false);
    assert!(body["trigger_success"].is_null());
    assert!(body["trigger_error"].is_null());
}

#[tokio::test]
async fn start_twice_reports_already_running() {
    let app = router(60);

    let (_, body) = call(&app, "POST", "/start").await;
    assert_eq!(body, json!({ "status": "started" }));

    let (_, body) = call(&app, "POST", "/start").await;
    assert_eq!(body, json!({ "status": "already running" }));

    let (_, body) = call(&app, "GET", "/status").await;
    assert_eq!(body["running"], true);
}

#[tokio::test]
async fn set_time_is_refused_while_running() {
    let app = router(60);
    call(&app, "POST", "/start").await;

    let (status, body) = call(&app, "POST", "/set_time/10").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "error", "message": "Cannot set time while running" }));

    let (_, body) = call(&app, "GET", "/status").await;
    assert_eq!(body["initial_time"], 60);
}

#[tokio::test]
async fn stop_reset_and_set_time_while_idle() {
    let app = router(60);

    for _ in 0..2 {
        let (_, body) = call(&app, "POST", "/stop").await;
        assert_eq!(body, json!({ "status": "stopped" }));
    }

    let (_, body) = call(&app, "POST", "/set_time/15").await;
    assert_eq!(body, json!({ "status": "time set", "seconds": 15 }));

    let (_, body) = call(&app, "POST", "/reset").await;
    assert_eq!(body, json!({ "status": "reset" }));

    let (_, body) = call(&app, "GET", "/status").await;
    assert_eq!(body["current_time"], 15);
    assert_eq!(body["initial_time"], 15);
    assert_eq!(body["running"], false);
}

#[tokio::test]
async fn set_time_rejects_non_integers() {
    let app = router(60);

    let (status, _) = call(&app, "POST", "/set_time/soon").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = call(&app, "POST", "/set_time/-3").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn health_reports_version() {
    let app = router(60);
    let (status, body) = call(&app, "GET", "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn stream_pushes_live_updates() {
    let app = router(42);
    let request = Request::builder().uri("/stream").body(Body::empty()).unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["content-type"], "text/event-stream");

    let mut body = response.into_body().into_data_stream();
    let mut frames = Vec::new();
    while frames.len() < 2 {
        let chunk = tokio::time::timeout(Duration::from_secs(2), body.next())
            .await
            .expect("timed out waiting for live update")
            .expect("stream ended")
            .unwrap();
        let text = String::from_utf8(chunk.to_vec()).unwrap();
        if text.starts_with("data:") {
            frames.push(text);
        }
    }

    for frame in frames {
        let payload: Value =
            serde_json::from_str(frame.trim_start_matches("data:").trim()).unwrap();
        assert_eq!(payload, json!({ "running": false, "current_time": 42 }));
    }
}
