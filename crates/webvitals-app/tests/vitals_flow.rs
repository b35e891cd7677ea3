//! 수집 → 저장 → 요약 통합 테스트.
//!
//! 실제 파일 저장소와 라우터를 연결해 HTTP 경계에서 검증.

use axum::body::{to_bytes, Body};
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use chrono::Utc;
use serde_json::{json, Value};
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;
use webvitals_core::config::VitalsConfig;
use webvitals_core::ports::day_log::DayLog;
use webvitals_storage::JsonDayLog;
use webvitals_web::{build_router, AppState};

async fn setup() -> (TempDir, Arc<JsonDayLog>, Router) {
    let temp_dir = TempDir::new().unwrap();
    let log = Arc::new(JsonDayLog::new(temp_dir.path()).await.unwrap());
    let app = build_router(AppState {
        day_log: log.clone(),
        vitals: VitalsConfig::default(),
    });
    (temp_dir, log, app)
}

async fn post_vital(app: &Router, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/vitals")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn ingest_then_summarize_today() {
    let (_dir, _log, app) = setup().await;

    for body in [
        json!({"name": "LCP", "id": "1", "value": 2.0, "page": "/home", "rating": "good"}),
        json!({"name": "LCP", "id": "2", "value": 4.0, "page": "/menu", "rating": "poor"}),
        json!({"name": "CLS", "id": "3", "value": 0.1, "page": "/home"}),
    ] {
        let (status, response) = post_vital(&app, body).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(response, json!({"success": true}));
    }

    let (status, summary) = get(&app, "/api/vitals/summary").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(summary["metrics"]["total"], 3);
    assert_eq!(summary["metrics"]["averages"]["LCP"]["average"], 3.0);
    assert_eq!(summary["metrics"]["averages"]["CLS"]["average"], 0.1);
    assert_eq!(summary["metrics"]["averages"]["LCP"]["ratings"]["good"], 1);
    assert_eq!(summary["metrics"]["averages"]["LCP"]["ratings"]["poor"], 1);
    assert_eq!(summary["metrics"]["byPage"]["/menu"]["LCP"]["average"], 4.0);
    assert_eq!(summary["pages"], 2);

    let (_, home_only) = get(&app, "/api/vitals/summary?page=/home").await;
    assert_eq!(home_only["metrics"]["total"], 2);
    assert_eq!(home_only["metrics"]["averages"]["LCP"]["average"], 2.0);
    assert_eq!(home_only["pages"], 1);
}

#[tokio::test]
async fn ingest_fills_timestamp_and_keeps_order() {
    let (_dir, log, app) = setup().await;

    for i in 0..4 {
        let (status, _) =
            post_vital(&app, json!({"name": "TTFB", "id": format!("t{i}"), "value": i})).await;
        assert_eq!(status, StatusCode::OK);
    }

    let load = log.load_day(Utc::now().date_naive()).await.unwrap();
    let ids: Vec<&str> = load.events.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, vec!["t0", "t1", "t2", "t3"]);
    assert!(load
        .events
        .iter()
        .all(|e| e.timestamp <= Utc::now() && e.timestamp > Utc::now() - chrono::Duration::minutes(5)));
}

#[tokio::test]
async fn corrupt_today_is_replaced_on_ingest() {
    let (_dir, log, app) = setup().await;
    let today = Utc::now().date_naive();
    std::fs::write(log.day_path(today), "[{ broken").unwrap();

    let (status, summary) = get(&app, "/api/vitals/summary").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(summary["metrics"]["total"], 0);

    let (status, _) = post_vital(&app, json!({"name": "FCP", "id": "x", "value": 640})).await;
    assert_eq!(status, StatusCode::OK);

    let load = log.load_day(today).await.unwrap();
    assert!(!load.was_corrupt);
    assert_eq!(load.events.len(), 1);
}

#[tokio::test]
async fn rejected_payload_writes_nothing() {
    let (dir, _log, app) = setup().await;

    let (status, body) = post_vital(&app, json!({"name": "LCP", "id": "no-value"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let entries = std::fs::read_dir(dir.path().join("vitals")).unwrap().count();
    assert_eq!(entries, 0);
}
