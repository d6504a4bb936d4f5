use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use laurio_agents::testing::ScriptedGenerator;
use laurio_agents::{Pipeline, StageKind};
use laurio_api::{router, AppState};
use laurio_common::Config;

fn app_with(script: fn() -> ScriptedGenerator) -> axum::Router {
    let state = Arc::new(AppState {
        config: Config::default(),
        pipelines: Arc::new(move || script().into_pipeline().1),
    });
    router(state)
}

fn happy_script() -> ScriptedGenerator {
    ScriptedGenerator::new()
        .on(StageKind::Scout, "- AI trends: detail (https://x.example/a)")
        .on(
            StageKind::Curator,
            r#"[{"postType": "ig_post", "mainMessage": "Uno"}, {"mainMessage": "Dos"}]"#,
        )
        .on(StageKind::Editor, r#"{"slides": []}"#)
        .on(StageKind::Visual, r#"[{"forSlide": 1, "description": "d"}]"#)
        .fail_on(StageKind::Scout, "Broken")
}

async fn send(app: axum::Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn health_check() {
    let response = app_with(happy_script)
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&bytes[..], b"ok");
}

#[tokio::test]
async fn run_flow_reports_each_topic() {
    let (status, body) = send(
        app_with(happy_script),
        post_json("/run-flow", json!({ "topics": ["IA", "Broken", "Empleo"], "context": "Jóvenes" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");
    let results = body["results"].as_array().unwrap();
    assert_eq!(results.len(), 3);

    assert_eq!(results[0]["topic"], "IA");
    assert_eq!(results[0]["postType"], "ig_post");
    assert_eq!(results[0]["mainMessage"], "Uno");
    assert_eq!(results[0]["objective"], "Generated via ADK");
    assert_eq!(results[0]["sourceInsights"][0]["sourceUrl"], "https://x.example/a");
    assert_eq!(results[0]["visualMock"], "");
    assert!(results[0].get("plannedDate").is_none());

    assert_eq!(results[1]["topic"], "Broken");
    assert!(results[1]["error"].as_str().unwrap().contains("ScoutAgent failed"));

    assert_eq!(results[2]["topic"], "Empleo");
    assert!(results[2].get("error").is_none());
}

#[tokio::test]
async fn run_flow_rejects_malformed_body() {
    let (status, _) = send(
        app_with(happy_script),
        post_json("/run-flow", json!({ "context": "missing topics" })),
    )
    .await;
    assert!(status.is_client_error());
}

#[tokio::test]
async fn run_daily_success() {
    let (status, body) = send(
        app_with(happy_script),
        Request::builder()
            .method("POST")
            .uri("/run-daily")
            .body(Body::empty())
            .unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");
    let results = body["results"].as_array().unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0]["status"], "drafting");
    assert_eq!(results[1]["postType"], "ig_post");
    assert_eq!(results[1]["targetAudience"], "General");
    assert!(results[0]["plannedDate"].as_str().is_some());
    assert!(results[0]["sourceInsights"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn run_daily_error_envelope() {
    fn failing() -> ScriptedGenerator {
        ScriptedGenerator::new().fail_stage(StageKind::Curator)
    }

    let (status, body) = send(
        app_with(failing),
        Request::builder()
            .method("POST")
            .uri("/run-daily")
            .body(Body::empty())
            .unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "status": "error", "message": "CuratorAgent failed: curator unavailable" })
    );
}

#[tokio::test]
async fn fixture_mode_runs_without_credentials() {
    let config = Config::default();
    let pipeline_config = config.clone();
    let app = router(Arc::new(AppState {
        config,
        pipelines: Arc::new(move || Pipeline::from_config(&pipeline_config)),
    }));

    let (status, body) = send(app, post_json("/run-flow", json!({ "topics": ["IA"] }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["results"][0]["structure"]["slides"].as_array().unwrap().len(), 5);
}
