//! Integration tests for the HTTP API.
//!
//! Drive the real router with in-memory stores, a scripted provider, and
//! the real file template source and document exporter, asserting status
//! codes and response shapes endpoint by endpoint.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use planforge::adapters::ai::{MockProvider, MockProviderFactory};
use planforge::adapters::document::MarkdownExporter;
use planforge::adapters::http::{api_router, AppState};
use planforge::adapters::memory::{InMemoryGenerationStore, InMemorySettingsStore};
use planforge::adapters::template::FileTemplateSource;
use planforge::adapters::tracker::HttpTrackerFactory;
use planforge::ports::ProviderError;

fn app(provider: MockProvider) -> Router {
    let state = AppState::new(
        Arc::new(InMemorySettingsStore::new()),
        Arc::new(InMemoryGenerationStore::new()),
        Arc::new(FileTemplateSource::new()),
        Arc::new(MarkdownExporter::new()),
        Arc::new(MockProviderFactory(provider)),
        Arc::new(HttpTrackerFactory::new()),
    );
    api_router(state)
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, body.to_vec())
}

async fn send_json(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let (status, body) = send(app, request).await;
    let value = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, value)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn generate_plan(app: &Router, content_hint: &str) -> Value {
    let (status, body) = send_json(
        app,
        post(
            "/api/generate",
            json!({"issue_key": "PROJ-1", "summary": content_hint}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body
}

// ════════════════════════════════════════════════════════════════════════════
// Health
// ════════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn health_reports_ok_and_capabilities() {
    let app = app(MockProvider::new());
    let (status, body) = send_json(&app, get("/api/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"], "ok");
    assert!(body["pdf_export"].is_string());
    assert!(body["docx_export"].is_string());
}

// ════════════════════════════════════════════════════════════════════════════
// Configuration endpoints
// ════════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn tracker_config_round_trips_with_masked_token() {
    let app = app(MockProvider::new());

    let (status, _) = send_json(
        &app,
        post(
            "/api/config/tracker",
            json!({"domain": "team.atlassian.net", "email": "qa@team.dev", "api_token": "secret"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send_json(&app, get("/api/config/tracker")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["domain"], "team.atlassian.net");
    assert_eq!(body["api_token_set"], true);
    assert_eq!(body["connection_status"], "untested");
    assert!(body.get("api_token").is_none());
}

#[tokio::test]
async fn unconfigured_reads_are_400_not_configured() {
    let app = app(MockProvider::new());
    for uri in [
        "/api/config/tracker",
        "/api/config/provider",
        "/api/config/template",
    ] {
        let (status, body) = send_json(&app, get(uri)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(body["code"], "NOT_CONFIGURED", "{uri}");
    }
}

#[tokio::test]
async fn provider_save_applies_defaults_and_masks_the_key() {
    let app = app(MockProvider::new());
    let (status, body) = send_json(
        &app,
        post(
            "/api/config/provider",
            json!({"provider_kind": "hosted", "api_key": "sk-secret"}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["hosted_model"], "grok-2");
    assert_eq!(body["hosted_temperature"], 0.7);
    assert_eq!(body["hosted_max_tokens"], 2000);
    assert_eq!(body["api_key_set"], true);
    assert!(body.get("api_key").is_none());
    assert!(!body.to_string().contains("sk-secret"));
}

#[tokio::test]
async fn provider_test_persists_the_outcome() {
    let app = app(MockProvider::new().disconnected());
    send_json(
        &app,
        post("/api/config/provider", json!({"provider_kind": "local"})),
    )
    .await;

    let (status, body) = send_json(&app, post("/api/config/provider/test", json!({}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "failed");
    assert!(body["tested_at"].is_string());

    // The failed outcome lands on the stored config.
    let (_, body) = send_json(&app, get("/api/config/provider")).await;
    assert_eq!(body["connection_status"], "failed");
    assert!(body["last_tested_at"].is_string());
}

#[tokio::test]
async fn template_save_validates_and_stores_the_outcome() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("plan.md");
    std::fs::write(&path, "## Overview\n\nA full template body").unwrap();

    let app = app(MockProvider::new());
    let (status, body) = send_json(
        &app,
        post(
            "/api/config/template",
            json!({"file_path": path.to_str().unwrap()}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["validation_status"], "valid");
    assert_eq!(body["file_format"], "markdown");
    assert_eq!(body["validation"]["status"], "valid");

    let (status, body) = send_json(&app, get("/api/config/template")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["validation_status"], "valid");
}

#[tokio::test]
async fn template_save_with_missing_file_stores_a_failed_status() {
    let app = app(MockProvider::new());
    let (status, body) = send_json(
        &app,
        post(
            "/api/config/template",
            json!({"file_path": "/nonexistent/plan.md"}),
        ),
    )
    .await;

    // Saving succeeds; the validation outcome records the problem.
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["validation_status"], "failed");
    assert!(body["validation"]["message"]
        .as_str()
        .unwrap()
        .contains("not found"));
}

// ════════════════════════════════════════════════════════════════════════════
// Issues
// ════════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn issue_fetch_without_tracker_config_is_400() {
    let app = app(MockProvider::new());
    let (status, body) = send_json(&app, get("/api/issues/PROJ-1")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "NOT_CONFIGURED");
}

// ════════════════════════════════════════════════════════════════════════════
// Generation and history
// ════════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn generate_returns_record_with_export_links() {
    let app = app(MockProvider::new().with_response("# Plan\n\n- a case"));
    send_json(
        &app,
        post("/api/config/provider", json!({"provider_kind": "local", "model": "mistral"})),
    )
    .await;

    let body = generate_plan(&app, "A summary").await;
    assert_eq!(body["source_issue_id"], "PROJ-1");
    assert_eq!(body["generated_content"], "# Plan\n\n- a case");
    assert_eq!(body["provider_used"], "mock");

    let id = body["id"].as_str().unwrap();
    assert_eq!(body["exports"]["markdown"], format!("/api/export/{id}/md"));
    assert_eq!(body["exports"]["pdf"], format!("/api/export/{id}/pdf"));
    assert_eq!(body["exports"]["docx"], format!("/api/export/{id}/docx"));
}

#[tokio::test]
async fn generate_without_provider_config_is_400() {
    let app = app(MockProvider::new());
    let (status, body) = send_json(
        &app,
        post("/api/generate", json!({"issue_key": "PROJ-1", "summary": "s"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "NOT_CONFIGURED");
}

#[tokio::test]
async fn provider_failure_is_502_and_history_stays_empty() {
    let app = app(MockProvider::new().with_failure(ProviderError::remote(503, "overloaded")));
    send_json(
        &app,
        post("/api/config/provider", json!({"provider_kind": "local"})),
    )
    .await;

    let (status, body) = send_json(
        &app,
        post("/api/generate", json!({"issue_key": "PROJ-1", "summary": "s"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["code"], "PROVIDER_ERROR");

    let (status, body) = send_json(&app, get("/api/generations")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn history_lists_metadata_without_plan_text() {
    let app = app(MockProvider::new().with_response("# Plan body"));
    send_json(
        &app,
        post("/api/config/provider", json!({"provider_kind": "local"})),
    )
    .await;
    generate_plan(&app, "A summary").await;

    let (status, body) = send_json(&app, get("/api/generations")).await;
    assert_eq!(status, StatusCode::OK);
    let entries = body.as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["source_issue_id"], "PROJ-1");
    assert!(entries[0].get("generated_content").is_none());
}

#[tokio::test]
async fn history_accepts_an_oversized_limit() {
    let app = app(MockProvider::new().with_response("# Plan body"));
    send_json(
        &app,
        post("/api/config/provider", json!({"provider_kind": "local"})),
    )
    .await;
    generate_plan(&app, "A summary").await;

    // The requested page size is capped server-side, not rejected.
    let (status, body) = send_json(&app, get("/api/generations?limit=4294967295")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
}

// ════════════════════════════════════════════════════════════════════════════
// Export
// ════════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn markdown_export_returns_the_stored_content_verbatim() {
    let app = app(MockProvider::new().with_response("# Plan\n\ncontent"));
    send_json(
        &app,
        post("/api/config/provider", json!({"provider_kind": "local"})),
    )
    .await;
    let record = generate_plan(&app, "A summary").await;
    let id = record["id"].as_str().unwrap();

    let response = app
        .clone()
        .oneshot(get(&format!("/api/export/{id}/md")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "text/markdown; charset=utf-8"
    );
    assert!(response.headers()[header::CONTENT_DISPOSITION]
        .to_str()
        .unwrap()
        .contains("test-plan-PROJ-1.md"));

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&body[..], b"# Plan\n\ncontent");
}

#[cfg(feature = "export-pdf")]
#[tokio::test]
async fn pdf_export_returns_a_pdf_document() {
    let app = app(MockProvider::new().with_response("# Plan"));
    send_json(
        &app,
        post("/api/config/provider", json!({"provider_kind": "local"})),
    )
    .await;
    let record = generate_plan(&app, "A summary").await;
    let id = record["id"].as_str().unwrap();

    let (status, body) = send(&app, get(&format!("/api/export/{id}/pdf"))).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.starts_with(b"%PDF"));
}

#[cfg(feature = "export-docx")]
#[tokio::test]
async fn docx_export_returns_a_zip_container() {
    let app = app(MockProvider::new().with_response("# Plan"));
    send_json(
        &app,
        post("/api/config/provider", json!({"provider_kind": "local"})),
    )
    .await;
    let record = generate_plan(&app, "A summary").await;
    let id = record["id"].as_str().unwrap();

    let (status, body) = send(&app, get(&format!("/api/export/{id}/docx"))).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.starts_with(b"PK\x03\x04"));
}

#[tokio::test]
async fn unknown_generation_id_is_404_for_every_format() {
    let app = app(MockProvider::new());
    let id = uuid::Uuid::new_v4();

    for format in ["md", "pdf", "docx"] {
        let (status, body) = send_json(&app, get(&format!("/api/export/{id}/{format}"))).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{format}");
        assert_eq!(body["code"], "NOT_FOUND", "{format}");
    }
}

#[tokio::test]
async fn malformed_generation_id_is_404() {
    let app = app(MockProvider::new());
    let (status, _) = send_json(&app, get("/api/export/not-a-uuid/md")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn unsupported_export_format_is_400() {
    let app = app(MockProvider::new());
    let id = uuid::Uuid::new_v4();
    let (status, body) = send_json(&app, get(&format!("/api/export/{id}/odt"))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "BAD_REQUEST");
}
