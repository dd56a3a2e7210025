mod common;

use avaliacao_escolar::client::{Row, StoreError, TableClient, TableQuery};
use avaliacao_escolar::{app, AppState};
use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::{settings, TestApp};
use serde_json::json;
use std::sync::Arc;
use tower::ServiceExt;

#[tokio::test]
async fn banner_reports_service_and_environment() {
    let app = TestApp::new();
    let (status, body) = app.get("/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], json!("Sistema de Avaliação Escolar"));
    assert_eq!(body["status"], json!("online"));
    assert_eq!(body["ambiente"], json!("development"));
    assert_eq!(body["version"], json!(env!("CARGO_PKG_VERSION")));
}

#[tokio::test]
async fn health_reports_configuration_presence() {
    let app = TestApp::new();
    let (status, body) = app.get("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "status": "healthy",
            "checks": {
                "api": "ok",
                "database_configured": true,
                "ai_providers": {"openai": true, "anthropic": false, "google": false}
            }
        })
    );
}

#[tokio::test]
async fn config_info_never_echoes_secrets() {
    let app = TestApp::new();
    let (status, body) = app.get("/config/info").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["environment"], json!("development"));
    assert_eq!(body["default_llm_provider"], json!("openai"));
    assert_eq!(body["escala_avaliacao"]["2"], json!("Em desenvolvimento"));
    assert_eq!(body["categorias"]["fundamental"][0], json!("Português"));
    let tags = body["tags_padrao"].as_array().unwrap();
    assert_eq!(tags.len(), 6);
    assert_eq!(tags[5], json!("..."));
    let text = body.to_string();
    assert!(!text.contains("sk-test"));
    assert!(!text.contains("test-secret"));
    assert!(!text.contains("test-key"));
}

#[tokio::test]
async fn ready_pings_the_store() {
    let app = TestApp::new();
    let (status, body) = app.get("/ready").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["database"], json!("ok"));
}

/// Store that fails every call.
struct Offline;

#[async_trait]
impl TableClient for Offline {
    async fn select(&self, _: &TableQuery) -> Result<Vec<Row>, StoreError> {
        Err(StoreError::Unavailable("connection refused".into()))
    }
    async fn count(&self, _: &TableQuery) -> Result<u64, StoreError> {
        Err(StoreError::Unavailable("connection refused".into()))
    }
    async fn insert(&self, _: &str, _: Row) -> Result<Vec<Row>, StoreError> {
        Err(StoreError::Unavailable("connection refused".into()))
    }
    async fn update(&self, _: &TableQuery, _: Row) -> Result<Vec<Row>, StoreError> {
        Err(StoreError::Unavailable("connection refused".into()))
    }
    async fn ping(&self) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("connection refused".into()))
    }
}

#[tokio::test]
async fn store_failures_become_opaque_server_errors() {
    let router = app(AppState::new(Arc::new(Offline), settings()));

    let response = router
        .clone()
        .oneshot(Request::builder().uri("/api/v1/turmas").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["error"]["code"], json!("database_error"));
    assert!(!body.to_string().contains("connection refused"));

    let response = router
        .oneshot(Request::builder().uri("/ready").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn oversized_body_is_rejected() {
    let app = TestApp::new();
    let big = "x".repeat(2 * 1024 * 1024);
    let (status, _) = app
        .post("/api/v1/turmas", json!({"serie": big, "turma": "A", "periodo": "manha", "nivel": "fundamental"}))
        .await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn cors_allows_any_origin() {
    let app = TestApp::new();
    let router = avaliacao_escolar::app(AppState::new(app.client.clone(), settings()));
    let response = router
        .oneshot(
            Request::builder()
                .uri("/health")
                .header("origin", "http://localhost:5173")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(
        response.headers().get("access-control-allow-origin").unwrap(),
        "*"
    );
}
