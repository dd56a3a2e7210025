//! Shared harness: the full router over an in-memory table client.

#![allow(dead_code)]

use avaliacao_escolar::client::{Row, TableClient};
use avaliacao_escolar::{app, AppState, MemoryTableClient, Settings};
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use chrono::{Duration, Local, NaiveDate};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;
use tower::ServiceExt;

pub fn settings() -> Settings {
    let vars: HashMap<String, String> = [
        ("DATABASE_URL", "postgres://localhost/avaliacao"),
        ("DATABASE_KEY", "test-key"),
        ("SECRET_KEY", "test-secret"),
        ("OPENAI_API_KEY", "sk-test"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();
    Settings::from_map(&vars).expect("test settings")
}

pub fn hoje() -> NaiveDate {
    Local::now().date_naive()
}

/// ISO date `years` years (approximately) before today, shifted by `days`.
pub fn nascimento(years: i64, days: i64) -> String {
    (hoje() - Duration::days(years * 365 + years / 4) + Duration::days(days)).to_string()
}

pub struct TestApp {
    pub client: Arc<MemoryTableClient>,
    router: Router,
}

impl TestApp {
    pub fn new() -> Self {
        let client = Arc::new(MemoryTableClient::new());
        let state = AppState::new(client.clone(), settings());
        TestApp {
            client,
            router: app(state),
        }
    }

    pub async fn request(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(v) => {
                let text = v.to_string();
                builder
                    .header("content-type", "application/json")
                    .header("content-length", text.len())
                    .body(Body::from(text))
            }
            None => builder.body(Body::empty()),
        }
        .expect("request");
        let response = self.router.clone().oneshot(request).await.expect("response");
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into()))
        };
        (status, value)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.request(Method::GET, uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::POST, uri, Some(body)).await
    }

    pub async fn patch(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::PATCH, uri, Some(body)).await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        self.request(Method::DELETE, uri, None).await
    }

    /// Create a class through the API and return its id.
    pub async fn turma(&self, serie: &str, turma: &str, capacidade: Option<i32>) -> String {
        let (status, body) = self
            .post(
                "/api/v1/turmas",
                json!({
                    "serie": serie, "turma": turma, "periodo": "manha",
                    "nivel": "fundamental", "capacidade_maxima": capacidade
                }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{}", body);
        body["id"].as_str().expect("turma id").to_string()
    }

    /// Create a student through the API and return its id.
    pub async fn aluno(&self, matricula: &str, nome: &str, turma_id: &str) -> String {
        let (status, body) = self.post("/api/v1/alunos", aluno_payload(matricula, nome, turma_id)).await;
        assert_eq!(status, StatusCode::CREATED, "{}", body);
        body["id"].as_str().expect("aluno id").to_string()
    }

    /// Insert directly into the store, bypassing the API rules.
    pub async fn insert(&self, table: &str, row: Value) -> Row {
        let row = match row {
            Value::Object(m) => m,
            other => panic!("not an object: {}", other),
        };
        self.client.insert(table, row).await.expect("insert").remove(0)
    }
}

pub fn aluno_payload(matricula: &str, nome: &str, turma_id: &str) -> Value {
    json!({
        "matricula": matricula,
        "nome": nome,
        "data_nascimento": nascimento(7, 0),
        "turma_id": turma_id,
        "responsavel_nome": "Responsável",
        "responsavel_email": "responsavel@email.com"
    })
}

pub fn error_message(body: &Value) -> &str {
    body["error"]["message"].as_str().unwrap_or_default()
}
