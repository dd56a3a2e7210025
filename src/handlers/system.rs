//! Process endpoints: banner, health, readiness and configuration echo.

use crate::config::domain::{
    CATEGORIAS_FUNDAMENTAL, CATEGORIAS_INFANTIL, ESCALA_AVALIACAO, TAGS_COMPORTAMENTAIS_PADRAO,
};
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Map, Value};

pub const SERVICE_NAME: &str = "Sistema de Avaliação Escolar";

pub async fn root(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "message": SERVICE_NAME,
        "version": env!("CARGO_PKG_VERSION"),
        "status": "online",
        "ambiente": state.settings.environment,
    }))
}

/// Configuration presence only; never touches the store.
pub async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "checks": {
            "api": "ok",
            "database_configured": state.settings.database_configured(),
            "ai_providers": state.settings.ai_providers(),
        }
    }))
}

pub async fn ready(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    match state.client.ping().await {
        Ok(()) => (StatusCode::OK, Json(json!({"status": "ok", "database": "ok"}))),
        Err(e) => {
            tracing::warn!(error = %e, "readiness check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({"status": "degraded", "database": "unavailable"})),
            )
        }
    }
}

fn escala() -> Map<String, Value> {
    ESCALA_AVALIACAO
        .iter()
        .map(|(nota, texto)| (nota.to_string(), Value::from(*texto)))
        .collect()
}

pub async fn config_info(State(state): State<AppState>) -> Json<Value> {
    let settings = &state.settings;
    let mut tags_padrao: Vec<&str> = TAGS_COMPORTAMENTAIS_PADRAO.iter().take(5).copied().collect();
    tags_padrao.push("...");
    Json(json!({
        "environment": settings.environment,
        "default_llm_provider": settings.default_llm_provider,
        "ai_providers_configured": settings.ai_providers(),
        "database_configured": settings.database_configured(),
        "categorias": {
            "fundamental": CATEGORIAS_FUNDAMENTAL,
            "infantil": CATEGORIAS_INFANTIL,
        },
        "escala_avaliacao": escala(),
        "tags_padrao": tags_padrao,
    }))
}
