//! /api/v1/turmas handlers.

use crate::error::AppError;
use crate::extractors::{ApiPath, ApiQuery, ValidJson};
use crate::models::{ContagemAlunos, TurmaCreate, TurmaFiltro, TurmaResponse, TurmaUpdate};
use crate::response::{self, MessageResponse};
use crate::service::TurmaService;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, Json};
use uuid::Uuid;

pub async fn create(
    State(state): State<AppState>,
    ValidJson(payload): ValidJson<TurmaCreate>,
) -> Result<(StatusCode, Json<TurmaResponse>), AppError> {
    let turma = TurmaService::create(state.client.as_ref(), &payload).await?;
    Ok(response::created(turma))
}

pub async fn list(
    State(state): State<AppState>,
    ApiQuery(filtro): ApiQuery<TurmaFiltro>,
) -> Result<Json<Vec<TurmaResponse>>, AppError> {
    Ok(Json(TurmaService::list(state.client.as_ref(), &filtro).await?))
}

pub async fn read(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<TurmaResponse>, AppError> {
    Ok(Json(TurmaService::get(state.client.as_ref(), id).await?))
}

pub async fn update(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
    ValidJson(payload): ValidJson<TurmaUpdate>,
) -> Result<Json<TurmaResponse>, AppError> {
    Ok(Json(TurmaService::update(state.client.as_ref(), id, &payload).await?))
}

pub async fn delete(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<(StatusCode, Json<MessageResponse>), AppError> {
    TurmaService::deactivate(state.client.as_ref(), id).await?;
    Ok(response::message("Turma desativada com sucesso"))
}

pub async fn alunos_count(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<ContagemAlunos>, AppError> {
    Ok(Json(TurmaService::count_alunos(state.client.as_ref(), id).await?))
}
