//! /api/v1/alunos handlers.

use crate::error::AppError;
use crate::extractors::{ApiPath, ApiQuery, ValidJson};
use crate::models::{AlunoCreate, AlunoFiltro, AlunoResponse, AlunoUpdate, ListaPorTurma};
use crate::response::{self, MessageResponse};
use crate::service::AlunoService;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, Json};
use uuid::Uuid;

pub async fn create(
    State(state): State<AppState>,
    ValidJson(payload): ValidJson<AlunoCreate>,
) -> Result<(StatusCode, Json<AlunoResponse>), AppError> {
    let aluno = AlunoService::create(state.client.as_ref(), &payload).await?;
    Ok(response::created(aluno))
}

pub async fn list(
    State(state): State<AppState>,
    ApiQuery(filtro): ApiQuery<AlunoFiltro>,
) -> Result<Json<Vec<AlunoResponse>>, AppError> {
    Ok(Json(AlunoService::list(state.client.as_ref(), &filtro).await?))
}

pub async fn read(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<AlunoResponse>, AppError> {
    Ok(Json(AlunoService::get(state.client.as_ref(), id).await?))
}

pub async fn update(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
    ValidJson(payload): ValidJson<AlunoUpdate>,
) -> Result<Json<AlunoResponse>, AppError> {
    Ok(Json(AlunoService::update(state.client.as_ref(), id, &payload).await?))
}

pub async fn delete(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<(StatusCode, Json<MessageResponse>), AppError> {
    AlunoService::deactivate(state.client.as_ref(), id).await?;
    Ok(response::message("Aluno desativado com sucesso"))
}

pub async fn list_by_turma(
    State(state): State<AppState>,
    ApiPath(turma_id): ApiPath<Uuid>,
    ApiQuery(params): ApiQuery<ListaPorTurma>,
) -> Result<Json<Vec<AlunoResponse>>, AppError> {
    Ok(Json(
        AlunoService::list_by_turma(state.client.as_ref(), turma_id, &params).await?,
    ))
}
