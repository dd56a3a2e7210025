//! Typed errors and HTTP mapping.

use crate::client::StoreError;
use crate::response::error_body;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing environment variable: {0}")]
    MissingVar(&'static str),
    #[error("invalid value for {name}: {reason}")]
    InvalidVar { name: &'static str, reason: String },
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("{0}")]
    NotFound(String),
    /// Field constraint failure or unparseable request.
    #[error("{0}")]
    Validation(String),
    /// Business rule failure.
    #[error("{0}")]
    BadRequest(String),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("serialization: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Config(_) | AppError::Serialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Store(StoreError::UniqueViolation(_)) => StatusCode::BAD_REQUEST,
            AppError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            AppError::Config(_) => "config_error",
            AppError::NotFound(_) => "not_found",
            AppError::Validation(_) => "validation_error",
            AppError::BadRequest(_) => "bad_request",
            AppError::Store(StoreError::UniqueViolation(_)) => "conflict",
            AppError::Store(_) => "database_error",
            AppError::Serialization(_) => "internal_error",
        }
    }

    /// Message sent to the client. Internal failures are logged, not echoed.
    fn public_message(&self) -> String {
        match self {
            AppError::NotFound(m) | AppError::Validation(m) | AppError::BadRequest(m) => m.clone(),
            AppError::Store(StoreError::UniqueViolation(constraint)) => duplicate_message(constraint).into(),
            AppError::Store(_) => "Erro ao acessar o banco de dados".into(),
            AppError::Config(_) => "Erro de configuração".into(),
            AppError::Serialization(_) => "Erro interno inesperado".into(),
        }
    }
}

/// Client-facing text for a unique constraint; the constraint name itself stays in the logs.
fn duplicate_message(constraint: &str) -> &'static str {
    match constraint {
        "turmas_serie_turma_ano_letivo_periodo_key" => "Turma já cadastrada para este ano letivo e período",
        "alunos_matricula_key" => "Matrícula já está em uso",
        "usuarios_email_key" => "E-mail já cadastrado",
        "tags_nome_usuario_id_key" => "Tag já cadastrada",
        "avaliacoes_aluno_id_data_avaliacao_key" => "Aluno já possui avaliação nesta data",
        "avaliacao_tags_pkey" => "Tag já associada à avaliação",
        "relatorios_aluno_id_trimestre_ano_key" => "Relatório já existe para este trimestre",
        _ => "Registro duplicado",
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else if let AppError::Store(StoreError::UniqueViolation(constraint)) = &self {
            tracing::warn!(constraint = %constraint, "unique constraint violated");
        } else {
            tracing::debug!(error = %self, status = status.as_u16(), "request rejected");
        }
        (status, Json(error_body(self.code(), self.public_message()))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn business_rule_failures_map_to_bad_request() {
        assert_eq!(AppError::BadRequest("x".into()).status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            AppError::Store(StoreError::UniqueViolation("alunos_matricula_key".into())).status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn store_failures_hide_detail() {
        let err = AppError::Store(StoreError::UnknownTable("segredos".into()));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!err.public_message().contains("segredos"));
    }

    #[test]
    fn unique_violations_name_the_domain_not_the_constraint() {
        let err = AppError::Store(StoreError::UniqueViolation(
            "turmas_serie_turma_ano_letivo_periodo_key".into(),
        ));
        assert_eq!(err.public_message(), "Turma já cadastrada para este ano letivo e período");
        let other = AppError::Store(StoreError::UniqueViolation("algum_indice_key".into()));
        assert_eq!(other.public_message(), "Registro duplicado");
        assert!(!other.public_message().contains("algum_indice_key"));
    }

    #[test]
    fn shape_failures_map_to_unprocessable() {
        assert_eq!(
            AppError::Validation("serie is required".into()).status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(AppError::NotFound("Turma não encontrada".into()).status(), StatusCode::NOT_FOUND);
    }
}
