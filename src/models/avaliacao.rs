use super::{StatusAvaliacao, Tag, Trimestre};
use crate::config::domain::nota_valida;
use crate::error::AppError;
use crate::service::validation::Validate;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Subject name -> score on the evaluation scale.
pub type CamposAvaliados = BTreeMap<String, u8>;

fn validar_notas(campos: &CamposAvaliados) -> Result<(), AppError> {
    match campos.iter().find(|(_, nota)| !nota_valida(**nota)) {
        Some((campo, _)) => Err(AppError::Validation(format!(
            "Nota do campo '{}' deve ser 1, 2 ou 3",
            campo
        ))),
        None => Ok(()),
    }
}

/// A stored `avaliacoes` row. Tags live in `avaliacao_tags`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Avaliacao {
    pub id: Uuid,
    pub aluno_id: Uuid,
    pub data_avaliacao: NaiveDate,
    pub trimestre: Trimestre,
    pub ano: i32,
    pub status: StatusAvaliacao,
    pub campos_avaliados: CamposAvaliados,
    pub observacao_livre: Option<String>,
    pub professor_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AvaliacaoCreate {
    pub aluno_id: Uuid,
    pub data_avaliacao: NaiveDate,
    pub trimestre: Trimestre,
    #[serde(default)]
    pub status: StatusAvaliacao,
    pub campos_avaliados: CamposAvaliados,
    #[serde(default)]
    pub observacao_livre: Option<String>,
    #[serde(default)]
    pub tags_ids: Vec<Uuid>,
}

impl Validate for AvaliacaoCreate {
    fn validate(&self) -> Result<(), AppError> {
        validar_notas(&self.campos_avaliados)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AvaliacaoUpdate {
    pub status: Option<StatusAvaliacao>,
    pub campos_avaliados: Option<CamposAvaliados>,
    pub observacao_livre: Option<String>,
    pub tags_ids: Option<Vec<Uuid>>,
}

impl Validate for AvaliacaoUpdate {
    fn validate(&self) -> Result<(), AppError> {
        match &self.campos_avaliados {
            Some(c) => validar_notas(c),
            None => Ok(()),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AvaliacaoResponse {
    #[serde(flatten)]
    pub avaliacao: Avaliacao,
    pub tags: Vec<Tag>,
}
