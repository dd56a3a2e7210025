use super::{default_true, flag, NivelEnsino, Patch, PeriodoAula};
use crate::client::{to_row, Row, StoreError};
use crate::error::AppError;
use crate::service::validation::{self, Validate};
use chrono::{DateTime, Datelike, Local, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A stored `turmas` row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Turma {
    pub id: Uuid,
    pub serie: String,
    pub turma: String,
    pub ano_letivo: i32,
    pub periodo: Option<PeriodoAula>,
    pub nivel: NivelEnsino,
    pub capacidade_maxima: Option<i32>,
    pub professor_id: Option<Uuid>,
    pub escola_id: Option<Uuid>,
    pub ativo: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Turma {
    /// Display name, e.g. "1º Ano A".
    pub fn nome_completo(&self) -> String {
        format!("{} {}", self.serie, self.turma)
    }
}

fn ano_corrente() -> i32 {
    Local::now().year()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TurmaCreate {
    pub serie: String,
    pub turma: String,
    #[serde(default = "ano_corrente")]
    pub ano_letivo: i32,
    pub periodo: PeriodoAula,
    pub nivel: NivelEnsino,
    #[serde(default)]
    pub capacidade_maxima: Option<i32>,
    #[serde(default)]
    pub professor_id: Option<Uuid>,
}

impl Validate for TurmaCreate {
    fn validate(&self) -> Result<(), AppError> {
        validation::length("serie", &self.serie, 1, 50)?;
        validation::length("turma", &self.turma, 1, 10)?;
        if let Some(c) = self.capacidade_maxima {
            validation::range("capacidade_maxima", c, 1, 50)?;
        }
        Ok(())
    }
}

impl TurmaCreate {
    pub fn to_row(&self) -> Result<Row, StoreError> {
        to_row(self)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TurmaUpdate {
    #[serde(default)]
    pub serie: Patch<String>,
    #[serde(default)]
    pub turma: Patch<String>,
    #[serde(default)]
    pub ano_letivo: Patch<i32>,
    #[serde(default)]
    pub periodo: Patch<PeriodoAula>,
    #[serde(default)]
    pub capacidade_maxima: Patch<i32>,
    #[serde(default)]
    pub professor_id: Patch<Uuid>,
    #[serde(default)]
    pub ativo: Patch<bool>,
}

impl Validate for TurmaUpdate {
    fn validate(&self) -> Result<(), AppError> {
        validation::not_null("serie", &self.serie)?;
        validation::not_null("turma", &self.turma)?;
        validation::not_null("ano_letivo", &self.ano_letivo)?;
        validation::not_null("ativo", &self.ativo)?;
        if let Some(s) = self.serie.value() {
            validation::length("serie", s, 1, 50)?;
        }
        if let Some(t) = self.turma.value() {
            validation::length("turma", t, 1, 10)?;
        }
        if let Some(c) = self.capacidade_maxima.value() {
            validation::range("capacidade_maxima", *c, 1, 50)?;
        }
        Ok(())
    }
}

impl TurmaUpdate {
    /// Only the supplied fields; empty when nothing was sent.
    pub fn to_row(&self) -> Result<Row, StoreError> {
        let mut row = Row::new();
        self.serie.put(&mut row, "serie")?;
        self.turma.put(&mut row, "turma")?;
        self.ano_letivo.put(&mut row, "ano_letivo")?;
        self.periodo.put(&mut row, "periodo")?;
        self.capacidade_maxima.put(&mut row, "capacidade_maxima")?;
        self.professor_id.put(&mut row, "professor_id")?;
        self.ativo.put(&mut row, "ativo")?;
        Ok(row)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TurmaResponse {
    #[serde(flatten)]
    pub turma: Turma,
    pub nome_completo: String,
    pub quantidade_atual: u64,
}

impl TurmaResponse {
    pub fn new(turma: Turma, quantidade_atual: u64) -> Self {
        TurmaResponse {
            nome_completo: turma.nome_completo(),
            turma,
            quantidade_atual,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TurmaFiltro {
    pub nivel: Option<NivelEnsino>,
    pub periodo: Option<PeriodoAula>,
    pub ano_letivo: Option<i32>,
    #[serde(default = "default_true", deserialize_with = "flag::deserialize")]
    pub ativo: bool,
}

impl Validate for TurmaFiltro {
    fn validate(&self) -> Result<(), AppError> {
        Ok(())
    }
}

/// Body of `GET /turmas/{id}/alunos-count`.
#[derive(Debug, Clone, Serialize)]
pub struct ContagemAlunos {
    pub turma_id: Uuid,
    pub turma_nome: String,
    pub total_alunos: u64,
}
