use super::{default_true, flag, Patch};
use crate::client::{to_row, Row, StoreError};
use crate::error::AppError;
use crate::service::validation::{self, Validate};
use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A stored `alunos` row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Aluno {
    pub id: Uuid,
    pub matricula: String,
    pub nome: String,
    pub data_nascimento: NaiveDate,
    pub foto_url: Option<String>,
    pub turma_id: Option<Uuid>,
    pub responsavel_nome: Option<String>,
    pub responsavel_telefone: Option<String>,
    pub responsavel_email: Option<String>,
    pub responsavel_foto_url: Option<String>,
    pub necessidades_especiais: bool,
    pub necessidades_descricao: Option<String>,
    pub alergias: Option<String>,
    pub restricoes_alimentares: Option<String>,
    pub observacoes: Option<String>,
    pub ativo: bool,
    pub data_saida: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn preenchido(s: &Option<String>) -> bool {
    s.as_deref().is_some_and(|s| !s.is_empty())
}

impl Aluno {
    pub fn tem_restricoes(&self) -> bool {
        self.necessidades_especiais || preenchido(&self.alergias) || preenchido(&self.restricoes_alimentares)
    }
}

/// Whole years from `nascimento` to `hoje`, one less while this year's birthday
/// has not arrived.
pub fn calcular_idade(nascimento: NaiveDate, hoje: NaiveDate) -> i32 {
    let antes_do_aniversario = (hoje.month(), hoje.day()) < (nascimento.month(), nascimento.day());
    hoje.year() - nascimento.year() - i32::from(antes_do_aniversario)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlunoCreate {
    pub matricula: String,
    pub nome: String,
    pub data_nascimento: NaiveDate,
    #[serde(default)]
    pub foto_url: Option<String>,
    pub turma_id: Uuid,
    #[serde(default)]
    pub responsavel_nome: Option<String>,
    #[serde(default)]
    pub responsavel_telefone: Option<String>,
    #[serde(default)]
    pub responsavel_email: Option<String>,
    #[serde(default)]
    pub responsavel_foto_url: Option<String>,
    #[serde(default)]
    pub necessidades_especiais: bool,
    #[serde(default)]
    pub necessidades_descricao: Option<String>,
    #[serde(default)]
    pub alergias: Option<String>,
    #[serde(default)]
    pub restricoes_alimentares: Option<String>,
    #[serde(default)]
    pub observacoes: Option<String>,
}

impl Validate for AlunoCreate {
    fn validate(&self) -> Result<(), AppError> {
        validation::length("matricula", &self.matricula, 1, 50)?;
        validation::length("nome", &self.nome, 2, 255)?;
        validation::max_length("foto_url", self.foto_url.as_deref(), 500)?;
        validation::max_length("responsavel_nome", self.responsavel_nome.as_deref(), 255)?;
        validation::max_length("responsavel_telefone", self.responsavel_telefone.as_deref(), 20)?;
        validation::email("responsavel_email", self.responsavel_email.as_deref())?;
        validation::max_length("responsavel_foto_url", self.responsavel_foto_url.as_deref(), 500)?;
        Ok(())
    }
}

impl AlunoCreate {
    pub fn descricao_ausente(&self) -> bool {
        self.necessidades_especiais && !preenchido(&self.necessidades_descricao)
    }

    pub fn to_row(&self) -> Result<Row, StoreError> {
        to_row(self)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AlunoUpdate {
    #[serde(default)]
    pub matricula: Patch<String>,
    #[serde(default)]
    pub nome: Patch<String>,
    #[serde(default)]
    pub data_nascimento: Patch<NaiveDate>,
    #[serde(default)]
    pub foto_url: Patch<String>,
    #[serde(default)]
    pub turma_id: Patch<Uuid>,
    #[serde(default)]
    pub responsavel_nome: Patch<String>,
    #[serde(default)]
    pub responsavel_telefone: Patch<String>,
    #[serde(default)]
    pub responsavel_email: Patch<String>,
    #[serde(default)]
    pub responsavel_foto_url: Patch<String>,
    #[serde(default)]
    pub necessidades_especiais: Patch<bool>,
    #[serde(default)]
    pub necessidades_descricao: Patch<String>,
    #[serde(default)]
    pub alergias: Patch<String>,
    #[serde(default)]
    pub restricoes_alimentares: Patch<String>,
    #[serde(default)]
    pub observacoes: Patch<String>,
    #[serde(default)]
    pub ativo: Patch<bool>,
    #[serde(default)]
    pub data_saida: Patch<NaiveDate>,
}

impl Validate for AlunoUpdate {
    fn validate(&self) -> Result<(), AppError> {
        validation::not_null("matricula", &self.matricula)?;
        validation::not_null("nome", &self.nome)?;
        validation::not_null("data_nascimento", &self.data_nascimento)?;
        validation::not_null("necessidades_especiais", &self.necessidades_especiais)?;
        validation::not_null("ativo", &self.ativo)?;
        if let Some(m) = self.matricula.value() {
            validation::length("matricula", m, 1, 50)?;
        }
        if let Some(n) = self.nome.value() {
            validation::length("nome", n, 2, 255)?;
        }
        validation::max_length("foto_url", self.foto_url.value().map(String::as_str), 500)?;
        validation::max_length("responsavel_nome", self.responsavel_nome.value().map(String::as_str), 255)?;
        validation::max_length(
            "responsavel_telefone",
            self.responsavel_telefone.value().map(String::as_str),
            20,
        )?;
        validation::email("responsavel_email", self.responsavel_email.value().map(String::as_str))?;
        validation::max_length(
            "responsavel_foto_url",
            self.responsavel_foto_url.value().map(String::as_str),
            500,
        )?;
        Ok(())
    }
}

impl AlunoUpdate {
    /// Only the supplied fields; empty when nothing was sent.
    pub fn to_row(&self) -> Result<Row, StoreError> {
        let mut row = Row::new();
        self.matricula.put(&mut row, "matricula")?;
        self.nome.put(&mut row, "nome")?;
        self.data_nascimento.put(&mut row, "data_nascimento")?;
        self.foto_url.put(&mut row, "foto_url")?;
        self.turma_id.put(&mut row, "turma_id")?;
        self.responsavel_nome.put(&mut row, "responsavel_nome")?;
        self.responsavel_telefone.put(&mut row, "responsavel_telefone")?;
        self.responsavel_email.put(&mut row, "responsavel_email")?;
        self.responsavel_foto_url.put(&mut row, "responsavel_foto_url")?;
        self.necessidades_especiais.put(&mut row, "necessidades_especiais")?;
        self.necessidades_descricao.put(&mut row, "necessidades_descricao")?;
        self.alergias.put(&mut row, "alergias")?;
        self.restricoes_alimentares.put(&mut row, "restricoes_alimentares")?;
        self.observacoes.put(&mut row, "observacoes")?;
        self.ativo.put(&mut row, "ativo")?;
        self.data_saida.put(&mut row, "data_saida")?;
        Ok(row)
    }

    /// True when the flag is being switched on.
    pub fn ativa_necessidades(&self) -> bool {
        matches!(self.necessidades_especiais, Patch::Value(true))
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AlunoResponse {
    #[serde(flatten)]
    pub aluno: Aluno,
    pub idade: i32,
    pub tem_restricoes: bool,
}

impl AlunoResponse {
    pub fn new(aluno: Aluno, hoje: NaiveDate) -> Self {
        AlunoResponse {
            idade: calcular_idade(aluno.data_nascimento, hoje),
            tem_restricoes: aluno.tem_restricoes(),
            aluno,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrdenacaoAluno {
    #[default]
    Nome,
    /// Birth date ascending, oldest first.
    Idade,
    Matricula,
}

impl OrdenacaoAluno {
    pub fn coluna(&self) -> &'static str {
        match self {
            OrdenacaoAluno::Nome => "nome",
            OrdenacaoAluno::Idade => "data_nascimento",
            OrdenacaoAluno::Matricula => "matricula",
        }
    }
}

fn limite_padrao() -> u32 {
    50
}

#[derive(Debug, Clone, Deserialize)]
pub struct AlunoFiltro {
    pub turma_id: Option<Uuid>,
    #[serde(default, deserialize_with = "flag::optional")]
    pub necessidades_especiais: Option<bool>,
    #[serde(default = "default_true", deserialize_with = "flag::deserialize")]
    pub ativo: bool,
    #[serde(default)]
    pub ordenar_por: OrdenacaoAluno,
    #[serde(default = "limite_padrao")]
    pub limite: u32,
    #[serde(default)]
    pub offset: u32,
}

impl Validate for AlunoFiltro {
    fn validate(&self) -> Result<(), AppError> {
        validation::range("limite", self.limite, 1, 100)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ListaPorTurma {
    #[serde(default = "default_true", deserialize_with = "flag::deserialize")]
    pub apenas_ativos: bool,
}

impl Validate for ListaPorTurma {
    fn validate(&self) -> Result<(), AppError> {
        Ok(())
    }
}
