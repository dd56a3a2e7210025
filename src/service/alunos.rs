//! Student operations: enrollment rules run in a fixed order before any write.

use super::turmas::{TurmaService, TURMA_NAO_ENCONTRADA};
use crate::client::{from_row, Row, TableClient, TableQuery};
use crate::error::AppError;
use crate::models::{Aluno, AlunoCreate, AlunoFiltro, AlunoResponse, AlunoUpdate, ListaPorTurma, Patch};
use chrono::{Local, NaiveDate};
use uuid::Uuid;

const ALUNO_NAO_ENCONTRADO: &str = "Aluno não encontrado";
const DESCRICAO_OBRIGATORIA: &str = "Descrição das necessidades especiais é obrigatória";
const CAPACIDADE_ATINGIDA: &str = "Turma já atingiu a capacidade máxima";

/// Local calendar date; ages and exit dates use it.
pub fn hoje() -> NaiveDate {
    Local::now().date_naive()
}

fn matricula_em_uso(matricula: &str) -> AppError {
    AppError::BadRequest(format!("Matrícula '{}' já está em uso", matricula))
}

fn validar_nascimento(data: NaiveDate, hoje: NaiveDate) -> Result<(), AppError> {
    if data >= hoje {
        return Err(AppError::BadRequest("Data de nascimento não pode ser futura".into()));
    }
    Ok(())
}

fn respostas(rows: Vec<Row>) -> Result<Vec<AlunoResponse>, AppError> {
    let hoje = hoje();
    rows.into_iter()
        .map(|row| Ok(AlunoResponse::new(from_row::<Aluno>(row)?, hoje)))
        .collect()
}

pub struct AlunoService;

impl AlunoService {
    async fn matricula_existe(client: &dyn TableClient, matricula: &str, exceto: Option<Uuid>) -> Result<bool, AppError> {
        let mut q = TableQuery::table("alunos").select(&["id"]).eq("matricula", matricula);
        if let Some(id) = exceto {
            q = q.neq("id", id.to_string());
        }
        Ok(!client.select(&q.limit(1)).await?.is_empty())
    }

    /// Reject when the class is at capacity. Classes without a capacity take anyone.
    async fn verificar_capacidade(
        client: &dyn TableClient,
        capacidade: Option<i32>,
        turma_id: Uuid,
        exceto: Option<Uuid>,
    ) -> Result<(), AppError> {
        let Some(capacidade) = capacidade.filter(|c| *c > 0) else {
            return Ok(());
        };
        let ocupacao = TurmaService::ocupacao_exceto(client, turma_id, exceto).await?;
        if ocupacao >= capacidade as u64 {
            return Err(AppError::BadRequest(CAPACIDADE_ATINGIDA.into()));
        }
        Ok(())
    }

    pub async fn create(client: &dyn TableClient, payload: &AlunoCreate) -> Result<AlunoResponse, AppError> {
        if Self::matricula_existe(client, &payload.matricula, None).await? {
            return Err(matricula_em_uso(&payload.matricula));
        }
        let turma = TurmaService::buscar(client, payload.turma_id).await?.ok_or_else(|| {
            AppError::NotFound(format!(
                "Turma com ID '{}' não encontrada. Verifique se o ID está correto.",
                payload.turma_id
            ))
        })?;
        Self::verificar_capacidade(client, turma.capacidade_maxima, turma.id, None).await?;
        if payload.descricao_ausente() {
            return Err(AppError::BadRequest(DESCRICAO_OBRIGATORIA.into()));
        }
        let hoje = hoje();
        validar_nascimento(payload.data_nascimento, hoje)?;

        let mut rows = client.insert("alunos", payload.to_row()?).await?;
        let row = rows
            .pop()
            .ok_or_else(|| AppError::BadRequest("Erro ao criar aluno".into()))?;
        let aluno: Aluno = from_row(row)?;
        tracing::info!(aluno_id = %aluno.id, turma_id = %turma.id, "aluno created");
        Ok(AlunoResponse::new(aluno, hoje))
    }

    pub async fn list(client: &dyn TableClient, filtro: &AlunoFiltro) -> Result<Vec<AlunoResponse>, AppError> {
        let mut q = TableQuery::table("alunos");
        if let Some(turma_id) = filtro.turma_id {
            q = q.eq("turma_id", turma_id.to_string());
        }
        if let Some(ne) = filtro.necessidades_especiais {
            q = q.eq("necessidades_especiais", ne);
        }
        q = q
            .eq("ativo", filtro.ativo)
            .order(filtro.ordenar_por.coluna())
            .limit(filtro.limite)
            .offset(filtro.offset);
        respostas(client.select(&q).await?)
    }

    pub async fn get(client: &dyn TableClient, id: Uuid) -> Result<AlunoResponse, AppError> {
        let row = client
            .select_single(&TableQuery::table("alunos").eq("id", id.to_string()))
            .await?
            .ok_or_else(|| AppError::NotFound(ALUNO_NAO_ENCONTRADO.into()))?;
        Ok(AlunoResponse::new(from_row(row)?, hoje()))
    }

    pub async fn update(client: &dyn TableClient, id: Uuid, payload: &AlunoUpdate) -> Result<AlunoResponse, AppError> {
        let patch = payload.to_row()?;
        if patch.is_empty() {
            return Err(AppError::BadRequest("Nenhum campo para atualizar".into()));
        }

        if let Some(matricula) = payload.matricula.value() {
            if Self::matricula_existe(client, matricula, Some(id)).await? {
                return Err(matricula_em_uso(matricula));
            }
        }

        if let Some(turma_id) = payload.turma_id.value() {
            let turma = TurmaService::buscar(client, *turma_id)
                .await?
                .ok_or_else(|| AppError::NotFound(TURMA_NAO_ENCONTRADA.into()))?;
            Self::verificar_capacidade(client, turma.capacidade_maxima, turma.id, Some(id)).await?;
        } else if matches!(payload.ativo, Patch::Value(true)) {
            // Reactivation puts the student back into the stored class.
            let atual: Aluno = client
                .select_single(&TableQuery::table("alunos").eq("id", id.to_string()))
                .await?
                .map(from_row::<Aluno>)
                .transpose()?
                .ok_or_else(|| AppError::NotFound(ALUNO_NAO_ENCONTRADO.into()))?;
            if let (false, Some(turma_id)) = (atual.ativo, atual.turma_id) {
                if let Some(turma) = TurmaService::buscar(client, turma_id).await? {
                    Self::verificar_capacidade(client, turma.capacidade_maxima, turma.id, Some(id)).await?;
                }
            }
        }

        if payload.ativa_necessidades() {
            match &payload.necessidades_descricao {
                Patch::Value(d) if !d.is_empty() => {}
                Patch::Value(_) | Patch::Null => {
                    return Err(AppError::BadRequest(DESCRICAO_OBRIGATORIA.into()));
                }
                Patch::Missing => {
                    let atual = client
                        .select_single(
                            &TableQuery::table("alunos")
                                .select(&["necessidades_descricao"])
                                .eq("id", id.to_string()),
                        )
                        .await?
                        .ok_or_else(|| AppError::NotFound(ALUNO_NAO_ENCONTRADO.into()))?;
                    let tem_descricao = atual
                        .get("necessidades_descricao")
                        .and_then(|v| v.as_str())
                        .is_some_and(|s| !s.is_empty());
                    if !tem_descricao {
                        return Err(AppError::BadRequest(DESCRICAO_OBRIGATORIA.into()));
                    }
                }
            }
        }

        let hoje = hoje();
        if let Some(data) = payload.data_nascimento.value() {
            validar_nascimento(*data, hoje)?;
        }

        let mut rows = client
            .update(&TableQuery::table("alunos").eq("id", id.to_string()), patch)
            .await?;
        let row = rows
            .pop()
            .ok_or_else(|| AppError::NotFound(ALUNO_NAO_ENCONTRADO.into()))?;
        Ok(AlunoResponse::new(from_row(row)?, hoje))
    }

    /// Soft delete: `ativo` becomes false and today is stamped as the exit date.
    pub async fn deactivate(client: &dyn TableClient, id: Uuid) -> Result<(), AppError> {
        let mut patch = Row::new();
        patch.insert("ativo".into(), false.into());
        patch.insert("data_saida".into(), hoje().to_string().into());
        let rows = client
            .update(&TableQuery::table("alunos").eq("id", id.to_string()), patch)
            .await?;
        if rows.is_empty() {
            return Err(AppError::NotFound(ALUNO_NAO_ENCONTRADO.into()));
        }
        tracing::info!(aluno_id = %id, "aluno deactivated");
        Ok(())
    }

    pub async fn list_by_turma(
        client: &dyn TableClient,
        turma_id: Uuid,
        params: &ListaPorTurma,
    ) -> Result<Vec<AlunoResponse>, AppError> {
        if TurmaService::buscar(client, turma_id).await?.is_none() {
            return Err(AppError::NotFound(TURMA_NAO_ENCONTRADA.into()));
        }
        let mut q = TableQuery::table("alunos").eq("turma_id", turma_id.to_string());
        if params.apenas_ativos {
            q = q.eq("ativo", true);
        }
        respostas(client.select(&q.order("nome")).await?)
    }
}
