//! Class operations. Occupancy is always a live count of active students.

use crate::client::{from_row, TableClient, TableQuery};
use crate::error::AppError;
use crate::models::{ContagemAlunos, Turma, TurmaCreate, TurmaFiltro, TurmaResponse, TurmaUpdate};
use uuid::Uuid;

pub const TURMA_NAO_ENCONTRADA: &str = "Turma não encontrada";

pub struct TurmaService;

impl TurmaService {
    /// Active students referencing the class.
    pub async fn ocupacao(client: &dyn TableClient, turma_id: Uuid) -> Result<u64, AppError> {
        Self::ocupacao_exceto(client, turma_id, None).await
    }

    /// Active students referencing the class, leaving out `exceto` when given.
    pub async fn ocupacao_exceto(
        client: &dyn TableClient,
        turma_id: Uuid,
        exceto: Option<Uuid>,
    ) -> Result<u64, AppError> {
        let mut q = TableQuery::table("alunos")
            .eq("turma_id", turma_id.to_string())
            .eq("ativo", true);
        if let Some(id) = exceto {
            q = q.neq("id", id.to_string());
        }
        Ok(client.count(&q).await?)
    }

    pub async fn buscar(client: &dyn TableClient, id: Uuid) -> Result<Option<Turma>, AppError> {
        let row = client
            .select_single(&TableQuery::table("turmas").eq("id", id.to_string()))
            .await?;
        Ok(row.map(from_row::<Turma>).transpose()?)
    }

    pub async fn create(client: &dyn TableClient, payload: &TurmaCreate) -> Result<TurmaResponse, AppError> {
        let mut rows = client.insert("turmas", payload.to_row()?).await?;
        let row = rows
            .pop()
            .ok_or_else(|| AppError::BadRequest("Erro ao criar turma".into()))?;
        let turma: Turma = from_row(row)?;
        tracing::info!(turma_id = %turma.id, nome = %turma.nome_completo(), "turma created");
        Ok(TurmaResponse::new(turma, 0))
    }

    pub async fn list(client: &dyn TableClient, filtro: &TurmaFiltro) -> Result<Vec<TurmaResponse>, AppError> {
        let mut q = TableQuery::table("turmas");
        if let Some(nivel) = filtro.nivel {
            q = q.eq("nivel", nivel.as_str());
        }
        if let Some(periodo) = filtro.periodo {
            q = q.eq("periodo", periodo.as_str());
        }
        if let Some(ano) = filtro.ano_letivo {
            q = q.eq("ano_letivo", ano);
        }
        q = q.eq("ativo", filtro.ativo).order("serie").order("turma");

        let rows = client.select(&q).await?;
        let mut out = Vec::with_capacity(rows.len());
        for row in rows {
            let turma: Turma = from_row(row)?;
            let quantidade = Self::ocupacao(client, turma.id).await?;
            out.push(TurmaResponse::new(turma, quantidade));
        }
        Ok(out)
    }

    pub async fn get(client: &dyn TableClient, id: Uuid) -> Result<TurmaResponse, AppError> {
        let turma = Self::buscar(client, id)
            .await?
            .ok_or_else(|| AppError::NotFound(TURMA_NAO_ENCONTRADA.into()))?;
        let quantidade = Self::ocupacao(client, id).await?;
        Ok(TurmaResponse::new(turma, quantidade))
    }

    pub async fn update(client: &dyn TableClient, id: Uuid, payload: &TurmaUpdate) -> Result<TurmaResponse, AppError> {
        let patch = payload.to_row()?;
        if patch.is_empty() {
            return Err(AppError::BadRequest("Nenhum campo para atualizar".into()));
        }
        let mut rows = client
            .update(&TableQuery::table("turmas").eq("id", id.to_string()), patch)
            .await?;
        let row = rows
            .pop()
            .ok_or_else(|| AppError::NotFound(TURMA_NAO_ENCONTRADA.into()))?;
        let turma: Turma = from_row(row)?;
        let quantidade = Self::ocupacao(client, id).await?;
        Ok(TurmaResponse::new(turma, quantidade))
    }

    /// Soft delete: the row stays, `ativo` becomes false.
    pub async fn deactivate(client: &dyn TableClient, id: Uuid) -> Result<(), AppError> {
        let mut patch = crate::client::Row::new();
        patch.insert("ativo".into(), false.into());
        let rows = client
            .update(&TableQuery::table("turmas").eq("id", id.to_string()), patch)
            .await?;
        if rows.is_empty() {
            return Err(AppError::NotFound(TURMA_NAO_ENCONTRADA.into()));
        }
        tracing::info!(turma_id = %id, "turma deactivated");
        Ok(())
    }

    pub async fn count_alunos(client: &dyn TableClient, id: Uuid) -> Result<ContagemAlunos, AppError> {
        let turma = Self::buscar(client, id)
            .await?
            .ok_or_else(|| AppError::NotFound(TURMA_NAO_ENCONTRADA.into()))?;
        let total = Self::ocupacao(client, id).await?;
        Ok(ContagemAlunos {
            turma_id: id,
            turma_nome: turma.nome_completo(),
            total_alunos: total,
        })
    }
}
