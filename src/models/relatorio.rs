use super::{StatusRelatorio, TipoEnvio, Trimestre};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevisaoHistorico {
    pub data: DateTime<Utc>,
    pub usuario_id: Uuid,
    pub usuario_nome: String,
    #[serde(default)]
    pub comentario: Option<String>,
    #[serde(default)]
    pub versao_anterior: Option<String>,
}

/// A stored `relatorios` row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Relatorio {
    pub id: Uuid,
    pub aluno_id: Uuid,
    pub trimestre: Trimestre,
    pub ano: i32,
    pub texto_final: String,
    #[serde(default)]
    pub historico_revisoes: Vec<RevisaoHistorico>,
    pub dados_consolidados: Value,
    pub status: StatusRelatorio,
    pub pdf_url: Option<String>,
    pub enviado_em: Option<DateTime<Utc>>,
    pub enviado_por: Option<TipoEnvio>,
    pub professor_id: Option<Uuid>,
    pub coordenador_id: Option<Uuid>,
    pub aprovado_em: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RelatorioCreate {
    pub aluno_id: Uuid,
    pub trimestre: Trimestre,
    pub ano: i32,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RelatorioUpdate {
    pub texto_final: Option<String>,
    pub status: Option<StatusRelatorio>,
    pub adicionar_revisao: Option<RevisaoHistorico>,
}

impl Relatorio {
    /// Apply an update in place. A supplied revision is appended to the history;
    /// when the final text changes it records the text being replaced.
    pub fn aplicar(&mut self, update: RelatorioUpdate) {
        let anterior = match &update.texto_final {
            Some(novo) if *novo != self.texto_final => Some(std::mem::replace(&mut self.texto_final, novo.clone())),
            _ => None,
        };
        if let Some(mut revisao) = update.adicionar_revisao {
            if revisao.versao_anterior.is_none() {
                revisao.versao_anterior = anterior;
            }
            self.historico_revisoes.push(revisao);
        }
        if let Some(status) = update.status {
            self.status = status;
        }
    }
}
