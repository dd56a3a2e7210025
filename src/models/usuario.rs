use super::TipoUsuario;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Usuario {
    pub id: Uuid,
    pub email: String,
    pub nome: String,
    #[serde(skip_serializing)]
    pub senha_hash: String,
    pub telefone: Option<String>,
    pub tipo: TipoUsuario,
    pub escola_id: Option<Uuid>,
    pub coordenador_id: Option<Uuid>,
    pub ativo: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insert payload for `usuarios`.
#[derive(Debug, Clone, Serialize)]
pub struct NovoUsuario {
    pub email: String,
    pub nome: String,
    pub senha_hash: String,
    pub telefone: Option<String>,
    pub tipo: TipoUsuario,
    pub escola_id: Option<Uuid>,
    pub coordenador_id: Option<Uuid>,
}
