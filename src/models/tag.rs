use super::{NivelTag, TipoTag};
use crate::error::AppError;
use crate::service::validation::{self, Validate};
use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use uuid::Uuid;

static COR_HEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#[0-9A-Fa-f]{6}$").unwrap_or_else(|_| unreachable!()));

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tag {
    pub id: Uuid,
    pub nome: String,
    pub tipo: TipoTag,
    pub categoria: Option<String>,
    pub cor: String,
    pub nivel_ensino: NivelTag,
    /// `None` for tags shared by every user.
    pub usuario_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TagCreate {
    pub nome: String,
    #[serde(default)]
    pub tipo: TipoTag,
    #[serde(default)]
    pub categoria: Option<String>,
    #[serde(default)]
    pub cor: Option<String>,
    #[serde(default)]
    pub nivel_ensino: NivelTag,
    #[serde(default)]
    pub usuario_id: Option<Uuid>,
}

impl Validate for TagCreate {
    fn validate(&self) -> Result<(), AppError> {
        validation::length("nome", &self.nome, 2, 100)?;
        validation::max_length("categoria", self.categoria.as_deref(), 50)?;
        if let Some(cor) = &self.cor {
            validation::pattern("cor", cor, &COR_HEX)?;
        }
        Ok(())
    }
}

impl TagCreate {
    pub fn cor_efetiva(&self) -> &str {
        match self.cor.as_deref() {
            Some(c) if !c.is_empty() => c,
            _ => self.tipo.cor_padrao(),
        }
    }

    /// Row for the `tags` table with the effective color filled in.
    pub fn to_row(&self) -> crate::client::Row {
        let mut row = crate::client::Row::new();
        row.insert("nome".into(), self.nome.clone().into());
        row.insert("tipo".into(), self.tipo.as_str().into());
        row.insert("categoria".into(), self.categoria.clone().into());
        row.insert("cor".into(), self.cor_efetiva().into());
        row.insert("nivel_ensino".into(), self.nivel_ensino.as_str().into());
        row.insert(
            "usuario_id".into(),
            self.usuario_id.map(|u| u.to_string()).into(),
        );
        row
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn color_falls_back_to_type_default() {
        let t: TagCreate = serde_json::from_value(json!({"nome": "Muito participativo", "tipo": "positiva"})).unwrap();
        assert_eq!(t.cor_efetiva(), "#28a745");
        assert_eq!(t.nivel_ensino, NivelTag::Ambos);
        let t: TagCreate = serde_json::from_value(json!({"nome": "Criativo", "cor": "#AbCdEf"})).unwrap();
        assert!(t.validate().is_ok());
        assert_eq!(t.cor_efetiva(), "#AbCdEf");
        assert_eq!(t.to_row()["tipo"], json!("neutra"));
    }

    #[test]
    fn malformed_color_is_rejected() {
        let t: TagCreate = serde_json::from_value(json!({"nome": "Criativo", "cor": "0066cc"})).unwrap();
        assert!(t.validate().is_err());
        let t: TagCreate = serde_json::from_value(json!({"nome": "X"})).unwrap();
        assert!(t.validate().is_err());
    }
}
