//! Static catalog of the persisted schema. Query identifiers are checked against it
//! and the SQL builder uses it for parameter casts. Mirrors `migrations/0001_schema.sql`.

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ColumnDefault {
    None,
    /// Random v4 id.
    Uuid,
    /// Current timestamp.
    Now,
    /// Current calendar year.
    CurrentYear,
    Bool(bool),
    Text(&'static str),
    /// JSON literal, e.g. `[]`.
    Json(&'static str),
}

#[derive(Debug)]
pub struct ColumnDef {
    pub name: &'static str,
    /// PostgreSQL type used in `$n::type` casts.
    pub pg_type: &'static str,
    pub default: ColumnDefault,
}

#[derive(Debug)]
pub struct TableDef {
    pub name: &'static str,
    pub columns: &'static [ColumnDef],
    /// Unique column sets. A set containing a NULL value never conflicts.
    pub unique: &'static [(&'static str, &'static [&'static str])],
}

impl TableDef {
    pub fn column(&self, name: &str) -> Option<&'static ColumnDef> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column(name).is_some()
    }
}

const fn col(name: &'static str, pg_type: &'static str) -> ColumnDef {
    ColumnDef {
        name,
        pg_type,
        default: ColumnDefault::None,
    }
}

const fn col_default(name: &'static str, pg_type: &'static str, default: ColumnDefault) -> ColumnDef {
    ColumnDef { name, pg_type, default }
}

const ID: ColumnDef = col_default("id", "uuid", ColumnDefault::Uuid);
const CREATED_AT: ColumnDef = col_default("created_at", "timestamptz", ColumnDefault::Now);
const UPDATED_AT: ColumnDef = col_default("updated_at", "timestamptz", ColumnDefault::Now);

pub static ESCOLAS: TableDef = TableDef {
    name: "escolas",
    columns: &[ID, col("nome", "text"), CREATED_AT, UPDATED_AT],
    unique: &[],
};

pub static USUARIOS: TableDef = TableDef {
    name: "usuarios",
    columns: &[
        ID,
        col("email", "text"),
        col("nome", "text"),
        col("senha_hash", "text"),
        col("telefone", "text"),
        col_default("tipo", "text", ColumnDefault::Text("professor")),
        col("escola_id", "uuid"),
        col("coordenador_id", "uuid"),
        col_default("ativo", "boolean", ColumnDefault::Bool(true)),
        CREATED_AT,
        UPDATED_AT,
    ],
    unique: &[("usuarios_email_key", &["email"])],
};

pub static TURMAS: TableDef = TableDef {
    name: "turmas",
    columns: &[
        ID,
        col("serie", "text"),
        col("turma", "text"),
        col_default("ano_letivo", "integer", ColumnDefault::CurrentYear),
        col("periodo", "text"),
        col("nivel", "text"),
        col("capacidade_maxima", "integer"),
        col("professor_id", "uuid"),
        col("escola_id", "uuid"),
        col_default("ativo", "boolean", ColumnDefault::Bool(true)),
        CREATED_AT,
        UPDATED_AT,
    ],
    unique: &[(
        "turmas_serie_turma_ano_letivo_periodo_key",
        &["serie", "turma", "ano_letivo", "periodo"],
    )],
};

pub static ALUNOS: TableDef = TableDef {
    name: "alunos",
    columns: &[
        ID,
        col("matricula", "text"),
        col("nome", "text"),
        col("data_nascimento", "date"),
        col("foto_url", "text"),
        col("turma_id", "uuid"),
        col("responsavel_nome", "text"),
        col("responsavel_telefone", "text"),
        col("responsavel_email", "text"),
        col("responsavel_foto_url", "text"),
        col_default("necessidades_especiais", "boolean", ColumnDefault::Bool(false)),
        col("necessidades_descricao", "text"),
        col("alergias", "text"),
        col("restricoes_alimentares", "text"),
        col("observacoes", "text"),
        col_default("ativo", "boolean", ColumnDefault::Bool(true)),
        col("data_saida", "date"),
        CREATED_AT,
        UPDATED_AT,
    ],
    unique: &[("alunos_matricula_key", &["matricula"])],
};

pub static TAGS: TableDef = TableDef {
    name: "tags",
    columns: &[
        ID,
        col("nome", "text"),
        col_default("tipo", "text", ColumnDefault::Text("neutra")),
        col("categoria", "text"),
        col_default("cor", "text", ColumnDefault::Text("#0066cc")),
        col_default("nivel_ensino", "text", ColumnDefault::Text("ambos")),
        col("usuario_id", "uuid"),
        CREATED_AT,
    ],
    unique: &[("tags_nome_usuario_id_key", &["nome", "usuario_id"])],
};

pub static AVALIACOES: TableDef = TableDef {
    name: "avaliacoes",
    columns: &[
        ID,
        col("aluno_id", "uuid"),
        col("data_avaliacao", "date"),
        col("trimestre", "integer"),
        col("ano", "integer"),
        col_default("status", "text", ColumnDefault::Text("rascunho")),
        col("campos_avaliados", "jsonb"),
        col("observacao_livre", "text"),
        col("professor_id", "uuid"),
        CREATED_AT,
        UPDATED_AT,
    ],
    unique: &[("avaliacoes_aluno_id_data_avaliacao_key", &["aluno_id", "data_avaliacao"])],
};

pub static AVALIACAO_TAGS: TableDef = TableDef {
    name: "avaliacao_tags",
    columns: &[col("avaliacao_id", "uuid"), col("tag_id", "uuid")],
    unique: &[("avaliacao_tags_pkey", &["avaliacao_id", "tag_id"])],
};

pub static RELATORIOS: TableDef = TableDef {
    name: "relatorios",
    columns: &[
        ID,
        col("aluno_id", "uuid"),
        col("trimestre", "integer"),
        col("ano", "integer"),
        col("texto_final", "text"),
        col_default("historico_revisoes", "jsonb", ColumnDefault::Json("[]")),
        col("dados_consolidados", "jsonb"),
        col_default("status", "text", ColumnDefault::Text("rascunho")),
        col("pdf_url", "text"),
        col("enviado_em", "timestamptz"),
        col("enviado_por", "text"),
        col("professor_id", "uuid"),
        col("coordenador_id", "uuid"),
        col("aprovado_em", "timestamptz"),
        CREATED_AT,
        UPDATED_AT,
    ],
    unique: &[("relatorios_aluno_id_trimestre_ano_key", &["aluno_id", "trimestre", "ano"])],
};

static TABLES: [&TableDef; 8] = [
    &ESCOLAS,
    &USUARIOS,
    &TURMAS,
    &ALUNOS,
    &TAGS,
    &AVALIACOES,
    &AVALIACAO_TAGS,
    &RELATORIOS,
];

pub fn table(name: &str) -> Option<&'static TableDef> {
    TABLES.iter().copied().find(|t| t.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_table_is_reachable_by_name() {
        for name in [
            "escolas",
            "usuarios",
            "turmas",
            "alunos",
            "tags",
            "avaliacoes",
            "avaliacao_tags",
            "relatorios",
        ] {
            assert!(table(name).is_some(), "missing {}", name);
        }
        assert!(table("matriculas").is_none());
    }

    #[test]
    fn unique_sets_only_name_known_columns() {
        for t in TABLES {
            for (_, cols) in t.unique {
                for c in *cols {
                    assert!(t.has_column(c), "{}.{}", t.name, c);
                }
            }
        }
    }
}
