//! Builds parameterized SELECT, COUNT, INSERT and UPDATE from a `TableQuery`.
//! Identifiers come from the catalog only; every value is a `$n::type` parameter.
//! Rows come back as one `jsonb` value built with `jsonb_build_object`.

use crate::client::{Filter, Row, TableDef, TableQuery};
use crate::sql::params::bind_text;
use serde_json::Value;

/// Quote identifier for PostgreSQL (safe: only from the catalog).
fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

#[derive(Debug)]
pub struct QueryBuf {
    pub sql: String,
    /// Text form of each parameter; `None` binds SQL NULL.
    pub params: Vec<Option<String>>,
}

impl QueryBuf {
    fn new() -> Self {
        QueryBuf {
            sql: String::new(),
            params: Vec::new(),
        }
    }

    /// Push a value and return its placeholder with the column cast, e.g. `$3::uuid`.
    fn push_param(&mut self, def: &TableDef, column: &str, v: &Value) -> String {
        self.params.push(bind_text(v));
        let n = self.params.len();
        match def.column(column) {
            Some(c) => format!("${}::{}", n, c.pg_type),
            None => format!("${}", n),
        }
    }
}

/// `jsonb_build_object('a', "a", 'b', "b", ...)` over the given columns.
fn row_object(columns: &[&str]) -> String {
    let pairs: Vec<String> = columns
        .iter()
        .map(|c| format!("'{}', {}", c.replace('\'', "''"), quoted(c)))
        .collect();
    format!("jsonb_build_object({})", pairs.join(", "))
}

fn projected<'a>(def: &'a TableDef, query: &'a TableQuery) -> Vec<&'a str> {
    if query.columns.is_empty() {
        def.columns.iter().map(|c| c.name).collect()
    } else {
        query.columns.iter().map(String::as_str).collect()
    }
}

fn all_columns(def: &TableDef) -> Vec<&str> {
    def.columns.iter().map(|c| c.name).collect()
}

fn where_clause(q: &mut QueryBuf, def: &TableDef, filters: &[Filter]) -> String {
    let mut parts = Vec::new();
    for f in filters {
        let col = f.column();
        if f.value().is_null() {
            match f {
                Filter::Eq(..) => parts.push(format!("{} IS NULL", quoted(col))),
                Filter::Neq(..) => parts.push(format!("{} IS NOT NULL", quoted(col))),
            }
            continue;
        }
        let ph = q.push_param(def, col, f.value());
        match f {
            Filter::Eq(..) => parts.push(format!("{} = {}", quoted(col), ph)),
            Filter::Neq(..) => parts.push(format!("{} <> {}", quoted(col), ph)),
        }
    }
    if parts.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", parts.join(" AND "))
    }
}

/// SELECT with filters, ORDER BY (in call order) and optional LIMIT/OFFSET.
pub fn select(def: &TableDef, query: &TableQuery) -> QueryBuf {
    let mut q = QueryBuf::new();
    let object = row_object(&projected(def, query));
    let where_sql = where_clause(&mut q, def, &query.filters);
    let order_sql = if query.order.is_empty() {
        String::new()
    } else {
        let parts: Vec<String> = query
            .order
            .iter()
            .map(|column| format!("{} ASC", quoted(column)))
            .collect();
        format!(" ORDER BY {}", parts.join(", "))
    };
    let limit_sql = query.limit.map(|n| format!(" LIMIT {}", n)).unwrap_or_default();
    let offset_sql = query.offset.map(|n| format!(" OFFSET {}", n)).unwrap_or_default();
    q.sql = format!(
        "SELECT {} FROM {}{}{}{}{}",
        object,
        quoted(def.name),
        where_sql,
        order_sql,
        limit_sql,
        offset_sql
    );
    q
}

/// SELECT COUNT(*) with the query filters.
pub fn count(def: &TableDef, query: &TableQuery) -> QueryBuf {
    let mut q = QueryBuf::new();
    let where_sql = where_clause(&mut q, def, &query.filters);
    q.sql = format!("SELECT COUNT(*) FROM {}{}", quoted(def.name), where_sql);
    q
}

/// INSERT the row's columns (catalog order); omitted columns take the database default.
pub fn insert(def: &TableDef, row: &Row) -> QueryBuf {
    let mut q = QueryBuf::new();
    let mut cols = Vec::new();
    let mut placeholders = Vec::new();
    for c in def.columns {
        let Some(v) = row.get(c.name) else { continue };
        placeholders.push(q.push_param(def, c.name, v));
        cols.push(quoted(c.name));
    }
    let returning = row_object(&all_columns(def));
    q.sql = if cols.is_empty() {
        format!("INSERT INTO {} DEFAULT VALUES RETURNING {}", quoted(def.name), returning)
    } else {
        format!(
            "INSERT INTO {} ({}) VALUES ({}) RETURNING {}",
            quoted(def.name),
            cols.join(", "),
            placeholders.join(", "),
            returning
        )
    };
    q
}

/// UPDATE: SET only the columns present in `patch`; rows selected by the query filters.
/// `updated_at` is maintained by the table trigger.
pub fn update(def: &TableDef, query: &TableQuery, patch: &Row) -> QueryBuf {
    let mut q = QueryBuf::new();
    let mut sets = Vec::new();
    for c in def.columns {
        let Some(v) = patch.get(c.name) else { continue };
        let ph = q.push_param(def, c.name, v);
        sets.push(format!("{} = {}", quoted(c.name), ph));
    }
    let where_sql = where_clause(&mut q, def, &query.filters);
    let returning = row_object(&all_columns(def));
    q.sql = format!(
        "UPDATE {} SET {}{} RETURNING {}",
        quoted(def.name),
        sets.join(", "),
        where_sql,
        returning
    );
    q
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::catalog;
    use serde_json::json;

    #[test]
    fn select_casts_filters_and_keeps_order() {
        let query = TableQuery::table("alunos")
            .select(&["id", "nome"])
            .eq("turma_id", "7b1c1a52-3f7e-4a53-8d1e-2b0f3f7a9c10")
            .eq("ativo", true)
            .order("nome")
            .limit(50)
            .offset(10);
        let q = select(&catalog::ALUNOS, &query);
        assert_eq!(
            q.sql,
            "SELECT jsonb_build_object('id', \"id\", 'nome', \"nome\") FROM \"alunos\" \
             WHERE \"turma_id\" = $1::uuid AND \"ativo\" = $2::boolean ORDER BY \"nome\" ASC LIMIT 50 OFFSET 10"
        );
        assert_eq!(
            q.params,
            vec![
                Some("7b1c1a52-3f7e-4a53-8d1e-2b0f3f7a9c10".to_string()),
                Some("true".to_string())
            ]
        );
    }

    #[test]
    fn neq_and_null_filters() {
        let query = TableQuery::table("alunos")
            .eq("matricula", "2025-001")
            .neq("id", "x")
            .eq("data_saida", Value::Null);
        let q = count(&catalog::ALUNOS, &query);
        assert_eq!(
            q.sql,
            "SELECT COUNT(*) FROM \"alunos\" WHERE \"matricula\" = $1::text AND \"id\" <> $2::uuid AND \"data_saida\" IS NULL"
        );
        assert_eq!(q.params.len(), 2);
    }

    #[test]
    fn insert_only_lists_supplied_columns() {
        let row = json!({"serie": "1º Ano", "turma": "A", "nivel": "fundamental", "capacidade_maxima": null});
        let Value::Object(row) = row else { unreachable!() };
        let q = insert(&catalog::TURMAS, &row);
        assert!(q.sql.starts_with(
            "INSERT INTO \"turmas\" (\"serie\", \"turma\", \"nivel\", \"capacidade_maxima\") \
             VALUES ($1::text, $2::text, $3::text, $4::integer) RETURNING jsonb_build_object("
        ));
        assert_eq!(q.params[3], None);
    }

    #[test]
    fn update_numbers_set_params_before_filter_params() {
        let Value::Object(patch) = json!({"ativo": false, "data_saida": "2025-06-30"}) else {
            unreachable!()
        };
        let query = TableQuery::table("alunos").eq("id", "abc");
        let q = update(&catalog::ALUNOS, &query, &patch);
        assert!(q.sql.starts_with(
            "UPDATE \"alunos\" SET \"ativo\" = $1::boolean, \"data_saida\" = $2::date WHERE \"id\" = $3::uuid RETURNING"
        ));
        assert_eq!(q.params[2].as_deref(), Some("abc"));
    }

    #[test]
    fn identifiers_are_quoted() {
        assert_eq!(quoted("a\"b"), "\"a\"\"b\"");
    }
}
