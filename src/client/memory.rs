//! In-process table client. Applies catalog defaults and unique constraints the way
//! the PostgreSQL schema does; used by tests and local experiments.

use super::{check_column, resolve, resolve_table, ColumnDefault, Filter, Row, StoreError, TableClient, TableDef, TableQuery};
use async_trait::async_trait;
use chrono::{Datelike, Local, Utc};
use serde_json::Value;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::RwLock;

#[derive(Default)]
pub struct MemoryTableClient {
    tables: RwLock<HashMap<String, Vec<Row>>>,
}

impl MemoryTableClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every stored row of a table, in insertion order.
    pub fn rows(&self, table: &str) -> Vec<Row> {
        self.tables
            .read()
            .map(|t| t.get(table).cloned().unwrap_or_default())
            .unwrap_or_default()
    }
}

fn poisoned<T>(_: T) -> StoreError {
    StoreError::Unavailable("memory store lock poisoned".into())
}

fn default_value(d: ColumnDefault) -> Value {
    match d {
        ColumnDefault::None => Value::Null,
        ColumnDefault::Uuid => Value::String(uuid::Uuid::new_v4().to_string()),
        ColumnDefault::Now => Value::String(Utc::now().to_rfc3339()),
        ColumnDefault::CurrentYear => Value::from(Local::now().year()),
        ColumnDefault::Bool(b) => Value::Bool(b),
        ColumnDefault::Text(s) => Value::String(s.to_string()),
        ColumnDefault::Json(s) => serde_json::from_str(s).unwrap_or(Value::Null),
    }
}

/// Equality with numeric comparison across integer/float representations.
fn value_eq(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(n), Value::Number(m)) => n.as_f64() == m.as_f64(),
        _ => a == b,
    }
}

/// Ascending order with NULLs last, as PostgreSQL sorts by default.
fn compare(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Null, Value::Null) => Ordering::Equal,
        (Value::Null, _) => Ordering::Greater,
        (_, Value::Null) => Ordering::Less,
        (Value::Number(n), Value::Number(m)) => n
            .as_f64()
            .partial_cmp(&m.as_f64())
            .unwrap_or(Ordering::Equal),
        (Value::String(s), Value::String(t)) => s.cmp(t),
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        _ => a.to_string().cmp(&b.to_string()),
    }
}

fn matches(row: &Row, filters: &[Filter]) -> bool {
    filters.iter().all(|f| {
        let cell = row.get(f.column()).unwrap_or(&Value::Null);
        match f {
            Filter::Eq(_, v) if v.is_null() => cell.is_null(),
            Filter::Neq(_, v) if v.is_null() => !cell.is_null(),
            // SQL comparison with NULL is never true.
            Filter::Eq(_, v) => !cell.is_null() && value_eq(cell, v),
            Filter::Neq(_, v) => !cell.is_null() && !value_eq(cell, v),
        }
    })
}

fn project(row: &Row, columns: &[String]) -> Row {
    if columns.is_empty() {
        return row.clone();
    }
    columns
        .iter()
        .map(|c| (c.clone(), row.get(c).cloned().unwrap_or(Value::Null)))
        .collect()
}

/// Reject `candidate` if it collides with any row other than `skip` on a unique set.
fn check_unique(def: &TableDef, rows: &[Row], candidate: &Row, skip: Option<usize>) -> Result<(), StoreError> {
    for (constraint, cols) in def.unique {
        let key: Vec<&Value> = cols.iter().map(|c| candidate.get(*c).unwrap_or(&Value::Null)).collect();
        if key.iter().any(|v| v.is_null()) {
            continue;
        }
        let clash = rows.iter().enumerate().any(|(i, other)| {
            Some(i) != skip
                && cols
                    .iter()
                    .zip(&key)
                    .all(|(c, v)| value_eq(other.get(*c).unwrap_or(&Value::Null), v))
        });
        if clash {
            return Err(StoreError::UniqueViolation((*constraint).to_string()));
        }
    }
    Ok(())
}

#[async_trait]
impl TableClient for MemoryTableClient {
    async fn select(&self, query: &TableQuery) -> Result<Vec<Row>, StoreError> {
        resolve(query)?;
        let tables = self.tables.read().map_err(poisoned)?;
        let mut rows: Vec<&Row> = tables
            .get(&query.table)
            .map(|rows| rows.iter().filter(|r| matches(r, &query.filters)).collect())
            .unwrap_or_default();
        rows.sort_by(|a, b| {
            for column in &query.order {
                let left = a.get(column).unwrap_or(&Value::Null);
                let right = b.get(column).unwrap_or(&Value::Null);
                let ord = compare(left, right);
                if ord != Ordering::Equal {
                    return ord;
                }
            }
            Ordering::Equal
        });
        let offset = query.offset.unwrap_or(0) as usize;
        let limit = query.limit.map(|n| n as usize).unwrap_or(usize::MAX);
        Ok(rows
            .into_iter()
            .skip(offset)
            .take(limit)
            .map(|r| project(r, &query.columns))
            .collect())
    }

    async fn count(&self, query: &TableQuery) -> Result<u64, StoreError> {
        resolve(query)?;
        let tables = self.tables.read().map_err(poisoned)?;
        let n = tables
            .get(&query.table)
            .map(|rows| rows.iter().filter(|r| matches(r, &query.filters)).count())
            .unwrap_or(0);
        Ok(n as u64)
    }

    async fn insert(&self, table: &str, row: Row) -> Result<Vec<Row>, StoreError> {
        let def = resolve_table(table)?;
        for column in row.keys() {
            check_column(def, column)?;
        }
        let mut stored = Row::new();
        for c in def.columns {
            let v = match row.get(c.name) {
                Some(v) => v.clone(),
                None => default_value(c.default),
            };
            stored.insert(c.name.to_string(), v);
        }
        let mut tables = self.tables.write().map_err(poisoned)?;
        let rows = tables.entry(def.name.to_string()).or_default();
        check_unique(def, rows, &stored, None)?;
        rows.push(stored.clone());
        Ok(vec![stored])
    }

    async fn update(&self, query: &TableQuery, patch: Row) -> Result<Vec<Row>, StoreError> {
        let def = resolve(query)?;
        for column in patch.keys() {
            check_column(def, column)?;
        }
        let mut tables = self.tables.write().map_err(poisoned)?;
        let rows = tables.entry(def.name.to_string()).or_default();
        let targets: Vec<usize> = rows
            .iter()
            .enumerate()
            .filter(|(_, r)| matches(r, &query.filters))
            .map(|(i, _)| i)
            .collect();

        let mut updated = Vec::with_capacity(targets.len());
        for i in targets {
            let mut next = rows[i].clone();
            for (k, v) in &patch {
                next.insert(k.clone(), v.clone());
            }
            if !patch.is_empty() && def.has_column("updated_at") {
                next.insert("updated_at".into(), Value::String(Utc::now().to_rfc3339()));
            }
            check_unique(def, rows, &next, Some(i))?;
            rows[i] = next.clone();
            updated.push(next);
        }
        Ok(updated)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        let _tables = self.tables.read().map_err(poisoned)?;
        Ok(())
    }
}
