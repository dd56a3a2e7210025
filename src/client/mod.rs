//! Table-query client: the single handle every handler uses to reach the store.
//! `PgTableClient` talks to PostgreSQL; `MemoryTableClient` keeps rows in process.

pub mod catalog;
mod memory;
mod postgres;
mod query;

pub use catalog::{ColumnDef, ColumnDefault, TableDef};
pub use memory::MemoryTableClient;
pub use postgres::PgTableClient;
pub use query::{Filter, TableQuery};

use async_trait::async_trait;
use serde_json::{Map, Value};
use thiserror::Error;

/// One row as returned by the store: column name -> JSON value.
pub type Row = Map<String, Value>;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("database: {0}")]
    Db(sqlx::Error),
    #[error("unique constraint violated: {0}")]
    UniqueViolation(String),
    #[error("unknown table: {0}")]
    UnknownTable(String),
    #[error("unknown column {table}.{column}")]
    UnknownColumn { table: String, column: String },
    #[error("expected at most one row from {table}, got {count}")]
    MultipleRows { table: String, count: usize },
    #[error("row decode: {0}")]
    Decode(String),
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db) = &e {
            if db.is_unique_violation() {
                return StoreError::UniqueViolation(db.constraint().unwrap_or("unique").to_string());
            }
        }
        StoreError::Db(e)
    }
}

#[async_trait]
pub trait TableClient: Send + Sync {
    /// Rows matching the query, in the requested order.
    async fn select(&self, query: &TableQuery) -> Result<Vec<Row>, StoreError>;

    /// Number of rows matching the query filters. Ordering and pagination are ignored.
    async fn count(&self, query: &TableQuery) -> Result<u64, StoreError>;

    /// Insert one row; returns the stored row (with defaults applied).
    async fn insert(&self, table: &str, row: Row) -> Result<Vec<Row>, StoreError>;

    /// Apply `patch` to every row matching the query filters; returns the updated rows.
    async fn update(&self, query: &TableQuery, patch: Row) -> Result<Vec<Row>, StoreError>;

    /// Round trip to the store.
    async fn ping(&self) -> Result<(), StoreError>;

    /// Zero rows is `None`; more than one row is an error.
    async fn select_single(&self, query: &TableQuery) -> Result<Option<Row>, StoreError> {
        let mut rows = self.select(&query.clone().limit(2)).await?;
        match rows.len() {
            0 | 1 => Ok(rows.pop()),
            count => Err(StoreError::MultipleRows {
                table: query.table.clone(),
                count,
            }),
        }
    }
}

/// Resolve the query's table and check every referenced column exists.
pub(crate) fn resolve(query: &TableQuery) -> Result<&'static TableDef, StoreError> {
    let def = resolve_table(&query.table)?;
    for column in query.referenced_columns() {
        check_column(def, column)?;
    }
    Ok(def)
}

pub(crate) fn resolve_table(name: &str) -> Result<&'static TableDef, StoreError> {
    catalog::table(name).ok_or_else(|| StoreError::UnknownTable(name.to_string()))
}

pub(crate) fn check_column(def: &TableDef, column: &str) -> Result<(), StoreError> {
    if def.has_column(column) {
        Ok(())
    } else {
        Err(StoreError::UnknownColumn {
            table: def.name.to_string(),
            column: column.to_string(),
        })
    }
}

/// Decode a store row into a typed model.
pub fn from_row<T: serde::de::DeserializeOwned>(row: Row) -> Result<T, StoreError> {
    serde_json::from_value(Value::Object(row)).map_err(|e| StoreError::Decode(e.to_string()))
}

/// Encode a payload into a row. The payload must serialize to a JSON object.
pub fn to_row<T: serde::Serialize>(payload: &T) -> Result<Row, StoreError> {
    match serde_json::to_value(payload).map_err(|e| StoreError::Decode(e.to_string()))? {
        Value::Object(map) => Ok(map),
        other => Err(StoreError::Decode(format!("expected an object, got {}", other))),
    }
}
