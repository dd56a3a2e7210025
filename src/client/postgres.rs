//! PostgreSQL-backed table client.

use super::{check_column, resolve, resolve_table, Row, StoreError, TableClient, TableQuery};
use crate::config::Settings;
use crate::sql::{builder, QueryBuf};
use async_trait::async_trait;
use serde_json::Value;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;
use std::str::FromStr;
use std::time::Duration;

#[derive(Clone)]
pub struct PgTableClient {
    pool: PgPool,
}

impl PgTableClient {
    pub fn new(pool: PgPool) -> Self {
        PgTableClient { pool }
    }

    /// Build the process-wide client from settings. The pool opens connections on
    /// first use, so this only fails on a malformed URL.
    pub fn connect_lazy(settings: &Settings) -> Result<Self, StoreError> {
        let options = PgConnectOptions::from_str(&settings.database_url)
            .map_err(StoreError::from)?
            .password(&settings.database_key);
        let pool = PgPoolOptions::new()
            .max_connections(settings.database_max_connections)
            .acquire_timeout(Duration::from_secs(10))
            .connect_lazy_with(options);
        tracing::info!(
            max_connections = settings.database_max_connections,
            "database client configured"
        );
        Ok(PgTableClient { pool })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    async fn fetch_rows(&self, q: &QueryBuf) -> Result<Vec<Row>, StoreError> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let mut query = sqlx::query_scalar::<_, Value>(&q.sql);
        for p in &q.params {
            query = query.bind(p.as_deref());
        }
        let values = query.fetch_all(&self.pool).await?;
        values.into_iter().map(into_row).collect()
    }
}

fn into_row(v: Value) -> Result<Row, StoreError> {
    match v {
        Value::Object(map) => Ok(map),
        other => Err(StoreError::Decode(format!("expected a row object, got {}", other))),
    }
}

#[async_trait]
impl TableClient for PgTableClient {
    async fn select(&self, query: &TableQuery) -> Result<Vec<Row>, StoreError> {
        let def = resolve(query)?;
        let q = builder::select(def, query);
        self.fetch_rows(&q).await
    }

    async fn count(&self, query: &TableQuery) -> Result<u64, StoreError> {
        let def = resolve(query)?;
        let q = builder::count(def, query);
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let mut sql_query = sqlx::query_scalar::<_, i64>(&q.sql);
        for p in &q.params {
            sql_query = sql_query.bind(p.as_deref());
        }
        let n = sql_query.fetch_one(&self.pool).await?;
        Ok(u64::try_from(n).unwrap_or(0))
    }

    async fn insert(&self, table: &str, row: Row) -> Result<Vec<Row>, StoreError> {
        let def = resolve_table(table)?;
        for column in row.keys() {
            check_column(def, column)?;
        }
        let q = builder::insert(def, &row);
        self.fetch_rows(&q).await
    }

    async fn update(&self, query: &TableQuery, patch: Row) -> Result<Vec<Row>, StoreError> {
        let def = resolve(query)?;
        for column in patch.keys() {
            check_column(def, column)?;
        }
        if patch.is_empty() {
            return self.select(query).await;
        }
        let q = builder::update(def, query, &patch);
        self.fetch_rows(&q).await
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
