//! Apply the persisted schema. Every statement is idempotent, so this runs on each
//! startup when `RUN_MIGRATIONS=true`.

use crate::client::StoreError;
use sqlx::PgPool;

pub const SCHEMA_SQL: &str = include_str!("../migrations/0001_schema.sql");

pub async fn apply_schema(pool: &PgPool) -> Result<(), StoreError> {
    tracing::info!("applying database schema");
    sqlx::raw_sql(SCHEMA_SQL).execute(pool).await?;
    tracing::info!("database schema up to date");
    Ok(())
}
