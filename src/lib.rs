//! School evaluation backend: classes (turmas) and students (alunos) over a
//! PostgreSQL table-query client.

pub mod client;
pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod migration;
pub mod models;
pub mod response;
pub mod routes;
pub mod service;
pub mod sql;
pub mod state;

pub use client::{MemoryTableClient, PgTableClient, TableClient, TableQuery};
pub use config::Settings;
pub use error::{AppError, ConfigError};
pub use migration::apply_schema;
pub use routes::app;
pub use state::AppState;
