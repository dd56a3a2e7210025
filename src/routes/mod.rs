//! Router assembly: process endpoints at the root, resources under `/api/v1`.

mod alunos;
mod common;
mod turmas;

pub use alunos::{aluno_collection, aluno_routes};
pub use common::common_routes;
pub use turmas::{turma_collection, turma_routes};

use crate::state::AppState;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

pub const API_PREFIX: &str = "/api/v1";

/// Request bodies above this size are rejected with 413.
pub const MAX_BODY_BYTES: usize = 1024 * 1024;

/// The full application router.
pub fn app(state: AppState) -> Router {
    // A nested "/" only matches the bare prefix, so the trailing-slash form is routed explicitly.
    let api = Router::new()
        .nest("/turmas", turma_routes())
        .route("/turmas/", turma_collection())
        .nest("/alunos", aluno_routes())
        .route("/alunos/", aluno_collection());

    Router::new()
        .merge(common_routes())
        .nest(API_PREFIX, api)
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
