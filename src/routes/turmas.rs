use crate::handlers::turmas::{alunos_count, create, delete, list, read, update};
use crate::state::AppState;
use axum::{
    routing::{get, MethodRouter},
    Router,
};

/// Collection endpoint, mounted at both `/turmas` and `/turmas/`.
pub fn turma_collection() -> MethodRouter<AppState> {
    get(list).post(create)
}

pub fn turma_routes() -> Router<AppState> {
    Router::new()
        .route("/", turma_collection())
        .route("/:id", get(read).patch(update).delete(delete))
        .route("/:id/alunos-count", get(alunos_count))
}
