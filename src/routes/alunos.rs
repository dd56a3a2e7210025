use crate::handlers::alunos::{create, delete, list, list_by_turma, read, update};
use crate::state::AppState;
use axum::{
    routing::{get, MethodRouter},
    Router,
};

/// Collection endpoint, mounted at both `/alunos` and `/alunos/`.
pub fn aluno_collection() -> MethodRouter<AppState> {
    get(list).post(create)
}

pub fn aluno_routes() -> Router<AppState> {
    Router::new()
        .route("/", aluno_collection())
        .route("/:id", get(read).patch(update).delete(delete))
        .route("/turma/:turma_id", get(list_by_turma))
}
