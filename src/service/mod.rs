//! Turma and Aluno operations over the table client.

mod alunos;
mod turmas;
pub mod validation;

pub use alunos::{hoje, AlunoService};
pub use turmas::TurmaService;
pub use validation::Validate;
