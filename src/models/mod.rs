//! Typed request and response shapes for every persisted entity.

pub mod aluno;
pub mod avaliacao;
pub mod enums;
pub mod escola;
pub(crate) mod flag;
mod patch;
pub mod relatorio;
pub mod tag;
pub mod turma;
pub mod usuario;

pub use aluno::{calcular_idade, Aluno, AlunoCreate, AlunoFiltro, AlunoResponse, AlunoUpdate, ListaPorTurma, OrdenacaoAluno};
pub use avaliacao::{Avaliacao, AvaliacaoCreate, AvaliacaoResponse, AvaliacaoUpdate};
pub use enums::*;
pub use escola::Escola;
pub use patch::Patch;
pub use relatorio::{Relatorio, RelatorioCreate, RelatorioUpdate, RevisaoHistorico};
pub use tag::{Tag, TagCreate};
pub use turma::{ContagemAlunos, Turma, TurmaCreate, TurmaFiltro, TurmaResponse, TurmaUpdate};
pub use usuario::{NovoUsuario, Usuario};

pub(crate) fn default_true() -> bool {
    true
}
