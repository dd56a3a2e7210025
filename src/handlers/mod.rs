//! HTTP handlers: decode, call the service, shape the response.

pub mod alunos;
pub mod system;
pub mod turmas;
