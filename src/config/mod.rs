pub mod domain;
pub mod settings;

pub use settings::*;
