//! Closed value sets stored as text (or integer, for `Trimestre`) columns.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! text_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $text:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "lowercase")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

text_enum!(NivelEnsino { Infantil => "infantil", Fundamental => "fundamental" });

text_enum!(PeriodoAula { Manha => "manha", Tarde => "tarde", Integral => "integral" });

text_enum!(TipoUsuario { Professor => "professor", Coordenador => "coordenador", Admin => "admin" });

text_enum!(StatusRelatorio { Rascunho => "rascunho", Revisao => "revisao", Aprovado => "aprovado" });

text_enum!(StatusAvaliacao { Rascunho => "rascunho", Concluida => "concluida" });

text_enum!(TipoTag { Positiva => "positiva", Negativa => "negativa", Neutra => "neutra" });

text_enum!(
    /// Education level a tag applies to.
    NivelTag { Infantil => "infantil", Fundamental => "fundamental", Ambos => "ambos" }
);

text_enum!(TipoEnvio { Email => "email", Whatsapp => "whatsapp", Api => "api" });

impl Default for TipoUsuario {
    fn default() -> Self {
        TipoUsuario::Professor
    }
}

impl Default for StatusRelatorio {
    fn default() -> Self {
        StatusRelatorio::Rascunho
    }
}

impl Default for StatusAvaliacao {
    fn default() -> Self {
        StatusAvaliacao::Rascunho
    }
}

impl Default for TipoTag {
    fn default() -> Self {
        TipoTag::Neutra
    }
}

impl Default for NivelTag {
    fn default() -> Self {
        NivelTag::Ambos
    }
}

impl TipoTag {
    /// Color used when a tag is created without one.
    pub fn cor_padrao(&self) -> &'static str {
        match self {
            TipoTag::Positiva => "#28a745",
            TipoTag::Negativa => "#dc3545",
            TipoTag::Neutra => "#6c757d",
        }
    }
}

/// Academic term, 1 to 3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Trimestre(u8);

impl Trimestre {
    pub fn get(&self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Trimestre {
    type Error = String;

    fn try_from(n: u8) -> Result<Self, Self::Error> {
        match n {
            1..=3 => Ok(Trimestre(n)),
            _ => Err(format!("trimestre must be 1, 2 or 3, got {}", n)),
        }
    }
}

impl From<Trimestre> for u8 {
    fn from(t: Trimestre) -> u8 {
        t.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn text_values_match_store_checks() {
        assert_eq!(serde_json::to_value(PeriodoAula::Manha).unwrap(), json!("manha"));
        assert_eq!(NivelTag::Ambos.as_str(), "ambos");
        assert_eq!(TipoEnvio::Whatsapp.to_string(), "whatsapp");
        let n: NivelEnsino = serde_json::from_value(json!("fundamental")).unwrap();
        assert_eq!(n, NivelEnsino::Fundamental);
        assert!(serde_json::from_value::<PeriodoAula>(json!("noite")).is_err());
    }

    #[test]
    fn trimestre_rejects_out_of_range() {
        assert_eq!(serde_json::from_value::<Trimestre>(json!(2)).unwrap().get(), 2);
        assert!(serde_json::from_value::<Trimestre>(json!(0)).is_err());
        assert!(serde_json::from_value::<Trimestre>(json!(4)).is_err());
        assert_eq!(serde_json::to_value(Trimestre(3)).unwrap(), json!(3));
    }

    #[test]
    fn default_tag_colors_follow_type() {
        assert_eq!(TipoTag::default().cor_padrao(), "#6c757d");
        assert_eq!(TipoTag::Positiva.cor_padrao(), "#28a745");
        assert_eq!(TipoTag::Negativa.cor_padrao(), "#dc3545");
    }
}
