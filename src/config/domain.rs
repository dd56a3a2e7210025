//! Fixed educational-domain values used by evaluations and exposed on `/config/info`.

/// Evaluation scale: score -> meaning. Scores outside this table are invalid.
pub const ESCALA_AVALIACAO: [(u8, &str); 3] = [
    (1, "Realiza com autonomia"),
    (2, "Em desenvolvimento"),
    (3, "Precisa de intervenção"),
];

pub const CATEGORIAS_FUNDAMENTAL: &[&str] = &[
    "Português",
    "Matemática",
    "História",
    "Geografia",
    "Ciências",
    "Artes",
    "Educação Física",
    "Música",
    "Inglês",
    "Eu no Mundo",
];

pub const CATEGORIAS_INFANTIL: &[&str] = &[
    "Integração e Adaptação",
    "Socioemocional",
    "Linguagem",
    "Cognição",
    "Motricidade Fina",
    "Educação Física",
    "Artes",
    "Inglês",
    "Música",
];

pub const TAGS_COMPORTAMENTAIS_PADRAO: &[&str] = &[
    "Interage bem com colegas",
    "Demonstra liderança",
    "Aprende melhor visualmente",
    "Necessita de apoio individual",
    "Muito participativo",
    "Tímido mas atento",
    "Criativo e imaginativo",
    "Organizado",
    "Precisa melhorar organização",
    "Excelente memória",
    "Raciocínio lógico desenvolvido",
    "Boa coordenação motora",
    "Dificuldade de concentração",
    "Muito concentrado",
    "Respeitoso e educado",
];

pub fn nota_valida(nota: u8) -> bool {
    ESCALA_AVALIACAO.iter().any(|(n, _)| *n == nota)
}
