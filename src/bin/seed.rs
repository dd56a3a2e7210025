//! Populate the database with a sample school: users, classes, students and tags.
//!
//! Run with `cargo run --bin seed`. Uses the same `DATABASE_URL` / `DATABASE_KEY`
//! as the server and applies the schema first when `RUN_MIGRATIONS=true`.

use avaliacao_escolar::client::{from_row, to_row, Row};
use avaliacao_escolar::models::{
    AlunoCreate, NivelEnsino, NovoUsuario, PeriodoAula, TagCreate, TipoTag, TipoUsuario, TurmaCreate,
};
use avaliacao_escolar::{apply_schema, PgTableClient, Settings, TableClient};
use chrono::{Datelike, Local, NaiveDate};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::Deserialize;
use std::error::Error;
use uuid::Uuid;

type SeedResult<T> = Result<T, Box<dyn Error>>;

/// Demo password hash (bcrypt of "123456").
const SENHA_DEMO: &str = "$2b$12$LQv3c1yqBWVHxkd0LHAkCOYz6TtxMQJqhN8/LewKyNiGH7V4rGYma";

const NOMES_MENINOS: &[&str] = &["João", "Pedro", "Lucas", "Gabriel", "Rafael", "Miguel", "Davi", "Arthur", "Bernardo", "Heitor"];
const NOMES_MENINAS: &[&str] = &["Maria", "Ana", "Julia", "Luiza", "Sophia", "Isabella", "Helena", "Valentina", "Laura", "Alice"];
const SOBRENOMES: &[&str] = &["Silva", "Santos", "Oliveira", "Souza", "Lima", "Pereira", "Costa", "Rodrigues", "Almeida", "Ferreira"];
const DESCRICOES: &[&str] = &[
    "TDAH - Necessita de atenção individualizada",
    "Dislexia - Em acompanhamento",
    "TEA nível 1 - Precisa de rotina estruturada",
    "Dificuldade motora fina",
];
const ALERGIAS: &[&str] = &["Lactose", "Glúten", "Amendoim", "Corante"];

/// (nome, tipo, categoria, cor)
const TAGS_PADRAO: &[(&str, TipoTag, &str, &str)] = &[
    ("Participativo", TipoTag::Positiva, "Comportamento", "#10b981"),
    ("Colaborativo", TipoTag::Positiva, "Comportamento", "#10b981"),
    ("Criativo", TipoTag::Positiva, "Aprendizagem", "#10b981"),
    ("Organizado", TipoTag::Positiva, "Organização", "#10b981"),
    ("Líder", TipoTag::Positiva, "Social", "#10b981"),
    ("Tímido", TipoTag::Neutra, "Comportamento", "#6b7280"),
    ("Agitado", TipoTag::Neutra, "Comportamento", "#6b7280"),
    ("Disperso", TipoTag::Neutra, "Atenção", "#6b7280"),
    ("Dificuldade de concentração", TipoTag::Negativa, "Atenção", "#ef4444"),
    ("Conflitos com colegas", TipoTag::Negativa, "Social", "#ef4444"),
];

#[derive(Deserialize)]
struct Inserted {
    id: Uuid,
}

#[derive(Debug, Default, PartialEq)]
struct Resumo {
    usuarios: usize,
    turmas: usize,
    alunos: usize,
    tags: usize,
}

async fn inserir(client: &dyn TableClient, table: &str, row: Row) -> SeedResult<Uuid> {
    let row = client
        .insert(table, row)
        .await?
        .pop()
        .ok_or_else(|| format!("insert into {} returned no row", table))?;
    Ok(from_row::<Inserted>(row)?.id)
}

async fn seed(client: &dyn TableClient, rng: &mut StdRng) -> SeedResult<Resumo> {
    let mut resumo = Resumo::default();
    let ano = Local::now().year();

    let mut escola = Row::new();
    escola.insert("nome".into(), "Colégio Solare - Unidade Teste".into());
    let escola_id = inserir(client, "escolas", escola).await?;
    tracing::info!(%escola_id, "escola created");

    let usuario = |email: &str, nome: &str, telefone: &str, tipo: TipoUsuario| NovoUsuario {
        email: email.into(),
        nome: nome.into(),
        senha_hash: SENHA_DEMO.into(),
        telefone: Some(telefone.into()),
        tipo,
        escola_id: Some(escola_id),
        coordenador_id: None,
    };
    let coordenadora = inserir(
        client,
        "usuarios",
        to_row(&usuario("marcia.mello@solare.edu.br", "Márcia Mello", "(11) 98765-4320", TipoUsuario::Coordenador))?,
    )
    .await?;
    resumo.usuarios += 1;

    let mut professores = Vec::new();
    for (email, nome, telefone) in [
        ("michelle.vilas@solare.edu.br", "Michelle Vilas Boas", "(11) 98765-4321"),
        ("giovanna.lima@solare.edu.br", "Giovanna Lima", "(11) 98765-4322"),
    ] {
        let mut novo = usuario(email, nome, telefone, TipoUsuario::Professor);
        novo.coordenador_id = Some(coordenadora);
        professores.push(inserir(client, "usuarios", to_row(&novo)?).await?);
        resumo.usuarios += 1;
        tracing::info!(nome, "professor created");
    }

    let turmas = [
        ("1º Ano", "A", PeriodoAula::Manha, NivelEnsino::Fundamental, 30, professores[0]),
        ("1º Ano", "B", PeriodoAula::Tarde, NivelEnsino::Fundamental, 30, professores[0]),
        ("Infantil II", "Manhã", PeriodoAula::Manha, NivelEnsino::Infantil, 25, professores[1]),
        ("Infantil II", "Tarde", PeriodoAula::Tarde, NivelEnsino::Infantil, 25, professores[1]),
    ];
    for (serie, turma, periodo, nivel, capacidade, professor) in turmas {
        let payload = TurmaCreate {
            serie: serie.into(),
            turma: turma.into(),
            ano_letivo: ano,
            periodo,
            nivel,
            capacidade_maxima: Some(capacidade),
            professor_id: Some(professor),
        };
        let mut row = payload.to_row()?;
        row.insert("escola_id".into(), escola_id.to_string().into());
        let turma_id = inserir(client, "turmas", row).await?;
        resumo.turmas += 1;

        let ano_nascimento = match nivel {
            NivelEnsino::Infantil => ano - 4,
            NivelEnsino::Fundamental => ano - 6,
        };
        let quantidade = rng.gen_range(20..=28).min(capacidade);
        for i in 0..quantidade {
            let nomes = if i % 2 == 0 { NOMES_MENINOS } else { NOMES_MENINAS };
            let nome = nomes.choose(rng).copied().unwrap_or("Aluno");
            let sobrenome = SOBRENOMES.choose(rng).copied().unwrap_or("Silva");
            let nascimento = NaiveDate::from_ymd_opt(ano_nascimento, rng.gen_range(1..=12), rng.gen_range(1..=28))
                .ok_or("invalid birth date")?;
            let especial = rng.gen_bool(0.2);
            let aluno = AlunoCreate {
                matricula: format!("{}{:04}", ano, resumo.alunos + 1),
                nome: format!("{} {}", nome, sobrenome),
                data_nascimento: nascimento,
                foto_url: None,
                turma_id,
                responsavel_nome: Some(format!("Responsável de {}", nome)),
                responsavel_telefone: Some(format!(
                    "(11) 9{}-{}",
                    rng.gen_range(1000..=9999),
                    rng.gen_range(1000..=9999)
                )),
                responsavel_email: Some(format!("responsavel.{}{}@email.com", nome.to_lowercase(), resumo.alunos)),
                responsavel_foto_url: None,
                necessidades_especiais: especial,
                necessidades_descricao: if especial {
                    DESCRICOES.choose(rng).map(|d| d.to_string())
                } else {
                    None
                },
                alergias: if rng.gen_bool(0.1) {
                    ALERGIAS.choose(rng).map(|a| a.to_string())
                } else {
                    None
                },
                restricoes_alimentares: None,
                observacoes: None,
            };
            inserir(client, "alunos", aluno.to_row()?).await?;
            resumo.alunos += 1;
        }
        tracing::info!(serie, turma, alunos = quantidade, "turma populated");
    }

    for professor in &professores {
        for (nome, tipo, categoria, cor) in TAGS_PADRAO {
            let tag = TagCreate {
                nome: nome.to_string(),
                tipo: *tipo,
                categoria: Some(categoria.to_string()),
                cor: Some(cor.to_string()),
                nivel_ensino: Default::default(),
                usuario_id: Some(*professor),
            };
            inserir(client, "tags", tag.to_row()).await?;
            resumo.tags += 1;
        }
    }

    Ok(resumo)
}

#[tokio::main]
async fn main() -> SeedResult<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("seed=info,avaliacao_escolar=info")),
        )
        .init();

    let settings = Settings::from_env()?;
    let client = PgTableClient::connect_lazy(&settings)?;
    if settings.run_migrations {
        apply_schema(client.pool()).await?;
    }

    tracing::info!("populating database");
    let mut rng = StdRng::from_entropy();
    match seed(&client, &mut rng).await {
        Ok(resumo) => {
            tracing::info!(
                usuarios = resumo.usuarios,
                turmas = resumo.turmas,
                alunos = resumo.alunos,
                tags = resumo.tags,
                "database populated; login michelle.vilas@solare.edu.br / 123456"
            );
            Ok(())
        }
        Err(e) => {
            tracing::error!(error = %e, "seed failed");
            Err(e)
        }
    }
}
