//! Process settings loaded from the environment (`.env` is honoured via dotenvy).

use crate::error::ConfigError;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Production,
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "development" => Ok(Environment::Development),
            "production" => Ok(Environment::Production),
            _ => Err("expected development or production".into()),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LlmProvider {
    Openai,
    Anthropic,
    Google,
}

impl FromStr for LlmProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "openai" => Ok(LlmProvider::Openai),
            "anthropic" => Ok(LlmProvider::Anthropic),
            "google" => Ok(LlmProvider::Google),
            _ => Err("expected openai, anthropic or google".into()),
        }
    }
}

/// Which AI provider keys are present. Never carries the keys themselves.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct AiProvidersConfigured {
    pub openai: bool,
    pub anthropic: bool,
    pub google: bool,
}

#[derive(Clone)]
pub struct Settings {
    pub database_url: String,
    /// Credential for the database endpoint; applied as the connection password.
    pub database_key: String,
    pub database_max_connections: u32,
    pub run_migrations: bool,

    pub openai_api_key: Option<String>,
    pub anthropic_api_key: Option<String>,
    pub google_api_key: Option<String>,

    pub host: String,
    pub port: u16,
    pub environment: Environment,

    pub secret_key: String,
    pub algorithm: String,
    pub access_token_expire_minutes: u32,

    pub default_llm_provider: LlmProvider,
    pub default_llm_model: String,
    pub llm_temperature: f32,
}

impl Settings {
    /// Read settings from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings from a fixed map of variables. Keys are the upper-case variable names.
    pub fn from_map(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        Self::from_lookup(|key| vars.get(key).cloned())
    }

    /// Build settings from any variable source. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let required = |key: &'static str| get(key).ok_or(ConfigError::MissingVar(key));

        let llm_temperature: f32 = parse_or(&get, "LLM_TEMPERATURE", 0.7)?;
        if !(0.0..=2.0).contains(&llm_temperature) {
            return Err(ConfigError::InvalidVar {
                name: "LLM_TEMPERATURE",
                reason: "must be between 0 and 2".into(),
            });
        }

        Ok(Settings {
            database_url: required("DATABASE_URL")?,
            database_key: required("DATABASE_KEY")?,
            database_max_connections: parse_or(&get, "DATABASE_MAX_CONNECTIONS", 5)?,
            run_migrations: parse_or(&get, "RUN_MIGRATIONS", false)?,
            openai_api_key: get("OPENAI_API_KEY"),
            anthropic_api_key: get("ANTHROPIC_API_KEY"),
            google_api_key: get("GOOGLE_API_KEY"),
            host: get("HOST").unwrap_or_else(|| "0.0.0.0".into()),
            port: parse_or(&get, "PORT", 8000)?,
            environment: parse_or(&get, "ENVIRONMENT", Environment::Development)?,
            secret_key: required("SECRET_KEY")?,
            algorithm: get("ALGORITHM").unwrap_or_else(|| "HS256".into()),
            access_token_expire_minutes: parse_or(&get, "ACCESS_TOKEN_EXPIRE_MINUTES", 60 * 24)?,
            default_llm_provider: parse_or(&get, "DEFAULT_LLM_PROVIDER", LlmProvider::Openai)?,
            default_llm_model: get("DEFAULT_LLM_MODEL").unwrap_or_else(|| "gpt-3.5-turbo".into()),
            llm_temperature,
        })
    }

    pub fn ai_providers(&self) -> AiProvidersConfigured {
        AiProvidersConfigured {
            openai: self.openai_api_key.is_some(),
            anthropic: self.anthropic_api_key.is_some(),
            google: self.google_api_key.is_some(),
        }
    }

    pub fn database_configured(&self) -> bool {
        !self.database_url.is_empty()
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<T, G>(get: &G, key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: fmt::Display,
    G: Fn(&str) -> Option<String>,
{
    match get(key) {
        None => Ok(default),
        Some(raw) => raw.parse().map_err(|e: T::Err| ConfigError::InvalidVar {
            name: key,
            reason: e.to_string(),
        }),
    }
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("database_url", &"<redacted>")
            .field("database_key", &"<redacted>")
            .field("database_max_connections", &self.database_max_connections)
            .field("run_migrations", &self.run_migrations)
            .field("ai_providers", &self.ai_providers())
            .field("host", &self.host)
            .field("port", &self.port)
            .field("environment", &self.environment)
            .field("secret_key", &"<redacted>")
            .field("algorithm", &self.algorithm)
            .field("access_token_expire_minutes", &self.access_token_expire_minutes)
            .field("default_llm_provider", &self.default_llm_provider)
            .field("default_llm_model", &self.default_llm_model)
            .field("llm_temperature", &self.llm_temperature)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    fn minimal() -> HashMap<String, String> {
        vars(&[
            ("DATABASE_URL", "postgres://localhost/escola"),
            ("DATABASE_KEY", "segredo"),
            ("SECRET_KEY", "jwt-secret"),
        ])
    }

    #[test]
    fn defaults_apply_when_only_required_vars_are_set() {
        let s = Settings::from_map(&minimal()).unwrap();
        assert_eq!(s.host, "0.0.0.0");
        assert_eq!(s.port, 8000);
        assert_eq!(s.environment, Environment::Development);
        assert_eq!(s.algorithm, "HS256");
        assert_eq!(s.access_token_expire_minutes, 1440);
        assert_eq!(s.default_llm_provider, LlmProvider::Openai);
        assert_eq!(s.default_llm_model, "gpt-3.5-turbo");
        assert!(!s.run_migrations);
        assert!(s.openai_api_key.is_none());
        assert_eq!(s.bind_address(), "0.0.0.0:8000");
    }

    #[test]
    fn missing_database_url_is_reported_by_name() {
        let mut v = minimal();
        v.remove("DATABASE_URL");
        match Settings::from_map(&v) {
            Err(ConfigError::MissingVar(name)) => assert_eq!(name, "DATABASE_URL"),
            other => panic!("unexpected: {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn empty_optional_key_counts_as_unset() {
        let mut v = minimal();
        v.insert("OPENAI_API_KEY".into(), "  ".into());
        v.insert("GOOGLE_API_KEY".into(), "g-key".into());
        let s = Settings::from_map(&v).unwrap();
        let ai = s.ai_providers();
        assert!(!ai.openai);
        assert!(!ai.anthropic);
        assert!(ai.google);
    }

    #[test]
    fn invalid_port_and_environment_are_rejected() {
        let mut v = minimal();
        v.insert("PORT".into(), "abc".into());
        assert!(matches!(
            Settings::from_map(&v),
            Err(ConfigError::InvalidVar { name: "PORT", .. })
        ));

        let mut v = minimal();
        v.insert("ENVIRONMENT".into(), "staging".into());
        assert!(matches!(
            Settings::from_map(&v),
            Err(ConfigError::InvalidVar { name: "ENVIRONMENT", .. })
        ));
    }

    #[test]
    fn temperature_out_of_range_is_rejected() {
        let mut v = minimal();
        v.insert("LLM_TEMPERATURE".into(), "3.5".into());
        assert!(Settings::from_map(&v).is_err());
    }

    #[test]
    fn debug_output_hides_secrets() {
        let s = Settings::from_map(&minimal()).unwrap();
        let dbg = format!("{:?}", s);
        assert!(!dbg.contains("segredo"));
        assert!(!dbg.contains("jwt-secret"));
        assert!(!dbg.contains("postgres://"));
    }
}
