use crate::error::InitProcessError;
use log::LevelFilter;
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub rule_source: RuleSource,
    pub log_level: LevelFilter,
}

/// ルールの読み込み元
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleSource {
    File(PathBuf),
    Database(DatabaseConfig),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub database_name: String,
    pub max_connections: u32,
}

fn parse_or<T, F>(lookup: &F, key: &str, default: T) -> Result<T, InitProcessError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|e| InitProcessError::EnvVarParseError(format!("{}: {}", key, e))),
        None => Ok(default),
    }
}

fn required<F>(lookup: &F, key: &str) -> Result<String, InitProcessError>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key).ok_or_else(|| InitProcessError::EnvVarError(format!("{}が設定されていません", key)))
}

impl AppConfig {
    pub fn from_env() -> Result<Self, InitProcessError> {
        // .envが無くても環境変数だけで動作させる
        dotenv::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, InitProcessError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let log_level = parse_or(&lookup, "RULE_SEARCH_LOG", LevelFilter::Info)?;

        let rule_source = match lookup("RULES_FILE").filter(|path| !path.trim().is_empty()) {
            Some(path) => RuleSource::File(PathBuf::from(path)),
            None => RuleSource::Database(DatabaseConfig {
                host: required(&lookup, "DB_HOST")?,
                port: parse_or(&lookup, "DB_PORT", 5432)?,
                username: required(&lookup, "DB_USER")?,
                password: required(&lookup, "DB_PASSWORD")?,
                database_name: required(&lookup, "DB_NAME")?,
                max_connections: parse_or(&lookup, "DB_MAX_CONNECTIONS", 10)?,
            }),
        };

        Ok(Self {
            rule_source,
            log_level,
        })
    }
}

impl DatabaseConfig {
    #[cfg(test)]
    pub fn for_testing() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 5432,
            username: "test".to_string(),
            password: "test".to_string(),
            database_name: "test_db".to_string(),
            max_connections: 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn reads_database_settings_with_defaults() {
        let config = AppConfig::from_lookup(lookup(&[
            ("DB_HOST", "localhost"),
            ("DB_USER", "test"),
            ("DB_PASSWORD", "test"),
            ("DB_NAME", "test_db"),
        ]))
        .unwrap();

        assert_eq!(config.rule_source, RuleSource::Database(DatabaseConfig::for_testing()));
        assert_eq!(config.log_level, LevelFilter::Info);
    }

    #[test]
    fn rules_file_skips_database_settings() {
        let config = AppConfig::from_lookup(lookup(&[
            ("RULES_FILE", "rules.json"),
            ("RULE_SEARCH_LOG", "debug"),
        ]))
        .unwrap();

        assert_eq!(config.rule_source, RuleSource::File(PathBuf::from("rules.json")));
        assert_eq!(config.log_level, LevelFilter::Debug);
    }

    #[test]
    fn missing_database_setting_is_reported() {
        let err = AppConfig::from_lookup(lookup(&[("DB_HOST", "localhost")])).unwrap_err();
        assert!(matches!(err, InitProcessError::EnvVarError(ref msg) if msg.contains("DB_USER")));
    }

    #[test]
    fn invalid_port_is_a_parse_error() {
        let err = AppConfig::from_lookup(lookup(&[
            ("DB_HOST", "localhost"),
            ("DB_PORT", "postgres"),
            ("DB_USER", "test"),
            ("DB_PASSWORD", "test"),
            ("DB_NAME", "test_db"),
        ]))
        .unwrap_err();
        assert!(matches!(err, InitProcessError::EnvVarParseError(_)));
    }
}
