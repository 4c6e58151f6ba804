use std::env;

use anyhow::Context;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub max_connections: u32,
    pub sqlx_logging: bool,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup, so tests need not touch the process env.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL").context("DATABASE_URL is not set")?;
        let max_connections = lookup("DB_MAX_CONNECTIONS")
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(10);
        let sqlx_logging = lookup("DB_SQL_LOGGING")
            .map(|v| matches!(v.as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);
        Ok(Self {
            database_url,
            max_connections,
            sqlx_logging,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_only_url_is_set() {
        let config = AppConfig::from_lookup(lookup(&[("DATABASE_URL", "postgres://localhost/shop")]))
            .unwrap();
        assert_eq!(config.database_url, "postgres://localhost/shop");
        assert_eq!(config.max_connections, 10);
        assert!(!config.sqlx_logging);
    }

    #[test]
    fn overrides_are_parsed() {
        let config = AppConfig::from_lookup(lookup(&[
            ("DATABASE_URL", "sqlite::memory:"),
            ("DB_MAX_CONNECTIONS", "3"),
            ("DB_SQL_LOGGING", "true"),
        ]))
        .unwrap();
        assert_eq!(config.max_connections, 3);
        assert!(config.sqlx_logging);
    }

    #[test]
    fn missing_url_is_an_error() {
        assert!(AppConfig::from_lookup(lookup(&[])).is_err());
    }
}
