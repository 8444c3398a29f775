// src/config.rs
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_EMAIL_API_URL: &str = "https://api.resend.com/emails";
pub const DEFAULT_DB_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_DB_ACQUIRE_TIMEOUT_SECS: u64 = 30;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid BIND_ADDR '{value}': {source}")]
    InvalidBindAddr {
        value: String,
        source: std::net::AddrParseError,
    },
    #[error("Invalid {key} '{value}': expected a positive integer")]
    InvalidNumber { key: &'static str, value: String },
    #[error("Failed to read knowledge base from {path}: {source}")]
    KnowledgeBase {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Credentials for the contact notification mailer. Only present when all
/// three required values are set.
#[derive(Debug, Clone, PartialEq)]
pub struct EmailConfig {
    pub api_key: String,
    pub api_url: String,
    pub from: String,
    pub to: String,
}

/// Connection pool sizing for the contact store.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DbPoolConfig {
    pub max_connections: u32,
    pub acquire_timeout: Duration,
}

impl Default for DbPoolConfig {
    fn default() -> Self {
        Self {
            max_connections: DEFAULT_DB_MAX_CONNECTIONS,
            acquire_timeout: Duration::from_secs(DEFAULT_DB_ACQUIRE_TIMEOUT_SECS),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub database_url: Option<String>,
    pub db_pool: DbPoolConfig,
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub email: Option<EmailConfig>,
    pub knowledge_base_path: Option<PathBuf>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup. Empty values count
    /// as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let bind_value = get("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_value
            .parse()
            .map_err(|source| ConfigError::InvalidBindAddr {
                value: bind_value.clone(),
                source,
            })?;

        let db_pool = DbPoolConfig {
            max_connections: parse_positive(&get, "DATABASE_MAX_CONNECTIONS", DEFAULT_DB_MAX_CONNECTIONS)?,
            acquire_timeout: Duration::from_secs(parse_positive(
                &get,
                "DATABASE_ACQUIRE_TIMEOUT_SECS",
                DEFAULT_DB_ACQUIRE_TIMEOUT_SECS,
            )?),
        };

        let email = match (get("EMAIL_API_KEY"), get("EMAIL_FROM"), get("EMAIL_TO")) {
            (Some(api_key), Some(from), Some(to)) => Some(EmailConfig {
                api_key,
                api_url: get("EMAIL_API_URL").unwrap_or_else(|| DEFAULT_EMAIL_API_URL.to_string()),
                from,
                to,
            }),
            _ => None,
        };

        Ok(Self {
            bind_addr,
            database_url: get("DATABASE_URL"),
            db_pool,
            gemini_api_key: get("GEMINI_API_KEY"),
            gemini_model: get("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string()),
            email,
            knowledge_base_path: get("KNOWLEDGE_BASE_PATH").map(PathBuf::from),
        })
    }
}

fn parse_positive<T, G>(get: &G, key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr + PartialOrd + Default,
    G: Fn(&str) -> Option<String>,
{
    match get(key) {
        None => Ok(default),
        Some(value) => match value.trim().parse::<T>() {
            Ok(n) if n > T::default() => Ok(n),
            _ => Err(ConfigError::InvalidNumber { key, value }),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_nothing_is_set() {
        let config = AppConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.bind_addr.to_string(), DEFAULT_BIND_ADDR);
        assert_eq!(config.gemini_model, DEFAULT_GEMINI_MODEL);
        assert!(config.database_url.is_none());
        assert_eq!(config.db_pool, DbPoolConfig::default());
        assert_eq!(config.db_pool.max_connections, 5);
        assert_eq!(config.db_pool.acquire_timeout, Duration::from_secs(30));
        assert!(config.gemini_api_key.is_none());
        assert!(config.email.is_none());
        assert!(config.knowledge_base_path.is_none());
    }

    #[test]
    fn test_empty_values_are_unset() {
        let config = AppConfig::from_lookup(lookup(&[("GEMINI_API_KEY", "  "), ("DATABASE_URL", "")])).unwrap();
        assert!(config.gemini_api_key.is_none());
        assert!(config.database_url.is_none());
    }

    #[test]
    fn test_email_requires_all_credentials() {
        let partial = AppConfig::from_lookup(lookup(&[("EMAIL_API_KEY", "k"), ("EMAIL_FROM", "site@hone.test")])).unwrap();
        assert!(partial.email.is_none());

        let full = AppConfig::from_lookup(lookup(&[
            ("EMAIL_API_KEY", "k"),
            ("EMAIL_FROM", "site@hone.test"),
            ("EMAIL_TO", "hello@hone.test"),
        ]))
        .unwrap();
        let email = full.email.unwrap();
        assert_eq!(email.api_url, DEFAULT_EMAIL_API_URL);
        assert_eq!(email.to, "hello@hone.test");
    }

    #[test]
    fn test_invalid_bind_addr() {
        let err = AppConfig::from_lookup(lookup(&[("BIND_ADDR", "not-an-addr")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidBindAddr { .. }));
    }

    #[test]
    fn test_pool_settings_override() {
        let config = AppConfig::from_lookup(lookup(&[
            ("DATABASE_MAX_CONNECTIONS", "12"),
            ("DATABASE_ACQUIRE_TIMEOUT_SECS", " 8 "),
        ]))
        .unwrap();
        assert_eq!(config.db_pool.max_connections, 12);
        assert_eq!(config.db_pool.acquire_timeout, Duration::from_secs(8));
    }

    #[test]
    fn test_invalid_pool_settings() {
        for (key, value) in [
            ("DATABASE_MAX_CONNECTIONS", "0"),
            ("DATABASE_MAX_CONNECTIONS", "lots"),
            ("DATABASE_ACQUIRE_TIMEOUT_SECS", "-3"),
        ] {
            let err = AppConfig::from_lookup(lookup(&[(key, value)])).unwrap_err();
            match err {
                ConfigError::InvalidNumber { key: k, value: v } => {
                    assert_eq!(k, key);
                    assert_eq!(v, value);
                }
                other => panic!("unexpected error: {other}"),
            }
        }
    }
}
