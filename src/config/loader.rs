//! Load configuration from environment variables (or any key lookup, for tests).

use crate::config::types::*;
use crate::config::validate;
use crate::error::ConfigError;
use std::str::FromStr;

impl ServiceConfig {
    /// Read `.env` if present, then the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from a key lookup. Unset or empty keys take their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let config = ServiceConfig {
            database_url: get("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.into()),
            max_connections: parse_or("DATABASE_MAX_CONNECTIONS", get("DATABASE_MAX_CONNECTIONS"), DEFAULT_MAX_CONNECTIONS)?,
            listen_addr: parse_value(
                "LISTEN_ADDR",
                get("LISTEN_ADDR").as_deref().unwrap_or(DEFAULT_LISTEN_ADDR),
            )?,
            max_body_bytes: parse_or("MAX_BODY_BYTES", get("MAX_BODY_BYTES"), DEFAULT_MAX_BODY_BYTES)?,
            store: match get("ACCOUNT_STORE") {
                Some(s) => s.parse()?,
                None => StoreBackend::Postgres,
            },
        };
        validate(&config)?;
        Ok(config)
    }
}

fn parse_or<T>(key: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match raw {
        None => Ok(default),
        Some(s) => parse_value(key, &s),
    }
}

fn parse_value<T>(key: &'static str, raw: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.parse().map_err(|e: T::Err| ConfigError::Invalid {
        key,
        reason: format!("{:?}: {}", raw, e),
    })
}

impl FromStr for StoreBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(StoreBackend::Postgres),
            "memory" => Ok(StoreBackend::Memory),
            _ => Err(ConfigError::Invalid {
                key: "ACCOUNT_STORE",
                reason: format!("{} (expected postgres or memory)", s),
            }),
        }
    }
}
