//! Range checks that parsing alone does not cover.

use crate::config::ServiceConfig;
use crate::error::ConfigError;

pub fn validate(config: &ServiceConfig) -> Result<(), ConfigError> {
    if config.max_connections == 0 {
        return Err(ConfigError::Invalid {
            key: "DATABASE_MAX_CONNECTIONS",
            reason: "must be at least 1".into(),
        });
    }
    if config.max_body_bytes == 0 {
        return Err(ConfigError::Invalid {
            key: "MAX_BODY_BYTES",
            reason: "must be greater than 0".into(),
        });
    }
    if !config.database_url.starts_with("postgres://") && !config.database_url.starts_with("postgresql://") {
        return Err(ConfigError::Invalid {
            key: "DATABASE_URL",
            reason: "expected a postgres:// connection string".into(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ServiceConfig;

    fn load(key: &str, value: &str) -> Result<ServiceConfig, ConfigError> {
        let (key, value) = (key.to_string(), value.to_string());
        ServiceConfig::from_lookup(move |k| (k == key).then(|| value.clone()))
    }

    #[test]
    fn zero_connections_rejected() {
        assert!(matches!(
            load("DATABASE_MAX_CONNECTIONS", "0"),
            Err(ConfigError::Invalid { key: "DATABASE_MAX_CONNECTIONS", .. })
        ));
    }

    #[test]
    fn zero_body_limit_rejected() {
        assert!(load("MAX_BODY_BYTES", "0").is_err());
    }

    #[test]
    fn non_postgres_url_rejected() {
        assert!(matches!(
            load("DATABASE_URL", "mysql://localhost/db"),
            Err(ConfigError::Invalid { key: "DATABASE_URL", .. })
        ));
    }
}
