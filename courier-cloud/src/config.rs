//! Server configuration

use crate::db::BoxError;

/// Where orders and addresses are persisted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Postgres,
    /// Process-local tables, lost on restart. Development only.
    Memory,
}

impl StorageBackend {
    fn parse(raw: &str) -> Result<Self, BoxError> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(Self::Postgres),
            "memory" => Ok(Self::Memory),
            other => Err(format!("unknown STORAGE_BACKEND: {other}").into()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Environment: development | staging | production
    pub environment: String,
    pub http_port: u16,
    pub storage_backend: StorageBackend,
    /// PostgreSQL connection URL; required for the postgres backend
    pub database_url: Option<String>,
    pub database_max_connections: u32,
    /// HS256 secret for caller tokens
    pub jwt_secret: String,
    /// Emit JSON log lines instead of the human-readable format
    pub log_json: bool,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, BoxError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Result<Self, BoxError> {
        let environment = var("ENVIRONMENT").unwrap_or_else(|| "development".into());

        let storage_backend = match var("STORAGE_BACKEND") {
            Some(raw) => StorageBackend::parse(&raw)?,
            None => StorageBackend::Postgres,
        };
        if storage_backend == StorageBackend::Memory && environment == "production" {
            return Err("STORAGE_BACKEND=memory is not allowed in production".into());
        }

        let database_url = var("DATABASE_URL").filter(|s| !s.is_empty());
        if storage_backend == StorageBackend::Postgres && database_url.is_none() {
            return Err("DATABASE_URL must be set".into());
        }

        Ok(Self {
            http_port: var("HTTP_PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            storage_backend,
            database_url,
            database_max_connections: var("DATABASE_MAX_CONNECTIONS")
                .and_then(|n| n.parse().ok())
                .unwrap_or(10),
            jwt_secret: require_secret(var("JWT_SECRET"), "JWT_SECRET", &environment)?,
            log_json: var("LOG_FORMAT").is_some_and(|f| f.eq_ignore_ascii_case("json")),
            environment,
        })
    }
}

/// A secret must be set and non-empty outside development.
fn require_secret(
    value: Option<String>,
    name: &str,
    environment: &str,
) -> Result<String, BoxError> {
    let val = match value {
        Some(v) => v,
        None => {
            if environment != "development" {
                return Err(format!("{name} must be set in {environment} environment").into());
            }
            format!("dev-{name}-not-for-production")
        }
    };
    if val.is_empty() && environment != "development" {
        return Err(format!("{name} must not be empty in {environment} environment").into());
    }
    Ok(val)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<Config, BoxError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_development_defaults() {
        let config = load(&[("STORAGE_BACKEND", "memory")]).unwrap();

        assert_eq!(config.environment, "development");
        assert_eq!(config.http_port, 8080);
        assert_eq!(config.storage_backend, StorageBackend::Memory);
        assert_eq!(config.database_max_connections, 10);
        assert_eq!(config.jwt_secret, "dev-JWT_SECRET-not-for-production");
        assert!(!config.log_json);
    }

    #[test]
    fn test_postgres_requires_database_url() {
        assert!(load(&[]).is_err());

        let config = load(&[
            ("DATABASE_URL", "postgres://localhost/courier"),
            ("HTTP_PORT", "9000"),
            ("LOG_FORMAT", "JSON"),
        ])
        .unwrap();
        assert_eq!(config.storage_backend, StorageBackend::Postgres);
        assert_eq!(config.http_port, 9000);
        assert!(config.log_json);
    }

    #[test]
    fn test_production_requires_secret() {
        let err = load(&[
            ("ENVIRONMENT", "production"),
            ("DATABASE_URL", "postgres://db/courier"),
        ])
        .unwrap_err();
        assert!(err.to_string().contains("JWT_SECRET"));

        let err = load(&[
            ("ENVIRONMENT", "production"),
            ("DATABASE_URL", "postgres://db/courier"),
            ("JWT_SECRET", ""),
        ])
        .unwrap_err();
        assert!(err.to_string().contains("must not be empty"));
    }

    #[test]
    fn test_memory_backend_rejected_in_production() {
        assert!(
            load(&[
                ("ENVIRONMENT", "production"),
                ("STORAGE_BACKEND", "memory"),
                ("JWT_SECRET", "s3cret"),
            ])
            .is_err()
        );
        assert!(load(&[("STORAGE_BACKEND", "mongo")]).is_err());
    }
}
