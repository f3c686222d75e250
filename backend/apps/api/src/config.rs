//! Server Configuration
//!
//! Read once at startup from the environment (after `.env` is loaded).

use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, bail};

/// Where credential and profile records live
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StoreBackend {
    #[default]
    Postgres,
    /// Process-local maps; everything is lost on restart
    Memory,
}

impl FromStr for StoreBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(Self::Postgres),
            "memory" => Ok(Self::Memory),
            other => bail!("Unknown STORE_BACKEND {other:?} (expected postgres or memory)"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub store_backend: StoreBackend,
    /// Credential store database (required for postgres)
    pub database_url: Option<String>,
    /// Profile store database, if separate from the credential store
    pub profile_database_url: Option<String>,
    pub db_max_connections: u32,
    /// PKCS#8 PEM, EC P-384
    pub jwt_private_key: PathBuf,
    /// SPKI PEM, EC P-384
    pub jwt_public_key: PathBuf,
    pub port: u16,
    pub cookie_secure: bool,
}

impl ServerConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. `from_env` passes `std::env::var`.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let store_backend = get("STORE_BACKEND")
            .map(|value| value.parse::<StoreBackend>())
            .transpose()?
            .unwrap_or_default();

        let database_url = get("DATABASE_URL");
        if store_backend == StoreBackend::Postgres && database_url.is_none() {
            bail!("DATABASE_URL must be set when STORE_BACKEND=postgres");
        }

        let db_max_connections = get("DB_MAX_CONNECTIONS")
            .map(|value| value.parse::<u32>().context("DB_MAX_CONNECTIONS must be a positive integer"))
            .transpose()?
            .unwrap_or(5);

        let port = get("PORT")
            .map(|value| value.parse::<u16>().context("PORT must be a valid port number"))
            .transpose()?
            .unwrap_or(3000);

        let cookie_secure = get("COOKIE_SECURE")
            .map(|value| parse_bool(&value).context("COOKIE_SECURE must be true or false"))
            .transpose()?
            .unwrap_or(false);

        Ok(Self {
            store_backend,
            database_url,
            profile_database_url: get("PROFILE_DATABASE_URL"),
            db_max_connections,
            jwt_private_key: get("JWT_PRIVATE_KEY")
                .context("JWT_PRIVATE_KEY must be set to a PEM file path")?
                .into(),
            jwt_public_key: get("JWT_PUBLIC_KEY")
                .context("JWT_PUBLIC_KEY must be set to a PEM file path")?
                .into(),
            port,
            cookie_secure,
        })
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
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
        move |key: &str| map.get(key).cloned()
    }

    const KEYS: [(&str, &str); 2] = [
        ("JWT_PRIVATE_KEY", "/keys/private.pem"),
        ("JWT_PUBLIC_KEY", "/keys/public.pem"),
    ];

    #[test]
    fn test_defaults() {
        let mut pairs = KEYS.to_vec();
        pairs.push(("DATABASE_URL", "postgres://localhost/auth"));

        let config = ServerConfig::from_lookup(lookup(&pairs)).unwrap();
        assert_eq!(config.store_backend, StoreBackend::Postgres);
        assert_eq!(config.database_url.as_deref(), Some("postgres://localhost/auth"));
        assert_eq!(config.profile_database_url, None);
        assert_eq!(config.db_max_connections, 5);
        assert_eq!(config.port, 3000);
        assert!(!config.cookie_secure);
        assert_eq!(config.jwt_private_key, PathBuf::from("/keys/private.pem"));
    }

    #[test]
    fn test_postgres_requires_database_url() {
        assert!(ServerConfig::from_lookup(lookup(&KEYS)).is_err());
    }

    #[test]
    fn test_memory_backend_needs_no_database() {
        let mut pairs = KEYS.to_vec();
        pairs.push(("STORE_BACKEND", "memory"));

        let config = ServerConfig::from_lookup(lookup(&pairs)).unwrap();
        assert_eq!(config.store_backend, StoreBackend::Memory);
        assert_eq!(config.database_url, None);
    }

    #[test]
    fn test_keys_are_required() {
        let result = ServerConfig::from_lookup(lookup(&[("STORE_BACKEND", "memory")]));
        assert!(result.is_err());
    }

    #[test]
    fn test_overrides() {
        let mut pairs = KEYS.to_vec();
        pairs.extend([
            ("DATABASE_URL", "postgres://localhost/credentials"),
            ("PROFILE_DATABASE_URL", "postgres://localhost/profiles"),
            ("DB_MAX_CONNECTIONS", "12"),
            ("PORT", "8080"),
            ("COOKIE_SECURE", "true"),
        ]);

        let config = ServerConfig::from_lookup(lookup(&pairs)).unwrap();
        assert_eq!(
            config.profile_database_url.as_deref(),
            Some("postgres://localhost/profiles")
        );
        assert_eq!(config.db_max_connections, 12);
        assert_eq!(config.port, 8080);
        assert!(config.cookie_secure);
    }

    #[test]
    fn test_invalid_values() {
        for (key, value) in [
            ("PORT", "eighty"),
            ("COOKIE_SECURE", "maybe"),
            ("STORE_BACKEND", "redis"),
        ] {
            let mut pairs = KEYS.to_vec();
            pairs.push(("DATABASE_URL", "postgres://localhost/auth"));
            pairs.push((key, value));
            assert!(
                ServerConfig::from_lookup(lookup(&pairs)).is_err(),
                "{key}={value} should be rejected"
            );
        }
    }
}
