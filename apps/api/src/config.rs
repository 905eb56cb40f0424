//! API configuration module.
//!
//! Configuration is loaded from environment variables (a local `.env` file is
//! read first by `main`) with fallback to defaults.

use std::env;
use std::net::{IpAddr, SocketAddr};

/// Secret used when `JWT_SECRET` is unset. Startup logs a warning.
pub const DEV_JWT_SECRET: &str = "sweetify-dev-secret-change-in-production";

/// API server configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Interface to bind
    pub host: IpAddr,

    /// HTTP port
    pub port: u16,

    /// SQLite database file
    pub database_path: String,

    /// Pool size
    pub database_max_connections: u32,

    /// JWT secret key for signing tokens
    pub jwt_secret: String,

    /// Token lifetime in seconds (default: 30 days)
    pub jwt_lifetime_secs: i64,

    /// Allowed CORS origin; `None` allows any origin
    pub cors_allow_origin: Option<String>,
}

impl ApiConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary lookup (tests pass a map).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let config = ApiConfig {
            host: get("HOST", "0.0.0.0")
                .parse()
                .map_err(|_| ConfigError::InvalidValue("HOST".to_string()))?,

            port: get("PORT", "5000")
                .parse()
                .map_err(|_| ConfigError::InvalidValue("PORT".to_string()))?,

            database_path: get("DATABASE_PATH", "sweetify.db"),

            database_max_connections: get("DATABASE_MAX_CONNECTIONS", "5")
                .parse()
                .map_err(|_| ConfigError::InvalidValue("DATABASE_MAX_CONNECTIONS".to_string()))?,

            jwt_secret: get("JWT_SECRET", DEV_JWT_SECRET),

            jwt_lifetime_secs: get("JWT_LIFETIME_SECS", "2592000")
                .parse()
                .map_err(|_| ConfigError::InvalidValue("JWT_LIFETIME_SECS".to_string()))?,

            cors_allow_origin: lookup("CORS_ALLOW_ORIGIN").filter(|o| !o.is_empty()),
        };

        if config.jwt_secret.is_empty() {
            return Err(ConfigError::MissingRequired("JWT_SECRET".to_string()));
        }
        if config.jwt_lifetime_secs <= 0 {
            return Err(ConfigError::InvalidValue("JWT_LIFETIME_SECS".to_string()));
        }
        if config.database_max_connections == 0 {
            return Err(ConfigError::InvalidValue(
                "DATABASE_MAX_CONNECTIONS".to_string(),
            ));
        }

        Ok(config)
    }

    /// Address to bind the HTTP listener to.
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// True when running with the built-in development secret.
    pub fn uses_dev_secret(&self) -> bool {
        self.jwt_secret == DEV_JWT_SECRET
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Missing required configuration: {0}")]
    MissingRequired(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<ApiConfig, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ApiConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.port, 5000);
        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:5000");
        assert_eq!(config.database_path, "sweetify.db");
        assert_eq!(config.jwt_lifetime_secs, 30 * 24 * 60 * 60);
        assert!(config.uses_dev_secret());
        assert!(config.cors_allow_origin.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("PORT", "8080"),
            ("HOST", "127.0.0.1"),
            ("JWT_SECRET", "s3cret"),
            ("CORS_ALLOW_ORIGIN", "http://localhost:5173"),
        ])
        .unwrap();
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:8080");
        assert!(!config.uses_dev_secret());
        assert_eq!(
            config.cors_allow_origin.as_deref(),
            Some("http://localhost:5173")
        );
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(
            load(&[("PORT", "eighty")]),
            Err(ConfigError::InvalidValue(_))
        ));
        assert!(matches!(
            load(&[("JWT_LIFETIME_SECS", "0")]),
            Err(ConfigError::InvalidValue(_))
        ));
        assert!(matches!(
            load(&[("JWT_SECRET", "")]),
            Err(ConfigError::MissingRequired(_))
        ));
    }
}
