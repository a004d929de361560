use serde::{Deserialize, Serialize};
use std::env;
use thiserror::Error;

use crate::auth::password::{MAX_COST, MIN_COST};

/// Store URL that selects the in-process store instead of PostgreSQL
pub const MEMORY_DATABASE_URL: &str = "memory";

/// Longest token lifetime accepted from configuration (ten years)
pub const MAX_JWT_EXPIRY_HOURS: u64 = 24 * 365 * 10;

/// Secret used when running locally without `JWT_SECRET`
const DEVELOPMENT_JWT_SECRET: &str = "bookmarks-development-secret";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing configuration: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {name}: {value}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub database: DatabaseConfig,
    pub api: ApiConfig,
    pub security: SecurityConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL, or `memory` for the in-process store
    pub url: String,
    pub max_connections: u32,
    pub connection_timeout: u64,
}

impl DatabaseConfig {
    pub fn uses_memory_store(&self) -> bool {
        self.url == MEMORY_DATABASE_URL
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub port: u16,
    pub enable_request_logging: bool,
    pub max_request_size_bytes: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    #[serde(skip_serializing, default)]
    pub jwt_secret: String,
    pub jwt_expiry_hours: u64,
    pub bcrypt_cost: u32,
    pub enable_cors: bool,
    pub cors_origins: Vec<String>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        let config = match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides();

        config.validate()?;
        Ok(config)
    }

    fn with_env_overrides(mut self) -> Self {
        // Database overrides
        if let Ok(v) = env::var("DATABASE_URL") {
            self.database.url = v;
        }
        if let Ok(v) = env::var("DATABASE_MAX_CONNECTIONS") {
            self.database.max_connections = v.parse().unwrap_or(self.database.max_connections);
        }
        if let Ok(v) = env::var("DATABASE_CONNECTION_TIMEOUT") {
            self.database.connection_timeout = v.parse().unwrap_or(self.database.connection_timeout);
        }

        // API overrides
        if let Some(port) = env::var("BOOKMARKS_API_PORT")
            .ok()
            .or_else(|| env::var("PORT").ok())
            .and_then(|s| s.parse::<u16>().ok())
        {
            self.api.port = port;
        }
        if let Ok(v) = env::var("API_ENABLE_REQUEST_LOGGING") {
            self.api.enable_request_logging = v.parse().unwrap_or(self.api.enable_request_logging);
        }
        if let Ok(v) = env::var("API_MAX_REQUEST_SIZE_BYTES") {
            self.api.max_request_size_bytes = v.parse().unwrap_or(self.api.max_request_size_bytes);
        }

        // Security overrides
        if let Ok(v) = env::var("JWT_SECRET") {
            self.security.jwt_secret = v;
        }
        if let Ok(v) = env::var("SECURITY_JWT_EXPIRY_HOURS") {
            self.security.jwt_expiry_hours = v.parse().unwrap_or(self.security.jwt_expiry_hours);
        }
        if let Ok(v) = env::var("SECURITY_BCRYPT_COST") {
            self.security.bcrypt_cost = v.parse().unwrap_or(self.security.bcrypt_cost);
        }
        if let Ok(v) = env::var("SECURITY_ENABLE_CORS") {
            self.security.enable_cors = v.parse().unwrap_or(self.security.enable_cors);
        }
        if let Ok(v) = env::var("SECURITY_CORS_ORIGINS") {
            self.security.cors_origins = v.split(',').map(|s| s.trim().to_string()).collect();
        }

        self
    }

    /// Reject settings the server cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.security.jwt_secret.is_empty() {
            return Err(ConfigError::Missing("JWT_SECRET"));
        }
        if self.database.url.is_empty() {
            return Err(ConfigError::Missing("DATABASE_URL"));
        }
        if !(MIN_COST..=MAX_COST).contains(&self.security.bcrypt_cost) {
            return Err(ConfigError::Invalid {
                name: "SECURITY_BCRYPT_COST",
                value: self.security.bcrypt_cost.to_string(),
            });
        }
        if !(1..=MAX_JWT_EXPIRY_HOURS).contains(&self.security.jwt_expiry_hours) {
            return Err(ConfigError::Invalid {
                name: "SECURITY_JWT_EXPIRY_HOURS",
                value: self.security.jwt_expiry_hours.to_string(),
            });
        }
        Ok(())
    }

    pub fn development() -> Self {
        Self {
            environment: Environment::Development,
            database: DatabaseConfig {
                url: MEMORY_DATABASE_URL.to_string(),
                max_connections: 10,
                connection_timeout: 30,
            },
            api: ApiConfig {
                port: 3333,
                enable_request_logging: true,
                max_request_size_bytes: 1024 * 1024, // 1MB
            },
            security: SecurityConfig {
                jwt_secret: DEVELOPMENT_JWT_SECRET.to_string(),
                jwt_expiry_hours: 24 * 7, // 1 week
                bcrypt_cost: bcrypt::DEFAULT_COST,
                enable_cors: true,
                cors_origins: vec!["http://localhost:3000".to_string(), "http://localhost:5173".to_string()],
            },
        }
    }

    pub fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            database: DatabaseConfig {
                url: String::new(),
                max_connections: 20,
                connection_timeout: 10,
            },
            api: ApiConfig {
                port: 3333,
                enable_request_logging: true,
                max_request_size_bytes: 256 * 1024,
            },
            security: SecurityConfig {
                jwt_secret: String::new(),
                jwt_expiry_hours: 24,
                bcrypt_cost: bcrypt::DEFAULT_COST,
                enable_cors: true,
                cors_origins: vec!["https://staging.example.com".to_string()],
            },
        }
    }

    pub fn production() -> Self {
        Self {
            environment: Environment::Production,
            database: DatabaseConfig {
                url: String::new(),
                max_connections: 50,
                connection_timeout: 5,
            },
            api: ApiConfig {
                port: 3333,
                enable_request_logging: false,
                max_request_size_bytes: 64 * 1024,
            },
            security: SecurityConfig {
                jwt_secret: String::new(),
                jwt_expiry_hours: 4,
                bcrypt_cost: bcrypt::DEFAULT_COST,
                enable_cors: true,
                cors_origins: vec!["https://app.example.com".to_string()],
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_development_config() {
        let config = AppConfig::development();
        assert!(config.database.uses_memory_store());
        assert_eq!(config.security.jwt_expiry_hours, 24 * 7);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_production_requires_secret_and_database() {
        let config = AppConfig::production();
        assert!(matches!(config.validate(), Err(ConfigError::Missing("JWT_SECRET"))));

        let mut config = AppConfig::production();
        config.security.jwt_secret = "s3cret".to_string();
        assert!(matches!(config.validate(), Err(ConfigError::Missing("DATABASE_URL"))));

        config.database.url = "postgres://localhost/bookmarks".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_bcrypt_cost_out_of_range() {
        let mut config = AppConfig::development();
        config.security.bcrypt_cost = 2;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid { name: "SECURITY_BCRYPT_COST", .. })));
    }

    #[test]
    fn test_jwt_expiry_bounds() {
        let mut config = AppConfig::development();
        for hours in [0, MAX_JWT_EXPIRY_HOURS + 1, 1 << 40, u64::MAX] {
            config.security.jwt_expiry_hours = hours;
            assert!(
                matches!(config.validate(), Err(ConfigError::Invalid { name: "SECURITY_JWT_EXPIRY_HOURS", .. })),
                "{hours} hours should be rejected"
            );
        }

        config.security.jwt_expiry_hours = MAX_JWT_EXPIRY_HOURS;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_secret_is_not_serialized() {
        let config = AppConfig::development();
        let value = serde_json::to_value(&config).unwrap();
        assert!(value["security"].get("jwt_secret").is_none());
    }
}
