//! Application configuration management
//!
//! This module handles loading and validating configuration from environment variables.
//! All configuration is loaded at startup and validated before the application runs.

use std::env;
use std::sync::LazyLock;

use crate::constants::{
    DEFAULT_AI_MODEL, DEFAULT_AI_TIMEOUT_SECS, DEFAULT_DATABASE_MAX_CONNECTIONS,
    DEFAULT_JWT_EXPIRY_HOURS, DEFAULT_SERVER_HOST, DEFAULT_SERVER_PORT,
    DEFAULT_VIEW_CACHE_TTL_SECS,
};

/// Global application configuration (lazily initialized)
pub static CONFIG: LazyLock<Config> = LazyLock::new(|| {
    Config::from_env().expect("Failed to load configuration from environment")
});

/// Main application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub cache: CacheConfig,
    pub admin: AdminConfig,
    pub jwt: JwtConfig,
    pub ai: AiConfig,
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub rust_log: String,
    /// Emit JSON log lines instead of the human-readable format
    pub json_logs: bool,
}

/// Document store configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Connection string; `None` runs against the in-memory store
    pub url: Option<String>,
    /// Overrides the database named in the connection string
    pub name: Option<String>,
    pub max_connections: u32,
}

/// View cache configuration
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Redis URL; `None` keeps cached views in process memory
    pub redis_url: Option<String>,
    pub ttl_secs: u64,
}

/// Admin credentials
#[derive(Clone)]
pub struct AdminConfig {
    pub username: Option<String>,
    /// Plaintext password (development setups)
    pub password: Option<String>,
    /// Argon2 PHC string; takes precedence over `password`
    pub password_hash: Option<String>,
    /// Mark the session cookie `Secure`
    pub secure_cookie: bool,
}

impl std::fmt::Debug for AdminConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminConfig")
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
            .field("password_hash", &self.password_hash.as_ref().map(|_| "[REDACTED]"))
            .field("secure_cookie", &self.secure_cookie)
            .finish()
    }
}

/// JWT session configuration
#[derive(Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub expiry_hours: i64,
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"[REDACTED]")
            .field("expiry_hours", &self.expiry_hours)
            .finish()
    }
}

/// AI assistant configuration
#[derive(Clone)]
pub struct AiConfig {
    /// Base URL of an OpenAI-compatible API; `None` disables the assistant
    pub api_url: Option<String>,
    pub api_key: Option<String>,
    pub model: String,
    pub timeout_secs: u64,
}

impl std::fmt::Debug for AiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AiConfig")
            .field("api_url", &self.api_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("model", &self.model)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Ok(Self {
            server: ServerConfig::from_env()?,
            database: DatabaseConfig::from_env()?,
            cache: CacheConfig::from_env()?,
            admin: AdminConfig::from_env()?,
            jwt: JwtConfig::from_env()?,
            ai: AiConfig::from_env()?,
        })
    }
}

impl ServerConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            host: env::var("SERVER_HOST").unwrap_or_else(|_| DEFAULT_SERVER_HOST.to_string()),
            port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| DEFAULT_SERVER_PORT.to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("SERVER_PORT".to_string()))?,
            rust_log: env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            json_logs: env::var("LOG_FORMAT")
                .map(|v| v.eq_ignore_ascii_case("json"))
                .unwrap_or(false),
        })
    }
}

impl DatabaseConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            url: optional_var("DATABASE_URL"),
            name: optional_var("DB_NAME"),
            max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                .unwrap_or_else(|_| DEFAULT_DATABASE_MAX_CONNECTIONS.to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("DATABASE_MAX_CONNECTIONS".to_string()))?,
        })
    }
}

impl CacheConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            redis_url: optional_var("REDIS_URL"),
            ttl_secs: env::var("VIEW_CACHE_TTL_SECS")
                .unwrap_or_else(|_| DEFAULT_VIEW_CACHE_TTL_SECS.to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("VIEW_CACHE_TTL_SECS".to_string()))?,
        })
    }
}

impl AdminConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            username: optional_var("ADMIN_USERNAME"),
            password: optional_var("ADMIN_PASSWORD"),
            password_hash: optional_var("ADMIN_PASSWORD_HASH"),
            secure_cookie: env::var("COOKIE_SECURE")
                .unwrap_or_else(|_| "false".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("COOKIE_SECURE".to_string()))?,
        })
    }

    /// Whether any admin login is possible with this configuration
    pub fn is_configured(&self) -> bool {
        self.username.is_some() && (self.password.is_some() || self.password_hash.is_some())
    }
}

impl JwtConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let secret =
            env::var("JWT_SECRET").map_err(|_| ConfigError::Missing("JWT_SECRET".to_string()))?;
        if secret.trim().is_empty() {
            return Err(ConfigError::InvalidValue("JWT_SECRET".to_string()));
        }

        Ok(Self {
            secret,
            expiry_hours: env::var("JWT_EXPIRY_HOURS")
                .unwrap_or_else(|_| DEFAULT_JWT_EXPIRY_HOURS.to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("JWT_EXPIRY_HOURS".to_string()))?,
        })
    }
}

impl AiConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            api_url: optional_var("AI_API_URL"),
            api_key: optional_var("AI_API_KEY"),
            model: env::var("AI_MODEL").unwrap_or_else(|_| DEFAULT_AI_MODEL.to_string()),
            timeout_secs: env::var("AI_TIMEOUT_SECS")
                .unwrap_or_else(|_| DEFAULT_AI_TIMEOUT_SECS.to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("AI_TIMEOUT_SECS".to_string()))?,
        })
    }
}

/// Read an environment variable, treating empty values as unset
fn optional_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(String),

    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let server = ServerConfig {
            host: DEFAULT_SERVER_HOST.to_string(),
            port: DEFAULT_SERVER_PORT,
            rust_log: "info".to_string(),
            json_logs: false,
        };
        assert_eq!(server.host, "0.0.0.0");
        assert_eq!(server.port, 8080);
    }

    #[test]
    fn test_admin_is_configured() {
        let mut admin = AdminConfig {
            username: Some("admin".to_string()),
            password: None,
            password_hash: None,
            secure_cookie: false,
        };
        assert!(!admin.is_configured());

        admin.password = Some("hunter2".to_string());
        assert!(admin.is_configured());

        admin.username = None;
        assert!(!admin.is_configured());
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let jwt = JwtConfig {
            secret: "super-secret".to_string(),
            expiry_hours: 1,
        };
        let output = format!("{:?}", jwt);
        assert!(output.contains("REDACTED"));
        assert!(!output.contains("super-secret"));

        let admin = AdminConfig {
            username: Some("admin".to_string()),
            password: Some("hunter2".to_string()),
            password_hash: None,
            secure_cookie: false,
        };
        assert!(!format!("{:?}", admin).contains("hunter2"));
    }
}
