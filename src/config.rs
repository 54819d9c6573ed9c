//! Application configuration loaded from a TOML file
//!
//! Every section falls back to defaults, so a partial file (or no file at
//! all) still yields a runnable configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::infrastructure::crypto::jwt::JwtConfig;
use crate::infrastructure::database::DatabaseConfig;

/// Environment variable holding an explicit config path
pub const CONFIG_ENV: &str = "FIXSYNC_CONFIG";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseSection,
    pub security: SecurityConfig,
    pub admin: AdminConfig,
    pub logging: LoggingConfig,
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Seconds to wait for in-flight requests after a shutdown signal
    pub shutdown_timeout: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            shutdown_timeout: 30,
        }
    }
}

impl ServerConfig {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseSection {
    pub url: String,
    pub max_connections: u32,
}

impl Default for DatabaseSection {
    fn default() -> Self {
        let db = DatabaseConfig::default();
        Self {
            url: db.url,
            max_connections: db.max_connections,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SecurityConfig {
    pub jwt_secret: String,
    pub jwt_expiration_hours: i64,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        let jwt = JwtConfig::default();
        Self {
            jwt_secret: jwt.secret,
            jwt_expiration_hours: jwt.expiration_hours,
        }
    }
}

/// Bootstrap account created when the users table is empty
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AdminConfig {
    pub email: String,
    pub full_name: String,
    pub password: String,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            email: "admin@fixsync.local".to_string(),
            full_name: "Administrator".to_string(),
            password: "admin123".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `RUST_LOG` syntax; the environment variable wins when set
    pub level: String,
    /// `text` or `json`
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "text".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Local,
    Memory,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    pub local_dir: PathBuf,
    /// Upload size limit in bytes
    pub max_file_size: u64,
    /// Prefix of URLs returned for stored objects
    pub public_base_url: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::Local,
            local_dir: PathBuf::from("./uploads"),
            max_file_size: 10 * 1024 * 1024,
            public_base_url: "/api/v1/media/files".to_string(),
        }
    }
}

impl AppConfig {
    /// Read and validate a config file. A missing file yields defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml(&raw)
    }

    pub fn from_toml(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.security.jwt_secret.trim().is_empty() {
            return Err(ConfigError::Invalid("security.jwt_secret is empty".into()));
        }
        if self.security.jwt_expiration_hours <= 0 {
            return Err(ConfigError::Invalid(
                "security.jwt_expiration_hours must be positive".into(),
            ));
        }
        if self.storage.max_file_size == 0 {
            return Err(ConfigError::Invalid("storage.max_file_size must be positive".into()));
        }
        if self.database.max_connections == 0 {
            return Err(ConfigError::Invalid(
                "database.max_connections must be positive".into(),
            ));
        }
        Ok(())
    }

    pub fn database_config(&self) -> DatabaseConfig {
        DatabaseConfig {
            url: self.database.url.clone(),
            max_connections: self.database.max_connections,
        }
    }

    pub fn jwt_config(&self) -> JwtConfig {
        JwtConfig {
            secret: self.security.jwt_secret.clone(),
            expiration_hours: self.security.jwt_expiration_hours,
            ..JwtConfig::default()
        }
    }
}

/// `~/.config/fixsync/config.toml` (platform equivalent), or `./config.toml`
/// when no config directory is known.
pub fn default_config_path() -> PathBuf {
    dirs_next::config_dir()
        .map(|dir| dir.join("fixsync").join("config.toml"))
        .unwrap_or_else(|| PathBuf::from("config.toml"))
}

/// Explicit path first, then `FIXSYNC_CONFIG`, then the default location.
pub fn resolve_config_path(explicit: Option<PathBuf>) -> PathBuf {
    explicit
        .or_else(|| std::env::var_os(CONFIG_ENV).map(PathBuf::from))
        .unwrap_or_else(default_config_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let config = AppConfig::from_toml("").unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.storage.backend, StorageBackend::Local);
        assert_eq!(config.storage.max_file_size, 10 * 1024 * 1024);
        assert_eq!(config.logging.format, "text");
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = AppConfig::from_toml(
            r#"
            [server]
            port = 9090

            [storage]
            backend = "memory"
            "#,
        )
        .unwrap();
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.storage.backend, StorageBackend::Memory);
        assert_eq!(config.storage.public_base_url, "/api/v1/media/files");
    }

    #[test]
    fn rejects_blank_secret_and_unknown_backend() {
        let err = AppConfig::from_toml("[security]\njwt_secret = \"  \"").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let err = AppConfig::from_toml("[storage]\nbackend = \"s3\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn missing_file_is_not_an_error() {
        let path = std::env::temp_dir().join(format!("fixsync-missing-{}.toml", uuid::Uuid::new_v4()));
        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.admin.email, "admin@fixsync.local");
    }

    #[test]
    fn explicit_path_wins() {
        let path = PathBuf::from("/etc/fixsync/config.toml");
        assert_eq!(resolve_config_path(Some(path.clone())), path);
    }

    #[test]
    fn jwt_config_carries_security_section() {
        let config = AppConfig::from_toml(
            "[security]\njwt_secret = \"s3cret\"\njwt_expiration_hours = 8",
        )
        .unwrap();
        let jwt = config.jwt_config();
        assert_eq!(jwt.secret, "s3cret");
        assert_eq!(jwt.expiration_hours, 8);
    }
}
