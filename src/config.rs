use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub media: MediaConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Public origin used to build absolute links (pagination, short links).
    pub base_url: String,
    /// Accepted `Host` header values, `*` accepts any.
    pub allowed_hosts: Vec<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    pub secret_key: String,
    pub token_lifetime_days: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct MediaConfig {
    pub root: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl ServerConfig {
    pub fn base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    /// Compares a `Host` header, port included or not, against the allow
    /// list.
    pub fn is_allowed_host(&self, host: &str) -> bool {
        let name = match host.rsplit_once(':') {
            Some((name, port)) if port.chars().all(|c| c.is_ascii_digit()) => name,
            _ => host,
        };

        self.allowed_hosts.iter().any(|allowed| {
            allowed == "*"
                || allowed.eq_ignore_ascii_case(name)
                || allowed
                    .strip_prefix('.')
                    .is_some_and(|domain| {
                        name.eq_ignore_ascii_case(domain)
                            || name
                                .to_ascii_lowercase()
                                .ends_with(&format!(".{}", domain.to_ascii_lowercase()))
                    })
        })
    }
}

impl Config {
    /// Load configuration from file and environment variables
    ///
    /// Priority (highest to lowest):
    /// 1. Legacy variables (DATABASE_URL, SECRET_KEY, ALLOWED_HOSTS)
    /// 2. Environment variables (FOODGRAM__DATABASE__URL, etc.)
    /// 3. Config file specified by path
    /// 4. Hardcoded defaults
    pub fn load(config_path: Option<String>) -> Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::builder();

        builder = builder
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8000)?
            .set_default("server.base_url", "http://localhost:8000")?
            .set_default("server.allowed_hosts", vec!["localhost", "127.0.0.1"])?
            .set_default("database.url", "sqlite:foodgram.db")?
            .set_default("database.max_connections", 5)?
            .set_default("auth.token_lifetime_days", 30)?
            .set_default("media.root", "media")?
            .set_default("logging.level", "info")?;

        let config_file_path = config_path
            .or_else(|| env::var("CONFIG_PATH").ok())
            .unwrap_or_else(|| "config/default.toml".to_string());

        if std::path::Path::new(&config_file_path).exists() {
            builder = builder.add_source(File::with_name(&config_file_path));
        }

        builder = builder.add_source(
            Environment::with_prefix("FOODGRAM")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("server.allowed_hosts")
                .try_parsing(true),
        );

        if let Ok(database_url) = env::var("DATABASE_URL") {
            builder = builder.set_override("database.url", database_url)?;
        }
        if let Ok(secret_key) = env::var("SECRET_KEY") {
            builder = builder.set_override("auth.secret_key", secret_key)?;
        }
        if let Ok(allowed_hosts) = env::var("ALLOWED_HOSTS") {
            builder = builder.set_override("server.allowed_hosts", split_hosts(&allowed_hosts))?;
        }

        builder.build()?.try_deserialize()
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.auth.secret_key.len() < 32 {
            return Err("Secret key must be at least 32 characters long".to_string());
        }
        if self.auth.token_lifetime_days < 1 {
            return Err("Token lifetime must be at least 1 day".to_string());
        }
        if self.database.max_connections < 1 {
            return Err("Database max_connections must be at least 1".to_string());
        }
        if self.server.port == 0 {
            return Err("Server port must be greater than 0".to_string());
        }
        if url::Url::parse(&self.server.base_url).is_err() {
            return Err(format!("Invalid base url: {}", self.server.base_url));
        }
        if self.server.allowed_hosts.is_empty() {
            return Err("At least one allowed host is required".to_string());
        }
        Ok(())
    }
}

fn split_hosts(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|h| !h.is_empty())
        .map(str::to_owned)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> Config {
        Config {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8000,
                base_url: "http://localhost:8000".to_string(),
                allowed_hosts: vec!["localhost".to_string(), ".foodgram.test".to_string()],
            },
            database: DatabaseConfig {
                url: "sqlite:test.db".to_string(),
                max_connections: 5,
            },
            auth: AuthConfig {
                secret_key: "test_secret_key_minimum_32_characters_long".to_string(),
                token_lifetime_days: 30,
            },
            media: MediaConfig {
                root: "media".to_string(),
            },
            logging: LoggingConfig::default(),
        }
    }

    #[test]
    fn test_validation_valid_config() {
        assert!(config().validate().is_ok());
    }

    #[test]
    fn test_validation_short_secret() {
        let mut config = config();
        config.auth.secret_key = "short".to_string();

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_zero_port() {
        let mut config = config();
        config.server.port = 0;

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_zero_connections() {
        let mut config = config();
        config.database.max_connections = 0;

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_bad_base_url() {
        let mut config = config();
        config.server.base_url = "not a url".to_string();

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_allowed_hosts() {
        let server = config().server;

        assert!(server.is_allowed_host("localhost"));
        assert!(server.is_allowed_host("LOCALHOST:8000"));
        assert!(server.is_allowed_host("api.foodgram.test"));
        assert!(server.is_allowed_host("foodgram.test"));
        assert!(!server.is_allowed_host("evil.com"));
        assert!(!server.is_allowed_host("notfoodgram.test"));
    }

    #[test]
    fn test_split_hosts() {
        assert_eq!(
            split_hosts("a.com, b.com,,"),
            vec!["a.com".to_string(), "b.com".to_string()]
        );
    }
}
