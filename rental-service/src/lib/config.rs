use std::env;

use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

/// Minimum signing secret length, in bytes.
pub const MIN_JWT_SECRET_BYTES: usize = 32;

/// Longest accepted token lifetime: 365 days, in milliseconds.
pub const MAX_JWT_EXPIRATION_MS: i64 = 365 * 24 * 60 * 60 * 1000;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    pub upload: UploadConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_http_port")]
    pub http_port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct JwtConfig {
    pub secret: String,
    #[serde(default = "default_expiration_ms")]
    pub expiration_ms: i64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct UploadConfig {
    /// Directory pictures are written to and served from
    #[serde(default = "default_upload_path")]
    pub path: String,
    /// Public URL prefix of the served directory, with trailing slash
    #[serde(default = "default_upload_url")]
    pub url: String,
}

fn default_max_connections() -> u32 {
    5
}

fn default_http_port() -> u16 {
    3001
}

fn default_expiration_ms() -> i64 {
    86_400_000
}

fn default_upload_path() -> String {
    "uploads".to_string()
}

fn default_upload_url() -> String {
    "http://localhost:3001/uploads/".to_string()
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (DATABASE__URL, JWT__SECRET, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Example: JWT__SECRET=... overrides jwt.secret
            .add_source(Environment::default().separator("__"))
            .build()?;

        let config: Config = configuration.try_deserialize()?;
        config.validate()?;

        Ok(config)
    }

    /// Reject settings the service cannot safely run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.jwt.secret.len() < MIN_JWT_SECRET_BYTES {
            return Err(ConfigError::Message(format!(
                "jwt.secret must be at least {} bytes, got {}",
                MIN_JWT_SECRET_BYTES,
                self.jwt.secret.len()
            )));
        }

        if self.jwt.expiration_ms <= 0 || self.jwt.expiration_ms > MAX_JWT_EXPIRATION_MS {
            return Err(ConfigError::Message(format!(
                "jwt.expiration_ms must be between 1 and {}, got {}",
                MAX_JWT_EXPIRATION_MS, self.jwt.expiration_ms
            )));
        }

        Ok(())
    }
}
