use std::env;

use auth::SettingsError;
use auth::SigningSecret;
use auth::TokenSettings;
use chrono::Duration;
use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    #[serde(default)]
    pub database: Option<DatabaseConfig>,
    #[serde(default)]
    pub users: Vec<SeedUserConfig>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

#[derive(Deserialize, Clone)]
pub struct JwtConfig {
    pub secret: String,
    #[serde(default = "default_ttl_seconds")]
    pub ttl_seconds: i64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
}

/// Account created at startup if missing.
#[derive(Deserialize, Clone)]
pub struct SeedUserConfig {
    pub username: String,
    pub password: String,
    pub role: String,
}

fn default_ttl_seconds() -> i64 {
    TokenSettings::DEFAULT_TTL_SECONDS
}

impl JwtConfig {
    /// Validate the secret and TTL and build token settings.
    ///
    /// # Errors
    /// * `Secret` - Secret is empty or shorter than 32 bytes
    /// * `TtlTooShort` / `TtlTooLong` - `ttl_seconds` outside the accepted range
    pub fn token_settings(&self) -> Result<TokenSettings, SettingsError> {
        let secret = SigningSecret::new(self.secret.as_bytes())?;
        let ttl = Duration::try_seconds(self.ttl_seconds).ok_or(SettingsError::TtlTooLong {
            maximum: TokenSettings::MAX_TTL_SECONDS,
            seconds: self.ttl_seconds,
        })?;

        TokenSettings::new(secret, ttl)
    }
}

// Secrets and passwords stay out of Debug output, which ends up in logs
impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .field("ttl_seconds", &self.ttl_seconds)
            .finish()
    }
}

impl std::fmt::Debug for SeedUserConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SeedUserConfig")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("role", &self.role)
            .finish()
    }
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (AUTH_JWT__SECRET, AUTH_SERVER__HTTP_PORT, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            // Start with default configuration
            .add_source(File::with_name("config/default").required(false))
            // Layer on environment-specific configuration
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Example: AUTH_JWT__SECRET=... overrides jwt.secret
            .add_source(
                Environment::with_prefix("AUTH")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        configuration.try_deserialize()
    }
}
