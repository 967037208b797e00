use std::env;

use chrono::Duration;
use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub token: TokenConfig,
    pub lockout: LockoutConfig,
    pub reset: ResetConfig,
}

/// Signing key material and token lifetimes.
///
/// Loaded once at process start and treated as immutable afterwards;
/// the secret is handed to the token codec at construction and never
/// read again.
#[derive(Debug, Deserialize, Clone)]
pub struct TokenConfig {
    pub secret: String,
    pub access_ttl_minutes: i64,
    pub refresh_ttl_days: i64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LockoutConfig {
    pub max_failures: u32,
    pub window_minutes: i64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ResetConfig {
    pub token_ttl_minutes: i64,
}

impl TokenConfig {
    pub fn access_ttl(&self) -> Duration {
        Duration::minutes(self.access_ttl_minutes)
    }

    pub fn refresh_ttl(&self) -> Duration {
        Duration::days(self.refresh_ttl_days)
    }
}

impl LockoutConfig {
    pub fn window(&self) -> Duration {
        Duration::minutes(self.window_minutes)
    }
}

impl ResetConfig {
    pub fn token_ttl(&self) -> Duration {
        Duration::minutes(self.token_ttl_minutes)
    }
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (TOKEN__SECRET, LOCKOUT__MAX_FAILURES, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    /// 4. Built-in defaults for everything except the signing secret
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            .set_default("token.access_ttl_minutes", 15)?
            .set_default("token.refresh_ttl_days", 30)?
            .set_default("lockout.max_failures", 5)?
            .set_default("lockout.window_minutes", 15)?
            .set_default("reset.token_ttl_minutes", 30)?
            // Start with default configuration
            .add_source(File::with_name("config/default").required(false))
            // Layer on environment-specific configuration
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Layer on environment variables (with __ as separator)
            // Example: TOKEN__SECRET=... overrides token.secret
            .add_source(Environment::with_prefix("").separator("__"))
            .build()?;

        let config: Config = configuration.try_deserialize()?;

        Ok(config)
    }
}
