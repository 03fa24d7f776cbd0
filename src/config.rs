//! Configuration module for Warden.
//!
//! Loads configuration from YAML files and environment variables.

use chrono::Duration;
use config::{Config as ConfigLoader, ConfigError, Environment, File};
use serde::Deserialize;

use crate::auth::RateLimitConfig;

/// Root configuration structure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub auth: AuthConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Authentication configuration.
///
/// The credential fields default to empty strings on purpose: a missing
/// `admin_email`, `admin_password`, or `jwt_secret` must not prevent the
/// process from starting. The gate reports a configuration error on each
/// authentication attempt instead.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Expected admin identity (email).
    #[serde(default)]
    pub admin_email: String,
    /// Admin secret, either plaintext or `sha256:<64 hex digits>`.
    #[serde(default)]
    pub admin_password: String,
    /// HS256 signing key for issued tokens.
    #[serde(default)]
    pub jwt_secret: String,
    /// Token lifetime as a duration string, e.g. "24h", "7d", "900s".
    #[serde(default = "default_token_lifetime")]
    pub token_lifetime: String,
    /// Login rate limiting.
    #[serde(default)]
    pub rate_limit: RateLimitConfig,
}

fn default_token_lifetime() -> String {
    "24h".to_string()
}

impl Config {
    /// Load configuration from files and environment.
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (WARDEN_*)
    /// 2. config/local.yaml (if exists)
    /// 3. config/default.yaml
    pub fn load() -> Result<Self, ConfigError> {
        let config = ConfigLoader::builder()
            // Start with default config
            .add_source(File::with_name("config/default").required(false))
            // Layer on local overrides
            .add_source(File::with_name("config/local").required(false))
            // Layer on environment variables with WARDEN_ prefix
            .add_source(
                Environment::with_prefix("WARDEN")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            admin_email: String::new(),
            admin_password: String::new(),
            jwt_secret: String::new(),
            token_lifetime: default_token_lifetime(),
            rate_limit: RateLimitConfig::default(),
        }
    }
}

/// Parse a duration string with an optional unit suffix.
///
/// Supported units: `s`, `m`, `h`, `d`. A bare integer is seconds.
pub fn parse_lifetime(raw: &str) -> Result<Duration, String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err("duration string is empty".to_string());
    }

    let (number, unit) = match raw.char_indices().last() {
        Some((idx, c)) if c.is_ascii_alphabetic() => (&raw[..idx], Some(c)),
        _ => (raw, None),
    };

    let value: i64 = number
        .parse()
        .map_err(|_| format!("invalid duration '{}'", raw))?;
    if value <= 0 {
        return Err(format!("duration '{}' must be positive", raw));
    }

    let secs = match unit {
        None | Some('s') => value,
        Some('m') => value * 60,
        Some('h') => value * 3600,
        Some('d') => value * 86400,
        Some(u) => return Err(format!("unknown duration unit '{}'", u)),
    };

    Ok(Duration::seconds(secs))
}
