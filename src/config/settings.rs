//! Process settings from the environment (and `.env` via dotenvy).

use crate::error::ConfigError;
use std::net::SocketAddr;

pub const DEFAULT_DATABASE_URL: &str = "postgres://localhost/clinic";
pub const DEFAULT_SCHEMA: &str = "public";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_BODY_LIMIT: usize = 1024 * 1024;

#[derive(Clone, Debug, PartialEq)]
pub struct Settings {
    pub database_url: String,
    /// PostgreSQL schema holding every clinic table.
    pub schema: String,
    pub bind_addr: SocketAddr,
    pub max_connections: u32,
    /// Maximum accepted request body, in bytes.
    pub body_limit: usize,
}

impl Settings {
    /// Load `.env` if present, then read settings from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str, default: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        let schema = get("CLINIC_SCHEMA", DEFAULT_SCHEMA);
        validate_schema_name(&schema)?;

        let bind_addr = get("BIND_ADDR", DEFAULT_BIND_ADDR);
        let bind_addr = bind_addr.parse().map_err(|e| ConfigError::InvalidVar {
            var: "BIND_ADDR",
            reason: format!("{} ({})", bind_addr, e),
        })?;

        Ok(Settings {
            database_url: get("DATABASE_URL", DEFAULT_DATABASE_URL),
            schema,
            bind_addr,
            max_connections: parse_number("DB_MAX_CONNECTIONS", &get("DB_MAX_CONNECTIONS", ""), DEFAULT_MAX_CONNECTIONS)?,
            body_limit: parse_number("REQUEST_BODY_LIMIT", &get("REQUEST_BODY_LIMIT", ""), DEFAULT_BODY_LIMIT)?,
        })
    }
}

fn parse_number<T>(var: &'static str, raw: &str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr + PartialOrd + Default,
{
    if raw.is_empty() {
        return Ok(default);
    }
    match raw.parse::<T>() {
        Ok(n) if n > T::default() => Ok(n),
        _ => Err(ConfigError::InvalidVar {
            var,
            reason: format!("expected a positive integer, got '{}'", raw),
        }),
    }
}

/// Schema names are interpolated into DDL, so only plain lowercase identifiers are allowed.
pub fn validate_schema_name(name: &str) -> Result<(), ConfigError> {
    let mut chars = name.chars();
    let first_ok = chars
        .next()
        .map(|c| c.is_ascii_lowercase() || c == '_')
        .unwrap_or(false);
    let rest_ok = chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_');
    if first_ok && rest_ok && name.len() <= 63 {
        Ok(())
    } else {
        Err(ConfigError::InvalidSchema(name.to_string()))
    }
}
