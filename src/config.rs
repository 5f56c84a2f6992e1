//! Runtime configuration for atelier services and adapters.
//!
//! Configuration is read from environment variables:
//! - `JWT_SECRET` - Required. Signing secret for identity tokens.
//! - `TOKEN_TTL_DAYS` - Optional. Identity token lifetime. Defaults to `7`.
//! - `DATABASE_URL` - Optional. `PostgreSQL` connection string.
//! - `DATABASE_MAX_CONNECTIONS` - Optional. Pool size. Defaults to `10`.
//! - `INVITE_CODE_LENGTH` - Optional. Generated invite code length.
//!   Defaults to `8`.
//! - `PASSWORD_HASH_ITERATIONS` - Optional. PBKDF2 rounds. Defaults to
//!   `100000`.

use std::str::FromStr;
use thiserror::Error;

/// Default identity token lifetime in days.
pub const DEFAULT_TOKEN_TTL_DAYS: i64 = 7;
/// Default connection pool size.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 10;
/// Default generated invite code length.
pub const DEFAULT_INVITE_CODE_LENGTH: usize = 8;
/// Default PBKDF2 iteration count.
pub const DEFAULT_PASSWORD_HASH_ITERATIONS: u32 = 100_000;

const INVITE_CODE_LENGTH_RANGE: std::ops::RangeInclusive<usize> = 6..=32;

/// Errors raised while loading configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A required variable is absent or empty.
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    /// A variable is present but unusable.
    #[error("invalid value for {key}: {value}")]
    InvalidValue {
        /// Variable name.
        key: String,
        /// Rejected raw value.
        value: String,
    },
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Secret used to sign and verify identity tokens.
    pub jwt_secret: String,
    /// Identity token lifetime in days.
    pub token_ttl_days: i64,
    /// `PostgreSQL` connection string, when persistence is enabled.
    pub database_url: Option<String>,
    /// Maximum number of pooled database connections.
    pub database_max_connections: u32,
    /// Length of generated invite codes.
    pub invite_code_length: usize,
    /// PBKDF2 iteration count for new credential hashes.
    pub password_hash_iterations: u32,
}

impl AppConfig {
    /// Loads configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a required variable is missing or a value
    /// cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads configuration through an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a required variable is missing or a value
    /// cannot be parsed.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let jwt_secret = lookup("JWT_SECRET")
            .filter(|secret| !secret.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar("JWT_SECRET".to_owned()))?;

        let token_ttl_days = parse_or(&lookup, "TOKEN_TTL_DAYS", DEFAULT_TOKEN_TTL_DAYS)?;
        if token_ttl_days < 1 {
            return Err(invalid("TOKEN_TTL_DAYS", token_ttl_days));
        }

        let invite_code_length =
            parse_or(&lookup, "INVITE_CODE_LENGTH", DEFAULT_INVITE_CODE_LENGTH)?;
        if !INVITE_CODE_LENGTH_RANGE.contains(&invite_code_length) {
            return Err(invalid("INVITE_CODE_LENGTH", invite_code_length));
        }

        let database_max_connections =
            parse_or(&lookup, "DATABASE_MAX_CONNECTIONS", DEFAULT_MAX_CONNECTIONS)?;
        if database_max_connections == 0 {
            return Err(invalid("DATABASE_MAX_CONNECTIONS", database_max_connections));
        }

        let password_hash_iterations = parse_or(
            &lookup,
            "PASSWORD_HASH_ITERATIONS",
            DEFAULT_PASSWORD_HASH_ITERATIONS,
        )?;
        if password_hash_iterations == 0 {
            return Err(invalid("PASSWORD_HASH_ITERATIONS", password_hash_iterations));
        }

        Ok(Self {
            jwt_secret,
            token_ttl_days,
            database_url: lookup("DATABASE_URL").filter(|url| !url.trim().is_empty()),
            database_max_connections,
            invite_code_length,
            password_hash_iterations,
        })
    }
}

fn parse_or<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
            key: key.to_owned(),
            value: raw,
        }),
    }
}

fn invalid(key: &str, value: impl ToString) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_owned(),
        value: value.to_string(),
    }
}
