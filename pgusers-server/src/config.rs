//! Server and database configuration
//!
//! Loaded from environment variables, empty values count as unset:
//! - `PORT`: HTTP listen port (default: 3000)
//! - `DB_HOST`, `DB_PORT`, `DB_NAME`, `DB_USER`, `DB_PASSWORD`: Postgres connection
//!
//! The database defaults are local development placeholders, not deployment secrets.

use std::fmt;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::str::FromStr;

use sqlx::postgres::PgConnectOptions;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_DB_HOST: &str = "localhost";
pub const DEFAULT_DB_PORT: u16 = 5432;
pub const DEFAULT_DB_NAME: &str = "api";
pub const DEFAULT_DB_USER: &str = "me";
pub const DEFAULT_DB_PASSWORD: &str = "abc123";

/// Postgres connection settings
#[derive(Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub database: String,
    pub user: String,
    pub password: String,
}

impl DatabaseConfig {
    /// Create config from `DB_*` environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(env_var)
    }

    /// Create config from an arbitrary key lookup (for testing)
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            host: lookup("DB_HOST").unwrap_or(defaults.host),
            port: parse_or("DB_PORT", lookup("DB_PORT"), defaults.port),
            database: lookup("DB_NAME").unwrap_or(defaults.database),
            user: lookup("DB_USER").unwrap_or(defaults.user),
            password: lookup("DB_PASSWORD").unwrap_or(defaults.password),
        }
    }

    /// sqlx connect options for both the pool and one-off connections
    pub fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .database(&self.database)
            .username(&self.user)
            .password(&self.password)
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_DB_HOST.to_owned(),
            port: DEFAULT_DB_PORT,
            database: DEFAULT_DB_NAME.to_owned(),
            user: DEFAULT_DB_USER.to_owned(),
            password: DEFAULT_DB_PASSWORD.to_owned(),
        }
    }
}

impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database", &self.database)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind to (default: 0.0.0.0:3000)
    pub bind_addr: SocketAddr,

    pub database: DatabaseConfig,
}

impl ServerConfig {
    /// Create config from `PORT` and `DB_*` environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(env_var)
    }

    /// Create config from an arbitrary key lookup (for testing)
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = parse_or("PORT", lookup("PORT"), DEFAULT_PORT);
        Self {
            bind_addr: SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), port),
            database: DatabaseConfig::from_lookup(lookup),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), DEFAULT_PORT),
            database: DatabaseConfig::default(),
        }
    }
}

fn env_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.is_empty())
}

fn parse_or<T: FromStr + Copy + fmt::Display>(key: &str, raw: Option<String>, default: T) -> T {
    match raw {
        None => default,
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!(key, value = %raw, %default, "unparsable setting, using default");
            default
        }),
    }
}
