//! Subcommand implementations

pub mod health;
pub mod serve;

use clap::Args;
use pgusers_server::DatabaseConfig;

/// Database connection overrides shared by every subcommand.
///
/// Unset flags fall back to `DB_*` environment variables, then to built-in defaults.
/// The password is deliberately environment-only (`DB_PASSWORD`) to keep it out of argv.
#[derive(Args, Debug, Clone, Default)]
pub struct DbArgs {
    /// Database host [default: localhost]
    #[arg(long, env = "DB_HOST")]
    pub db_host: Option<String>,

    /// Database port [default: 5432]
    #[arg(long, env = "DB_PORT")]
    pub db_port: Option<u16>,

    /// Database name [default: api]
    #[arg(long, env = "DB_NAME")]
    pub db_name: Option<String>,

    /// Database user [default: me]
    #[arg(long, env = "DB_USER")]
    pub db_user: Option<String>,
}

impl DbArgs {
    /// Apply flag overrides on top of an environment-derived config
    pub fn apply(self, mut config: DatabaseConfig) -> DatabaseConfig {
        if let Some(host) = self.db_host {
            config.host = host;
        }
        if let Some(port) = self.db_port {
            config.port = port;
        }
        if let Some(name) = self.db_name {
            config.database = name;
        }
        if let Some(user) = self.db_user {
            config.user = user;
        }
        config
    }
}
