//! HTTP server command

use std::net::{IpAddr, SocketAddr};

use anyhow::{Context, Result};
use clap::Parser;

use pgusers_server::{run_server, AppState, ServerConfig};

use super::DbArgs;

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Port to listen on [default: 3000]
    #[arg(long, short = 'p', env = "PORT")]
    pub port: Option<u16>,

    /// Interface to bind to
    #[arg(long, default_value = "0.0.0.0")]
    pub host: IpAddr,

    #[command(flatten)]
    pub db: DbArgs,
}

impl ServeArgs {
    /// Resolve the final config: flags, then environment, then defaults
    pub fn into_config(self, env: ServerConfig) -> ServerConfig {
        let port = self.port.unwrap_or_else(|| env.bind_addr.port());
        ServerConfig {
            bind_addr: SocketAddr::new(self.host, port),
            database: self.db.apply(env.database),
        }
    }
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let config = args.into_config(ServerConfig::from_env());

    tracing::info!(
        bind = %config.bind_addr,
        db_host = %config.database.host,
        db_port = config.database.port,
        db_name = %config.database.database,
        "Starting pgusers server"
    );

    let state = AppState::from_config(&config.database);

    // Run server (blocks until shutdown)
    run_server(state, config).await.context("Server error")?;

    Ok(())
}
