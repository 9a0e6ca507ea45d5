//! pgusers CLI - run and probe the users HTTP API
//!
//! Subcommands:
//! - `serve`: start the HTTP server
//! - `health`: one-shot database probe, same report as `GET /health`
//!
//! A `.env` file in the working directory is loaded before anything reads `PORT`/`DB_*`.

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod tracing_setup;

use tracing_setup::TracingConfig;

#[derive(Parser, Debug)]
#[command(
    name = "pgusers",
    author,
    version,
    about = "CRUD HTTP API for a Postgres users table"
)]
struct Cli {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API server
    Serve(commands::serve::ServeArgs),
    /// Check database connectivity and print the health report
    Health(commands::health::HealthArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    tracing_setup::init(&TracingConfig { debug: cli.debug })?;

    match cli.command {
        Commands::Serve(args) => commands::serve::run_serve(args).await?,
        Commands::Health(args) => commands::health::run_health(args).await?,
    }
    Ok(())
}
