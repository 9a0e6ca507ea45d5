//! One-shot database health check
//!
//! Prints the same JSON report as `GET /health` and exits non-zero when the
//! database is unreachable, for use in container health checks.

use anyhow::{bail, Context, Result};
use clap::Parser;

use pgusers_server::db::PgProbe;
use pgusers_server::http::routes::health::check_health;
use pgusers_server::DatabaseConfig;

use super::DbArgs;

/// Arguments for the health command
#[derive(Parser, Debug)]
pub struct HealthArgs {
    #[command(flatten)]
    pub db: DbArgs,
}

pub async fn run_health(args: HealthArgs) -> Result<()> {
    let config = args.db.apply(DatabaseConfig::from_env());
    let probe = PgProbe::new(&config);

    let (_, report) = check_health(&probe).await;
    let rendered = serde_json::to_string_pretty(&report).context("Failed to render health report")?;
    println!("{}", rendered);

    if !report.is_healthy() {
        bail!("database {}:{} is unreachable", config.host, config.port);
    }
    Ok(())
}
