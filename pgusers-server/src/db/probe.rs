//! Database liveness probe
//!
//! Opens its own short-lived connection so a saturated or broken pool does not mask
//! (or get blamed for) the database's actual reachability.

use async_trait::async_trait;
use sqlx::postgres::{PgConnectOptions, PgConnection};
use sqlx::Connection;

use crate::config::DatabaseConfig;

/// Probe failure (connect, query or close)
#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    #[error("{}", super::driver_message(.0))]
    Sqlx(#[from] sqlx::Error),
}

/// Trait for database liveness checks (testable)
#[async_trait]
pub trait DatabaseProbe: Send + Sync {
    async fn check(&self) -> Result<(), ProbeError>;
}

/// Real probe: connect, `SELECT 1`, close
#[derive(Clone)]
pub struct PgProbe {
    options: PgConnectOptions,
}

impl PgProbe {
    pub fn new(config: &DatabaseConfig) -> Self {
        Self {
            options: config.connect_options(),
        }
    }
}

#[async_trait]
impl DatabaseProbe for PgProbe {
    async fn check(&self) -> Result<(), ProbeError> {
        let mut conn = PgConnection::connect_with(&self.options).await?;

        let queried = sqlx::query("SELECT 1").execute(&mut conn).await;
        // always close, even when the query failed
        let closed = conn.close().await;

        queried?;
        closed?;
        Ok(())
    }
}
