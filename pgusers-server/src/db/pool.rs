//! Database connection pool management
//!
//! Uses sqlx PgPool with explicit connection limits. The pool connects lazily so the
//! server starts even while Postgres is down; failures surface per request.

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::config::DatabaseConfig;

/// Default maximum connections for the pool.
const DEFAULT_MAX_CONNECTIONS: u32 = 10;

/// Create a PostgreSQL connection pool.
///
/// Must be called from within a Tokio runtime.
///
/// # Example
///
/// ```ignore
/// let pool = create_pool(&DatabaseConfig::from_env());
/// ```
pub fn create_pool(config: &DatabaseConfig) -> PgPool {
    create_pool_with_options(config, DEFAULT_MAX_CONNECTIONS)
}

/// Create a PostgreSQL connection pool with custom options.
///
/// # Arguments
///
/// * `config` - Connection settings
/// * `max_connections` - Maximum number of connections in the pool
pub fn create_pool_with_options(config: &DatabaseConfig, max_connections: u32) -> PgPool {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect_lazy_with(config.connect_options())
}
