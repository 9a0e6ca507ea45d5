//! Database layer - connection pool, user repository, liveness probe
//!
//! # Design Principles
//!
//! - One lazily-connected pool shared by every handler, no Arc<Mutex<Connection>>
//! - One parameterized statement per repository operation, no explicit transactions
//! - Rely on the unique constraint on `email`, no check-then-insert
//! - The health probe never borrows from the pool

pub mod pool;
pub mod probe;
pub mod users;

pub use pool::{create_pool, create_pool_with_options};
pub use probe::{DatabaseProbe, PgProbe, ProbeError};
pub use users::{DbError, PgUserStore, UserStore};

/// Client-facing text for a driver error.
///
/// Server-reported errors use the bare Postgres message (e.g. `relation "users" does not
/// exist`); connection and pool failures use sqlx's own description.
pub fn driver_message(err: &sqlx::Error) -> String {
    match err {
        sqlx::Error::Database(db) => db.message().to_owned(),
        other => other.to_string(),
    }
}
