//! pgusers-server: CRUD HTTP API over a Postgres `users` table
//!
//! Layers, leaf-first:
//! - `config`: database and listener settings from the environment
//! - `db`: connection pool, user repository, liveness probe
//! - `models`: validated user input and the persisted `User` row
//! - `http`: axum router, middleware chain, JSON error mapping

pub mod config;
pub mod db;
pub mod http;
pub mod models;

#[cfg(test)]
pub(crate) mod test_support;

pub use config::{DatabaseConfig, ServerConfig};
pub use http::{build_router, run_server, AppState, ServerError};
