//! HTTP server layer
//!
//! Axum server with:
//! - Security headers and permissive CORS
//! - Request tracing
//! - Graceful shutdown
//! - JSON error responses

pub mod error;
pub mod extractors;
pub mod routes;
pub mod security;
pub mod server;

pub use error::ApiError;
pub use server::{build_router, run_server, AppState, ServerError};
