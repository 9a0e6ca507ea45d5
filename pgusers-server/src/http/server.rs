//! Axum server setup
//!
//! Middleware, outermost first:
//! - Security headers
//! - Permissive CORS
//! - Request tracing (access log)
//! - Panic to 500 conversion
//!
//! Body parsing happens in the `UserBody` extractor. Unmatched routes and methods get a
//! JSON 404. Graceful shutdown on SIGTERM/Ctrl+C.

use std::any::Any;
use std::sync::Arc;

use axum::response::{IntoResponse, Response};
use axum::{middleware, Router};
use tokio::net::TcpListener;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use super::error::ApiError;
use super::{routes, security};
use crate::config::{DatabaseConfig, ServerConfig};
use crate::db::{create_pool, DatabaseProbe, PgProbe, PgUserStore, UserStore};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserStore>,
    /// Health probe, independent of the pool behind `users`
    pub probe: Arc<dyn DatabaseProbe>,
}

impl AppState {
    pub fn new(users: impl UserStore + 'static, probe: impl DatabaseProbe + 'static) -> Self {
        Self {
            users: Arc::new(users),
            probe: Arc::new(probe),
        }
    }

    /// Postgres-backed state. Must be called from within a Tokio runtime.
    pub fn from_config(config: &DatabaseConfig) -> Self {
        let pool = create_pool(config);
        Self::new(PgUserStore::new(pool), PgProbe::new(config))
    }
}

/// Build the application router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    // Router::layer wraps what is already there, so the innermost layer goes first
    Router::new()
        .merge(routes::index::router())
        .merge(routes::health::router())
        .merge(routes::users::router())
        .fallback(route_not_found)
        .method_not_allowed_fallback(route_not_found)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(CorsLayer::permissive())
        .layer(middleware::from_fn(security::security_headers))
        .with_state(state)
}

async fn route_not_found() -> ApiError {
    ApiError::RouteNotFound
}

fn handle_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_owned()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_owned()
    };

    ApiError::Internal {
        message: format!("handler panicked: {}", message),
    }
    .into_response()
}

/// Run the HTTP server until Ctrl+C or SIGTERM.
///
/// # Example
///
/// ```ignore
/// let config = ServerConfig::from_env();
/// let state = AppState::from_config(&config.database);
/// run_server(state, config).await?;
/// ```
pub async fn run_server(state: AppState, config: ServerConfig) -> Result<(), ServerError> {
    let app = build_router(state);

    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!("App running on {}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(%err, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(%err, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, starting shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting shutdown");
        }
    }
}

/// Server error type
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
