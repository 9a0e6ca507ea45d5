//! Health check endpoint
//!
//! Reports database reachability through a dedicated probe connection, never the pool.

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;

use crate::db::DatabaseProbe;
use crate::http::server::AppState;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthReport {
    pub status: &'static str,
    pub database: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub timestamp: String,
}

impl HealthReport {
    pub fn is_healthy(&self) -> bool {
        self.error.is_none()
    }
}

/// Run the probe once and build the report (shared with the `health` CLI command).
pub async fn check_health(probe: &dyn DatabaseProbe) -> (StatusCode, HealthReport) {
    let outcome = probe.check().await;
    let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);

    match outcome {
        Ok(()) => (
            StatusCode::OK,
            HealthReport {
                status: "healthy",
                database: "connected",
                error: None,
                timestamp,
            },
        ),
        Err(e) => {
            tracing::warn!(error = %e, "database health probe failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                HealthReport {
                    status: "unhealthy",
                    database: "disconnected",
                    error: Some(e.to_string()),
                    timestamp,
                },
            )
        }
    }
}

/// GET /health
async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthReport>) {
    let (status, report) = check_health(state.probe.as_ref()).await;
    (status, Json(report))
}

/// Health routes
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}
