//! Service banner

use axum::{routing::get, Json, Router};
use serde::Serialize;

/// Banner response
#[derive(Serialize)]
pub struct InfoResponse {
    pub info: &'static str,
}

/// GET /
async fn info() -> Json<InfoResponse> {
    Json(InfoResponse {
        info: "Rust, Axum, and Postgres API",
    })
}

pub fn router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().route("/", get(info))
}
