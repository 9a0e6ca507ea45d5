//! API error types with IntoResponse
//!
//! Every failure becomes `{"error": <message>}` with the matching status code.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::db::DbError;
use crate::models::ValidationError;

/// Generic message for failures whose details stay in the logs
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Validation failed (400)
    Validation(ValidationError),

    /// Resource not found (404)
    NotFound { resource: &'static str },

    /// Unique constraint violated (409)
    Conflict { message: &'static str },

    /// Database error (500, logged, driver message returned)
    Database(DbError),

    /// No route for method + path (404)
    RouteNotFound,

    /// Internal error: body parse failure, panic (500, logged, generic message)
    Internal { message: String },
}

impl ApiError {
    pub fn user_not_found() -> Self {
        Self::NotFound { resource: "User" }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } | Self::RouteNotFound => StatusCode::NOT_FOUND,
            Self::Conflict { .. } => StatusCode::CONFLICT,
            Self::Database(_) | Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            Self::Validation(e) => e.to_string(),
            Self::NotFound { resource } => format!("{} not found", resource),
            Self::Conflict { message } => message.to_owned(),
            Self::Database(e) => {
                tracing::error!("Database error: {}", e);
                e.message()
            }
            Self::RouteNotFound => "Route not found".to_owned(),
            Self::Internal { message } => {
                tracing::error!("Internal error: {}", message);
                INTERNAL_ERROR_MESSAGE.to_owned()
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}

impl From<DbError> for ApiError {
    fn from(e: DbError) -> Self {
        match e {
            DbError::NotFound { .. } => Self::user_not_found(),
            DbError::Conflict => Self::Conflict {
                message: "Email already exists",
            },
            DbError::Sqlx(_) => Self::Database(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use serde_json::Value;

    async fn body_json(err: ApiError) -> (StatusCode, Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn validation_error_is_400() {
        let (status, body) = body_json(ValidationError::InvalidEmail.into()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": "Invalid email format"}));
    }

    #[tokio::test]
    async fn missing_row_is_404() {
        let (status, body) = body_json(DbError::NotFound { id: 7 }.into()).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({"error": "User not found"}));
    }

    #[tokio::test]
    async fn unique_violation_is_409() {
        let (status, body) = body_json(DbError::Conflict.into()).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body, json!({"error": "Email already exists"}));
    }

    #[tokio::test]
    async fn database_error_exposes_driver_message() {
        let (status, body) = body_json(DbError::Sqlx(sqlx::Error::PoolTimedOut).into()).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], sqlx::Error::PoolTimedOut.to_string());
    }

    #[tokio::test]
    async fn internal_error_hides_details() {
        let err = ApiError::Internal {
            message: "expected value at line 1 column 2".into(),
        };
        let (status, body) = body_json(err).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({"error": "Internal server error"}));
    }

    #[tokio::test]
    async fn unmatched_route_is_404() {
        let (status, body) = body_json(ApiError::RouteNotFound).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({"error": "Route not found"}));
    }
}
