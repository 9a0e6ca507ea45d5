//! Custom Axum extractors

use axum::body::{to_bytes, Body};
use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::header::CONTENT_TYPE;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use axum::Form;
use serde_json::Value;

use super::error::ApiError;
use crate::models::UserPayload;

/// Largest accepted request body (matches the usual 100kb JSON parser default)
pub const BODY_LIMIT: usize = 100 * 1024;

/// Parse a `{id}` path segment by its leading integer.
///
/// Leading whitespace and a sign are allowed, and parsing stops at the first
/// non-digit, so `2abc` and `1.5` name users 2 and 1. A segment with no leading
/// digits, or one outside `i32`, can never match a row and is answered like a
/// missing user.
pub fn parse_user_id(raw: &str) -> Result<i32, ApiError> {
    let trimmed = raw.trim_start();
    let unsigned = trimmed.trim_start_matches(['+', '-']);
    let sign_len = trimmed.len() - unsigned.len();
    if sign_len > 1 {
        return Err(ApiError::user_not_found());
    }

    let digits = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len());
    if digits == 0 {
        return Err(ApiError::user_not_found());
    }

    trimmed[..sign_len + digits]
        .parse()
        .map_err(|_| ApiError::user_not_found())
}

/// Extract a user id from path
pub struct UserId(pub i32);

impl<S> FromRequestParts<S> for UserId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw): Path<String> = Path::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::user_not_found())?;

        Ok(Self(parse_user_id(&raw)?))
    }
}

/// Body encodings accepted for create/update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BodyKind {
    Json,
    Form,
    Other,
}

fn body_kind(headers: &HeaderMap) -> BodyKind {
    let mime = headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .map(|value| value.trim().to_ascii_lowercase())
        .unwrap_or_default();

    if mime == "application/json" || mime.ends_with("+json") {
        BodyKind::Json
    } else if mime == "application/x-www-form-urlencoded" {
        BodyKind::Form
    } else {
        BodyKind::Other
    }
}

/// Extract a create/update body from JSON or url-encoded form data.
///
/// - empty body, JSON array or unrecognised content type: no fields (validation
///   reports them missing)
/// - malformed JSON/form, or a JSON scalar: `ApiError::Internal`, i.e. a generic 500
pub struct UserBody(pub UserPayload);

impl<S> FromRequest<S> for UserBody
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let kind = body_kind(req.headers());
        if kind == BodyKind::Other {
            return Ok(Self(UserPayload::default()));
        }

        let (parts, body) = req.into_parts();
        let bytes = to_bytes(body, BODY_LIMIT)
            .await
            .map_err(|e| ApiError::Internal {
                message: format!("failed to read request body: {}", e),
            })?;

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self(UserPayload::default()));
        }

        let payload = match kind {
            BodyKind::Json => json_payload(&bytes)?,
            _ => {
                let req = Request::from_parts(parts, Body::from(bytes));
                let Form(payload) = Form::<UserPayload>::from_request(req, state)
                    .await
                    .map_err(|rejection| ApiError::Internal {
                        message: format!("invalid form body: {}", rejection.body_text()),
                    })?;
                payload
            }
        };

        Ok(Self(payload))
    }
}

/// Only a top-level object carries fields. An array has none, and any other
/// top-level value is rejected like malformed JSON.
fn json_payload(bytes: &[u8]) -> Result<UserPayload, ApiError> {
    let value: Value = serde_json::from_slice(bytes).map_err(|e| ApiError::Internal {
        message: format!("invalid JSON body: {}", e),
    })?;

    match value {
        Value::Object(fields) => Ok(UserPayload::from(fields)),
        Value::Array(_) => Ok(UserPayload::default()),
        other => Err(ApiError::Internal {
            message: format!("JSON body must be an object or array, got {}", other),
        }),
    }
}
