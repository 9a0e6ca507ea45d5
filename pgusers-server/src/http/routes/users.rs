//! User CRUD endpoints
//!
//! Create and delete answer with plain text; everything else is JSON.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};

use crate::http::error::ApiError;
use crate::http::extractors::{parse_user_id, UserBody, UserId};
use crate::http::server::AppState;
use crate::models::{NewUser, User};

/// GET /users - all users, ascending by id
async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<User>>, ApiError> {
    let users = state.users.list().await?;
    Ok(Json(users))
}

/// GET /users/{id}
async fn get_user(
    State(state): State<AppState>,
    UserId(id): UserId,
) -> Result<Json<User>, ApiError> {
    let user = state.users.get(id).await?;
    Ok(Json(user))
}

/// POST /users
async fn create_user(
    State(state): State<AppState>,
    UserBody(payload): UserBody,
) -> Result<(StatusCode, String), ApiError> {
    let user = NewUser::try_from(payload)?;
    let id = state.users.create(&user).await?;
    tracing::info!(user_id = id, "user created");

    Ok((StatusCode::CREATED, format!("User added with ID: {}", id)))
}

/// PUT /users/{id}
///
/// The body is validated before the id, so a bad body is 400 even for unknown ids.
async fn update_user(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    UserBody(payload): UserBody,
) -> Result<Json<User>, ApiError> {
    let user = NewUser::try_from(payload)?;
    let id = parse_user_id(&raw_id)?;
    let updated = state.users.update(id, &user).await?;
    tracing::info!(user_id = id, "user updated");

    Ok(Json(updated))
}

/// DELETE /users/{id}
async fn delete_user(
    State(state): State<AppState>,
    UserId(id): UserId,
) -> Result<String, ApiError> {
    let deleted = state.users.delete(id).await?;
    tracing::info!(user_id = deleted, "user deleted");

    Ok(format!("User deleted with ID: {}", deleted))
}

/// User routes
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users).post(create_user))
        .route(
            "/users/{id}",
            get(get_user).put(update_user).delete(delete_user),
        )
}
