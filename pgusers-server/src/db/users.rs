//! User repository
//!
//! Each operation is a single auto-committed statement:
//! - list: `SELECT * ... ORDER BY id ASC`
//! - create/update: rely on the `email` unique constraint, map 23505 to `Conflict`
//! - get/update/delete: zero rows is `NotFound`

use async_trait::async_trait;
use sqlx::PgPool;

use crate::models::{NewUser, User};

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(sqlx::Error),

    #[error("not found: user '{id}'")]
    NotFound { id: i32 },

    /// Unique constraint on `email` rejected the write
    #[error("email already exists")]
    Conflict,
}

impl DbError {
    /// Message safe to hand back to the client for a 500
    pub fn message(&self) -> String {
        match self {
            Self::Sqlx(e) => super::driver_message(e),
            other => other.to_string(),
        }
    }
}

impl From<sqlx::Error> for DbError {
    fn from(e: sqlx::Error) -> Self {
        match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => Self::Conflict,
            _ => Self::Sqlx(e),
        }
    }
}

/// Storage seam for user CRUD (testable)
#[async_trait]
pub trait UserStore: Send + Sync {
    /// All users, ascending by id. Empty table is `Ok(vec![])`.
    async fn list(&self) -> Result<Vec<User>, DbError>;

    async fn get(&self, id: i32) -> Result<User, DbError>;

    /// Insert and return the database-assigned id.
    async fn create(&self, user: &NewUser) -> Result<i32, DbError>;

    /// Overwrite name and email, returning the updated row.
    async fn update(&self, id: i32, user: &NewUser) -> Result<User, DbError>;

    /// Remove the row, returning the deleted id.
    async fn delete(&self, id: i32) -> Result<i32, DbError>;
}

/// Postgres-backed user store
#[derive(Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn list(&self) -> Result<Vec<User>, DbError> {
        let users: Vec<User> = sqlx::query_as("SELECT * FROM users ORDER BY id ASC")
            .fetch_all(&self.pool)
            .await?;

        Ok(users)
    }

    async fn get(&self, id: i32) -> Result<User, DbError> {
        sqlx::query_as("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(DbError::NotFound { id })
    }

    async fn create(&self, user: &NewUser) -> Result<i32, DbError> {
        let (id,): (i32,) =
            sqlx::query_as("INSERT INTO users (name, email) VALUES ($1, $2) RETURNING id")
                .bind(user.name())
                .bind(user.email())
                .fetch_one(&self.pool)
                .await?;

        Ok(id)
    }

    async fn update(&self, id: i32, user: &NewUser) -> Result<User, DbError> {
        sqlx::query_as("UPDATE users SET name = $1, email = $2 WHERE id = $3 RETURNING *")
            .bind(user.name())
            .bind(user.email())
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(DbError::NotFound { id })
    }

    async fn delete(&self, id: i32) -> Result<i32, DbError> {
        let deleted: Option<(i32,)> = sqlx::query_as("DELETE FROM users WHERE id = $1 RETURNING id")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        deleted.map(|(id,)| id).ok_or(DbError::NotFound { id })
    }
}
