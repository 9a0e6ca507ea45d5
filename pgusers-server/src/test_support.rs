//! In-memory fakes for router and handler tests

use std::sync::Mutex;

use async_trait::async_trait;

use crate::db::{DatabaseProbe, DbError, ProbeError, UserStore};
use crate::models::{NewUser, User};

/// User store backed by a Vec, with `serial`-style ids and a unique `email`
#[derive(Default)]
pub struct MemoryUserStore {
    inner: Mutex<Table>,
}

#[derive(Default)]
struct Table {
    rows: Vec<User>,
    last_id: i32,
}

impl Table {
    fn email_taken(&self, email: &str, except: Option<i32>) -> bool {
        self.rows
            .iter()
            .any(|u| u.email == email && Some(u.id) != except)
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn list(&self) -> Result<Vec<User>, DbError> {
        let table = self.inner.lock().unwrap();
        let mut rows = table.rows.clone();
        rows.sort_by_key(|u| u.id);
        Ok(rows)
    }

    async fn get(&self, id: i32) -> Result<User, DbError> {
        let table = self.inner.lock().unwrap();
        table
            .rows
            .iter()
            .find(|u| u.id == id)
            .cloned()
            .ok_or(DbError::NotFound { id })
    }

    async fn create(&self, user: &NewUser) -> Result<i32, DbError> {
        let mut table = self.inner.lock().unwrap();
        if table.email_taken(user.email(), None) {
            return Err(DbError::Conflict);
        }

        table.last_id += 1;
        let id = table.last_id;
        table.rows.push(User {
            id,
            name: user.name().to_owned(),
            email: user.email().to_owned(),
        });
        Ok(id)
    }

    async fn update(&self, id: i32, user: &NewUser) -> Result<User, DbError> {
        let mut table = self.inner.lock().unwrap();
        if !table.rows.iter().any(|u| u.id == id) {
            return Err(DbError::NotFound { id });
        }
        if table.email_taken(user.email(), Some(id)) {
            return Err(DbError::Conflict);
        }

        let row = table
            .rows
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or(DbError::NotFound { id })?;
        row.name = user.name().to_owned();
        row.email = user.email().to_owned();
        Ok(row.clone())
    }

    async fn delete(&self, id: i32) -> Result<i32, DbError> {
        let mut table = self.inner.lock().unwrap();
        let before = table.rows.len();
        table.rows.retain(|u| u.id != id);
        if table.rows.len() == before {
            return Err(DbError::NotFound { id });
        }
        Ok(id)
    }
}

/// Store whose every call fails like an exhausted pool
pub struct FailingStore;

#[async_trait]
impl UserStore for FailingStore {
    async fn list(&self) -> Result<Vec<User>, DbError> {
        Err(sqlx::Error::PoolTimedOut.into())
    }

    async fn get(&self, _: i32) -> Result<User, DbError> {
        Err(sqlx::Error::PoolTimedOut.into())
    }

    async fn create(&self, _: &NewUser) -> Result<i32, DbError> {
        Err(sqlx::Error::PoolTimedOut.into())
    }

    async fn update(&self, _: i32, _: &NewUser) -> Result<User, DbError> {
        Err(sqlx::Error::PoolTimedOut.into())
    }

    async fn delete(&self, _: i32) -> Result<i32, DbError> {
        Err(sqlx::Error::PoolTimedOut.into())
    }
}

/// Store whose every call panics mid-request
pub struct PanickingStore;

#[async_trait]
impl UserStore for PanickingStore {
    async fn list(&self) -> Result<Vec<User>, DbError> {
        panic!("boom")
    }

    async fn get(&self, _: i32) -> Result<User, DbError> {
        panic!("boom")
    }

    async fn create(&self, _: &NewUser) -> Result<i32, DbError> {
        panic!("boom")
    }

    async fn update(&self, _: i32, _: &NewUser) -> Result<User, DbError> {
        panic!("boom")
    }

    async fn delete(&self, _: i32) -> Result<i32, DbError> {
        panic!("boom")
    }
}

/// Probe with a fixed outcome
pub struct StaticProbe {
    failure: Option<String>,
}

impl StaticProbe {
    pub fn up() -> Self {
        Self { failure: None }
    }

    pub fn down(reason: &str) -> Self {
        Self {
            failure: Some(reason.to_owned()),
        }
    }
}

#[async_trait]
impl DatabaseProbe for StaticProbe {
    async fn check(&self) -> Result<(), ProbeError> {
        match &self.failure {
            None => Ok(()),
            Some(reason) => Err(sqlx::Error::Protocol(reason.clone()).into()),
        }
    }
}
