//! Per-request connection provider
//!
//! Handlers ask [`Database::acquire`] for a [`ScopedConnection`] and never
//! return it themselves: dropping the guard hands the connection back to the
//! pool, on success, on early `?` returns and on panics alike.

use std::ops::{Deref, DerefMut};

use sqlx::pool::PoolConnection;
use sqlx::{Sqlite, SqliteConnection, SqlitePool};

use super::pool::{create_in_memory_pool, create_pool_with_options};
use super::{schema, DbError};

/// Storage handle built once at startup and shared by all requests
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open (creating if needed) the database at `database_url`.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, DbError> {
        let pool = create_pool_with_options(database_url, max_connections).await?;
        Ok(Self::new(pool))
    }

    /// Fresh in-memory database with the schema already in place (for testing)
    pub async fn open_in_memory() -> Result<Self, DbError> {
        let db = Self::new(create_in_memory_pool().await?);
        db.bootstrap().await?;
        Ok(db)
    }

    /// Create tables if missing
    pub async fn bootstrap(&self) -> Result<(), DbError> {
        schema::bootstrap(&self.pool).await
    }

    /// Acquire one connection for the duration of a request.
    pub async fn acquire(&self) -> Result<ScopedConnection, DbError> {
        let conn = self.pool.acquire().await?;
        tracing::trace!("connection acquired");
        Ok(ScopedConnection { conn })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Close the pool; later acquires fail.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

/// A pooled connection owned by one request
pub struct ScopedConnection {
    conn: PoolConnection<Sqlite>,
}

impl Deref for ScopedConnection {
    type Target = SqliteConnection;

    fn deref(&self) -> &Self::Target {
        &self.conn
    }
}

impl DerefMut for ScopedConnection {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.conn
    }
}

impl Drop for ScopedConnection {
    fn drop(&mut self) {
        // the inner PoolConnection returns itself to the pool right after this
        tracing::trace!("connection released");
    }
}
