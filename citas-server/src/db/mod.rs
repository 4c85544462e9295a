//! Database layer - schema, pool, connection provider and repositories
//!
//! # Design Principles
//!
//! - One table definition ([`schema::CITAS`]) feeds both bootstrap and queries
//! - One pooled connection per request, released on drop
//! - Writes run inside a transaction and are rolled back on failure

pub mod connection;
pub mod pool;
pub mod repos;
pub mod schema;

pub use connection::{Database, ScopedConnection};
pub use pool::{create_in_memory_pool, create_pool, create_pool_with_options};
pub use repos::AppointmentRepo;

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: String },

    /// Row was written but could not be read back
    #[error("{resource} '{id}' missing right after insert")]
    Inconsistent { resource: &'static str, id: String },
}
