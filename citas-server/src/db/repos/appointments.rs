//! Appointment repository
//!
//! - create: INSERT then SELECT by the new id, inside one transaction
//! - list: every row, ordered by date
//! - get: one row by id, NotFound when absent

use sqlx::{Connection, SqliteConnection};

use crate::db::schema::STATEMENTS;
use crate::db::DbError;
use crate::models::{Appointment, AppointmentCreate};

const RESOURCE: &str = "appointment";

/// Appointment repository over one borrowed connection
pub struct AppointmentRepo<'c> {
    conn: &'c mut SqliteConnection,
}

impl<'c> AppointmentRepo<'c> {
    pub fn new(conn: &'c mut SqliteConnection) -> Self {
        Self { conn }
    }

    /// Insert an appointment and read it back.
    ///
    /// Both statements share a transaction; any failure rolls it back
    /// before the error is returned.
    pub async fn create(&mut self, input: &AppointmentCreate) -> Result<Appointment, DbError> {
        let mut tx = self.conn.begin().await?;

        match insert_and_fetch(&mut tx, input).await {
            Ok(appointment) => {
                tx.commit().await?;
                Ok(appointment)
            }
            Err(e) => {
                if let Err(rollback_err) = tx.rollback().await {
                    tracing::error!(error = %rollback_err, "rollback failed");
                }
                Err(e)
            }
        }
    }

    /// All appointments, earliest date first.
    pub async fn list(&mut self) -> Result<Vec<Appointment>, DbError> {
        let rows = sqlx::query_as::<_, Appointment>(&STATEMENTS.list)
            .fetch_all(&mut *self.conn)
            .await?;
        Ok(rows)
    }

    /// A single appointment by id.
    pub async fn get(&mut self, id: i64) -> Result<Appointment, DbError> {
        sqlx::query_as::<_, Appointment>(&STATEMENTS.by_id)
            .bind(id)
            .fetch_optional(&mut *self.conn)
            .await?
            .ok_or_else(|| DbError::NotFound {
                resource: RESOURCE,
                id: id.to_string(),
            })
    }
}

async fn insert_and_fetch(
    conn: &mut SqliteConnection,
    input: &AppointmentCreate,
) -> Result<Appointment, DbError> {
    let result = sqlx::query(&STATEMENTS.insert)
        .bind(&input.patient)
        .bind(input.date)
        .bind(&input.reason)
        .execute(&mut *conn)
        .await?;
    let id = result.last_insert_rowid();
    tracing::debug!(id, "appointment row inserted");

    sqlx::query_as::<_, Appointment>(&STATEMENTS.by_id)
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?
        .ok_or_else(|| DbError::Inconsistent {
            resource: RESOURCE,
            id: id.to_string(),
        })
}
