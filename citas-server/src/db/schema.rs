//! Table definition for appointments
//!
//! Column names, DDL and every statement the repository runs are derived
//! from [`CITAS`], so bootstrap and queries cannot drift apart.

use once_cell::sync::Lazy;
use sqlx::SqlitePool;

use super::DbError;
use crate::models::{DEFAULT_REASON, MAX_PATIENT_LEN};

/// Column set of a table
#[derive(Debug, Clone, Copy)]
pub struct Columns {
    pub id: &'static str,
    pub patient: &'static str,
    pub date: &'static str,
    pub reason: &'static str,
}

impl Columns {
    fn all(&self) -> [&'static str; 4] {
        [self.id, self.patient, self.date, self.reason]
    }
}

/// Handle to a table: its name and columns
#[derive(Debug, Clone, Copy)]
pub struct Table {
    pub name: &'static str,
    pub c: Columns,
}

/// The appointments table
pub const CITAS: Table = Table {
    name: "citas",
    c: Columns {
        id: "id",
        patient: "patient",
        date: "date",
        reason: "reason",
    },
};

impl Table {
    /// `CREATE TABLE IF NOT EXISTS` statement with storage-level constraints.
    ///
    /// AUTOINCREMENT keeps ids monotonic and never reused.
    pub fn create_table_sql(&self) -> String {
        format!(
            "CREATE TABLE IF NOT EXISTS {t} (\n    \
                {id} INTEGER PRIMARY KEY AUTOINCREMENT,\n    \
                {patient} TEXT NOT NULL CHECK (length({patient}) <= {max}),\n    \
                {date} DATETIME NOT NULL,\n    \
                {reason} TEXT NOT NULL DEFAULT '{default}'\n\
            )",
            t = self.name,
            id = self.c.id,
            patient = self.c.patient,
            max = MAX_PATIENT_LEN,
            date = self.c.date,
            reason = self.c.reason,
            default = DEFAULT_REASON,
        )
    }

    /// Index serving the date-ordered listing
    pub fn create_date_index_sql(&self) -> String {
        format!(
            "CREATE INDEX IF NOT EXISTS ix_{t}_{date} ON {t} ({date})",
            t = self.name,
            date = self.c.date,
        )
    }

    /// `INSERT` binding patient, date, reason (in that order)
    pub fn insert_sql(&self) -> String {
        format!(
            "INSERT INTO {} ({}, {}, {}) VALUES (?, ?, ?)",
            self.name, self.c.patient, self.c.date, self.c.reason
        )
    }

    /// `SELECT` of every column, no filter
    pub fn select_sql(&self) -> String {
        format!("SELECT {} FROM {}", self.c.all().join(", "), self.name)
    }

    /// `SELECT` of all rows ordered ascending by date
    pub fn select_ordered_by_date_sql(&self) -> String {
        // id breaks ties so equal dates keep insertion order
        format!(
            "{} ORDER BY {} ASC, {} ASC",
            self.select_sql(),
            self.c.date,
            self.c.id
        )
    }

    /// `SELECT` of one row binding the id
    pub fn select_by_id_sql(&self) -> String {
        format!("{} WHERE {} = ?", self.select_sql(), self.c.id)
    }
}

/// Prepared statement text, built once.
pub(crate) struct Statements {
    pub insert: String,
    pub list: String,
    pub by_id: String,
}

pub(crate) static STATEMENTS: Lazy<Statements> = Lazy::new(|| Statements {
    insert: CITAS.insert_sql(),
    list: CITAS.select_ordered_by_date_sql(),
    by_id: CITAS.select_by_id_sql(),
});

/// Create the schema if missing. Safe to run on every startup.
pub async fn bootstrap(pool: &SqlitePool) -> Result<(), DbError> {
    tracing::info!(table = CITAS.name, "Creating tables if missing...");

    sqlx::query(&CITAS.create_table_sql()).execute(pool).await?;
    sqlx::query(&CITAS.create_date_index_sql())
        .execute(pool)
        .await?;

    tracing::info!(table = CITAS.name, "Schema ready");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::pool::create_in_memory_pool;

    #[test]
    fn statements_use_column_names() {
        assert_eq!(
            CITAS.insert_sql(),
            "INSERT INTO citas (patient, date, reason) VALUES (?, ?, ?)"
        );
        assert_eq!(
            CITAS.select_by_id_sql(),
            "SELECT id, patient, date, reason FROM citas WHERE id = ?"
        );
        assert!(CITAS
            .select_ordered_by_date_sql()
            .ends_with("ORDER BY date ASC, id ASC"));
    }

    #[test]
    fn ddl_carries_constraints() {
        let ddl = CITAS.create_table_sql();
        assert!(ddl.starts_with("CREATE TABLE IF NOT EXISTS citas"));
        assert!(ddl.contains("id INTEGER PRIMARY KEY AUTOINCREMENT"));
        assert!(ddl.contains("patient TEXT NOT NULL CHECK (length(patient) <= 100)"));
        assert!(ddl.contains("date DATETIME NOT NULL"));
        assert!(ddl.contains("DEFAULT 'Consulta'"));
    }

    #[tokio::test]
    async fn bootstrap_is_idempotent() {
        let pool = create_in_memory_pool().await.unwrap();
        bootstrap(&pool).await.unwrap();
        bootstrap(&pool).await.unwrap();

        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM citas")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 0);
    }

    #[tokio::test]
    async fn storage_default_reason_applies() {
        let pool = create_in_memory_pool().await.unwrap();
        bootstrap(&pool).await.unwrap();

        sqlx::query("INSERT INTO citas (patient, date) VALUES ('Eva', '2025-01-01 10:00:00')")
            .execute(&pool)
            .await
            .unwrap();
        let (reason,): (String,) = sqlx::query_as("SELECT reason FROM citas")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(reason, "Consulta");
    }

    #[tokio::test]
    async fn storage_rejects_null_patient() {
        let pool = create_in_memory_pool().await.unwrap();
        bootstrap(&pool).await.unwrap();

        let result = sqlx::query("INSERT INTO citas (patient, date) VALUES (NULL, '2025-01-01 10:00:00')")
            .execute(&pool)
            .await;
        assert!(result.is_err());
    }
}
