use crate::db::models::{DbAppointment, DbChild, DbParent};
use crate::db::schema::SQLITE_INIT;
use crate::error::KeeperError;
use chrono::NaiveDate;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::str::FromStr;
use tracing::debug;

pub type SqlitePool = Pool<Sqlite>;

/// Open (creating if missing) the SQLite database at `database_url`.
pub async fn connect(database_url: &str, max_connections: u32) -> Result<SqlitePool, KeeperError> {
    let connect_opts = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections.max(1))
        .connect_with(connect_opts)
        .await?;
    Ok(pool)
}

#[derive(Clone)]
pub struct RegistryStorage {
    pool: SqlitePool,
}

impl RegistryStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Initialize the schema by executing the bundled DDL.
    pub async fn init_schema(&self) -> Result<(), KeeperError> {
        // sqlx::query runs one statement at a time
        for stmt in SQLITE_INIT.split(';') {
            let s = stmt.trim();
            if s.is_empty() {
                continue;
            }
            sqlx::query(s).execute(&self.pool).await?;
        }
        Ok(())
    }

    /// Insert a parent. A reused email surfaces as `DuplicateEmail`.
    pub async fn insert_parent(&self, name: &str, email: &str) -> Result<i64, KeeperError> {
        let res = sqlx::query("INSERT INTO parents (name, email) VALUES (?, ?)")
            .bind(name)
            .bind(email)
            .execute(&self.pool)
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                    KeeperError::DuplicateEmail(email.to_string())
                }
                other => KeeperError::DatabaseError(other),
            })?;
        Ok(res.last_insert_rowid())
    }

    pub async fn find_parent_by_email(&self, email: &str) -> Result<Option<DbParent>, KeeperError> {
        let parent = sqlx::query_as::<_, DbParent>(
            "SELECT id, name, email FROM parents WHERE email = ?",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(parent)
    }

    pub async fn get_parent(&self, id: i64) -> Result<Option<DbParent>, KeeperError> {
        let parent =
            sqlx::query_as::<_, DbParent>("SELECT id, name, email FROM parents WHERE id = ?")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(parent)
    }

    pub async fn insert_child(
        &self,
        name: &str,
        dob: NaiveDate,
        parent_id: i64,
    ) -> Result<i64, KeeperError> {
        let res = sqlx::query("INSERT INTO children (name, dob, parent_id) VALUES (?, ?, ?)")
            .bind(name)
            .bind(dob)
            .bind(parent_id)
            .execute(&self.pool)
            .await?;
        Ok(res.last_insert_rowid())
    }

    /// Exact-name lookup. Names are not unique; the earliest registered child wins.
    pub async fn find_child_by_name(&self, name: &str) -> Result<Option<DbChild>, KeeperError> {
        let child = sqlx::query_as::<_, DbChild>(
            "SELECT id, name, dob, parent_id FROM children WHERE name = ? ORDER BY id LIMIT 1",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;
        Ok(child)
    }

    pub async fn get_child(&self, id: i64) -> Result<Option<DbChild>, KeeperError> {
        let child = sqlx::query_as::<_, DbChild>(
            "SELECT id, name, dob, parent_id FROM children WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(child)
    }

    /// Insert an appointment with `reminder_sent` left at its default (false).
    pub async fn insert_appointment(
        &self,
        child_id: i64,
        vaccine: &str,
        date: NaiveDate,
    ) -> Result<i64, KeeperError> {
        let res = sqlx::query("INSERT INTO appointments (child_id, vaccine, date) VALUES (?, ?, ?)")
            .bind(child_id)
            .bind(vaccine)
            .bind(date)
            .execute(&self.pool)
            .await?;
        Ok(res.last_insert_rowid())
    }

    pub async fn get_appointment(&self, id: i64) -> Result<Option<DbAppointment>, KeeperError> {
        let appt = sqlx::query_as::<_, DbAppointment>(
            r#"SELECT id, child_id, vaccine, date, reminder_sent
               FROM appointments WHERE id = ?"#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(appt)
    }

    pub async fn list_appointments_for_child(
        &self,
        child_id: i64,
    ) -> Result<Vec<DbAppointment>, KeeperError> {
        let rows = sqlx::query_as::<_, DbAppointment>(
            r#"SELECT id, child_id, vaccine, date, reminder_sent
               FROM appointments WHERE child_id = ? ORDER BY id"#,
        )
        .bind(child_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Appointments on exactly `date` that have not been reminded yet.
    pub async fn list_due_unreminded(
        &self,
        date: NaiveDate,
    ) -> Result<Vec<DbAppointment>, KeeperError> {
        let rows = sqlx::query_as::<_, DbAppointment>(
            r#"SELECT id, child_id, vaccine, date, reminder_sent
               FROM appointments WHERE date = ? AND reminder_sent = 0 ORDER BY id"#,
        )
        .bind(date)
        .fetch_all(&self.pool)
        .await?;
        debug!(date = %date, count = rows.len(), "loaded due appointments");
        Ok(rows)
    }

    /// Flip `reminder_sent` to true. Returns false when the row was already flagged
    /// (or does not exist); the flag is never cleared.
    pub async fn mark_reminded(&self, id: i64) -> Result<bool, KeeperError> {
        let res =
            sqlx::query("UPDATE appointments SET reminder_sent = 1 WHERE id = ? AND reminder_sent = 0")
                .bind(id)
                .execute(&self.pool)
                .await?;
        Ok(res.rows_affected() > 0)
    }
}
