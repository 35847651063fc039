//! SQLite candidate store.
//!
//! Creates the `candidates` table on connect (idempotent) and maps rows back
//! into [`CandidateRecord`]s.

use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{FromRow, SqlitePool};
use std::str::FromStr;
use std::time::Duration;
use tracing::info;

use super::CandidateStore;
use crate::error::{StoreError, StoreResult};
use crate::models::{CandidateDraft, CandidateRecord, Seniority};

/// Candidates persisted in a SQLite database.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

#[derive(Debug, FromRow)]
struct CandidateRow {
    id: i64,
    name: String,
    surname: String,
    seniority: String,
    years: f64,
    availability: bool,
    created_at: DateTime<Utc>,
}

impl TryFrom<CandidateRow> for CandidateRecord {
    type Error = StoreError;

    fn try_from(row: CandidateRow) -> Result<Self, Self::Error> {
        let seniority = Seniority::from_normalized(&row.seniority).ok_or_else(|| {
            StoreError::CorruptRow(format!(
                "candidate {} has unknown seniority '{}'",
                row.id, row.seniority
            ))
        })?;

        Ok(CandidateRecord {
            id: row.id,
            name: row.name,
            surname: row.surname,
            seniority,
            years: row.years,
            availability: row.availability,
            created_at: row.created_at,
        })
    }
}

impl SqliteStore {
    /// Connect to `url` (e.g. `sqlite://candidates.db` or `sqlite::memory:`),
    /// creating the database file and schema when missing.
    pub async fn connect(url: &str) -> StoreResult<Self> {
        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);

        // An in-memory database lives and dies with its connection
        let pool = if url.contains(":memory:") {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None::<Duration>)
                .max_lifetime(None::<Duration>)
                .connect_with(options)
                .await?
        } else {
            SqlitePoolOptions::new()
                .max_connections(5)
                .connect_with(options)
                .await?
        };

        let store = Self::from_pool(pool).await?;
        info!("Candidate store ready: {}", url);
        Ok(store)
    }

    /// Wrap an existing pool, creating the schema if needed.
    pub async fn from_pool(pool: SqlitePool) -> StoreResult<Self> {
        create_candidates_table(&pool).await?;
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

async fn create_candidates_table(pool: &SqlitePool) -> StoreResult<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS candidates (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL CHECK (length(name) <= 120),
            surname TEXT NOT NULL CHECK (length(surname) <= 120),
            seniority TEXT NOT NULL CHECK (seniority IN ('junior', 'senior')),
            years REAL NOT NULL CHECK (years >= 0),
            availability INTEGER NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_candidates_name ON candidates (name)")
        .execute(pool)
        .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_candidates_surname ON candidates (surname)")
        .execute(pool)
        .await?;

    Ok(())
}

impl CandidateStore for SqliteStore {
    async fn save(&self, draft: CandidateDraft) -> StoreResult<CandidateRecord> {
        let created_at = Utc::now();

        let result = sqlx::query(
            r#"
            INSERT INTO candidates (name, surname, seniority, years, availability, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&draft.name)
        .bind(&draft.surname)
        .bind(draft.seniority.as_str())
        .bind(draft.years)
        .bind(draft.availability)
        .bind(created_at)
        .execute(&self.pool)
        .await?;

        Ok(draft.into_record(result.last_insert_rowid(), created_at))
    }

    async fn find_all(&self) -> StoreResult<Vec<CandidateRecord>> {
        let rows: Vec<CandidateRow> = sqlx::query_as(
            r#"
            SELECT id, name, surname, seniority, years, availability, created_at
            FROM candidates
            ORDER BY id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(CandidateRecord::try_from).collect()
    }

    async fn remove(&self, id: i64) -> StoreResult<()> {
        let result = sqlx::query("DELETE FROM candidates WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(id));
        }
        Ok(())
    }

    async fn remove_all(&self) -> StoreResult<u64> {
        let result = sqlx::query("DELETE FROM candidates")
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}
