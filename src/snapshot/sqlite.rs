//! SQLite-backed snapshot store
//!
//! One row per company holding the sparse JSON record, plus a small
//! key/value table for run metadata. The database runs in WAL mode and
//! is created (with its parent directory) on first use.

use super::store::{SnapshotStore, StoreOp, StoredCompany};
use crate::error::{ProcessorError, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::Row;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use std::path::Path;
use std::str::FromStr;
use tracing::debug;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Durable store over an embedded SQLite database
#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Open (creating if needed) the database at `path`
    pub async fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let options = SqliteConnectOptions::from_str(&format!("sqlite:{}", path.display()))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;

        debug!("Opened snapshot store at {}", path.display());
        Self::with_pool(pool).await
    }

    /// Private in-memory database
    pub async fn in_memory() -> Result<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?;
        // Each connection to :memory: is its own database
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;
        Self::with_pool(pool).await
    }

    async fn with_pool(pool: SqlitePool) -> Result<Self> {
        let store = Self { pool };
        store.migrate().await?;
        Ok(store)
    }

    async fn migrate(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS companies (
                company_number TEXT PRIMARY KEY,
                record TEXT NOT NULL,
                last_updated TEXT
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS snapshot_metadata (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Close the pool, flushing the WAL
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

fn decode_row(record: &str, last_updated: Option<String>) -> Result<StoredCompany> {
    let record = serde_json::from_str(record)?;
    let last_updated = match last_updated {
        Some(text) => Some(NaiveDate::parse_from_str(&text, DATE_FORMAT).map_err(|e| {
            ProcessorError::store(format!("invalid last_updated '{}': {}", text, e))
        })?),
        None => None,
    };
    Ok(StoredCompany::new(record, last_updated))
}

#[async_trait]
impl SnapshotStore for SqliteStore {
    async fn clear(&self) -> Result<()> {
        let mut tx = self.pool.begin().await?;
        sqlx::query("DELETE FROM companies")
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM snapshot_metadata")
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(())
    }

    async fn get(&self, company_number: &str) -> Result<Option<StoredCompany>> {
        let row = sqlx::query("SELECT record, last_updated FROM companies WHERE company_number = ?")
            .bind(company_number)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => {
                let record: String = row.try_get("record")?;
                let last_updated: Option<String> = row.try_get("last_updated")?;
                Ok(Some(decode_row(&record, last_updated)?))
            }
            None => Ok(None),
        }
    }

    async fn write_batch(&self, ops: Vec<StoreOp>) -> Result<()> {
        if ops.is_empty() {
            return Ok(());
        }

        let mut tx = self.pool.begin().await?;
        for op in &ops {
            match op {
                StoreOp::Put {
                    company_number,
                    company,
                } => {
                    let record = serde_json::to_string(&company.record)?;
                    let last_updated = company
                        .last_updated
                        .map(|date| date.format(DATE_FORMAT).to_string());
                    sqlx::query(
                        r#"
                        INSERT INTO companies (company_number, record, last_updated)
                        VALUES (?, ?, ?)
                        ON CONFLICT(company_number) DO UPDATE SET
                            record = excluded.record,
                            last_updated = excluded.last_updated
                        "#,
                    )
                    .bind(company_number)
                    .bind(&record)
                    .bind(&last_updated)
                    .execute(&mut *tx)
                    .await?;
                }
                StoreOp::Delete { company_number } => {
                    sqlx::query("DELETE FROM companies WHERE company_number = ?")
                        .bind(company_number)
                        .execute(&mut *tx)
                        .await?;
                }
            }
        }
        tx.commit().await?;

        debug!("Flushed {} store operation(s)", ops.len());
        Ok(())
    }

    async fn entries_after(
        &self,
        after: Option<&str>,
        limit: usize,
    ) -> Result<Vec<(String, StoredCompany)>> {
        let rows = sqlx::query(
            r#"
            SELECT company_number, record, last_updated
            FROM companies
            WHERE company_number > ?
            ORDER BY company_number
            LIMIT ?
            "#,
        )
        .bind(after.unwrap_or(""))
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|row| -> Result<(String, StoredCompany)> {
                let company_number: String = row.try_get("company_number")?;
                let record: String = row.try_get("record")?;
                let last_updated: Option<String> = row.try_get("last_updated")?;
                Ok((company_number, decode_row(&record, last_updated)?))
            })
            .collect()
    }

    async fn count(&self) -> Result<usize> {
        let row = sqlx::query("SELECT COUNT(*) AS total FROM companies")
            .fetch_one(&self.pool)
            .await?;
        let total: i64 = row.try_get("total")?;
        Ok(total as usize)
    }

    async fn get_metadata(&self, key: &str) -> Result<Option<String>> {
        let row = sqlx::query("SELECT value FROM snapshot_metadata WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;
        match row {
            Some(row) => Ok(Some(row.try_get("value")?)),
            None => Ok(None),
        }
    }

    async fn set_metadata(&self, key: &str, value: &str) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO snapshot_metadata (key, value)
            VALUES (?, ?)
            ON CONFLICT(key) DO UPDATE SET value = excluded.value
            "#,
        )
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
