//! libSQL backend — async `CounterStore` implementation.
//!
//! Supports local file and in-memory databases. A single connection is
//! reused for all operations; `libsql::Connection` is `Send + Sync` and
//! safe for concurrent async use.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use libsql::{Connection, Database as LibSqlDatabase, params};
use tracing::{debug, info};

use crate::error::DatabaseError;
use crate::store::migrations;
use crate::store::traits::{CounterEntry, CounterStore};

/// libSQL counter store.
pub struct LibSqlBackend {
    #[allow(dead_code)]
    db: Arc<LibSqlDatabase>,
    conn: Connection,
}

impl LibSqlBackend {
    /// Open (or create) a local database file and run migrations.
    pub async fn new_local(path: &Path) -> Result<Self, DatabaseError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                DatabaseError::Connection(format!("Failed to create database directory: {e}"))
            })?;
        }

        let db = libsql::Builder::new_local(path)
            .build()
            .await
            .map_err(|e| DatabaseError::Connection(format!("Failed to open database: {e}")))?;

        let conn = db
            .connect()
            .map_err(|e| DatabaseError::Connection(format!("Failed to create connection: {e}")))?;

        let backend = Self {
            db: Arc::new(db),
            conn,
        };
        backend.run_migrations().await?;
        info!(path = %path.display(), "Database opened");
        Ok(backend)
    }

    /// Create an in-memory database (for tests).
    pub async fn new_memory() -> Result<Self, DatabaseError> {
        let db = libsql::Builder::new_local(":memory:")
            .build()
            .await
            .map_err(|e| {
                DatabaseError::Connection(format!("Failed to create in-memory database: {e}"))
            })?;

        let conn = db
            .connect()
            .map_err(|e| DatabaseError::Connection(format!("Failed to create connection: {e}")))?;

        let backend = Self {
            db: Arc::new(db),
            conn,
        };
        backend.run_migrations().await?;
        Ok(backend)
    }

    fn conn(&self) -> &Connection {
        &self.conn
    }
}

#[async_trait]
impl CounterStore for LibSqlBackend {
    async fn run_migrations(&self) -> Result<(), DatabaseError> {
        migrations::run_migrations(self.conn()).await
    }

    async fn increment(&self, user_id: &str, display_name: &str) -> Result<i64, DatabaseError> {
        let conn = self.conn();
        let now = Utc::now().to_rfc3339();

        // Row is created at 0 on first sight, then bumped; the display name
        // is refreshed to the latest on every hit.
        conn.execute(
            "INSERT OR IGNORE INTO counts (user_id, display_name, count) VALUES (?1, ?2, 0)",
            params![user_id, display_name],
        )
        .await
        .map_err(|e| DatabaseError::Query(format!("increment insert: {e}")))?;

        conn.execute(
            "UPDATE counts SET count = count + 1, display_name = ?1, updated_at = ?2 WHERE user_id = ?3",
            params![display_name, now, user_id],
        )
        .await
        .map_err(|e| DatabaseError::Query(format!("increment update: {e}")))?;

        let total = self.get_count(user_id).await?.unwrap_or(0);
        debug!(user_id, total, "Counter incremented");
        Ok(total)
    }

    async fn get_count(&self, user_id: &str) -> Result<Option<i64>, DatabaseError> {
        let conn = self.conn();
        let mut rows = conn
            .query(
                "SELECT count FROM counts WHERE user_id = ?1",
                params![user_id],
            )
            .await
            .map_err(|e| DatabaseError::Query(format!("get_count: {e}")))?;

        match rows.next().await {
            Ok(Some(row)) => Ok(Some(row.get::<i64>(0).unwrap_or(0))),
            Ok(None) => Ok(None),
            Err(e) => Err(DatabaseError::Query(format!("get_count: {e}"))),
        }
    }

    async fn top(&self, limit: usize) -> Result<Vec<CounterEntry>, DatabaseError> {
        let conn = self.conn();
        let mut rows = conn
            .query(
                "SELECT display_name, count FROM counts WHERE count > 0 ORDER BY count DESC LIMIT ?1",
                params![limit as i64],
            )
            .await
            .map_err(|e| DatabaseError::Query(format!("top: {e}")))?;

        let mut entries = Vec::new();
        while let Ok(Some(row)) = rows.next().await {
            entries.push(CounterEntry {
                display_name: row.get::<String>(0).unwrap_or_default(),
                count: row.get::<i64>(1).unwrap_or(0),
            });
        }
        Ok(entries)
    }
}
