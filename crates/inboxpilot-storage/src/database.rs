// SPDX-FileCopyrightText: 2026 InboxPilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Database connection management with PRAGMA setup, WAL mode, and lifecycle.
//!
//! All writes are serialized through tokio-rusqlite's single background thread.
//! Do NOT create additional Connection instances for writes.

use std::path::Path;

use inboxpilot_core::InboxError;
use tracing::debug;

use crate::migrations;

/// Map a tokio-rusqlite call error into the shared storage error.
pub fn map_tr_err(e: tokio_rusqlite::Error<rusqlite::Error>) -> InboxError {
    InboxError::Storage {
        source: Box::new(e),
    }
}

/// Handle to the single background SQLite connection.
pub struct Database {
    conn: tokio_rusqlite::Connection,
}

impl Database {
    /// Open (or create) the database file at `path` and apply migrations.
    ///
    /// Parent directories are created as needed. `wal_mode` selects the
    /// journal mode; rollback journal is used otherwise.
    pub async fn open(path: &str, wal_mode: bool) -> Result<Self, InboxError> {
        if let Some(parent) = Path::new(path).parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| InboxError::Storage {
                    source: Box::new(e),
                })?;
        }

        let conn = tokio_rusqlite::Connection::open(path)
            .await
            .map_err(|e| InboxError::Storage {
                source: Box::new(e),
            })?;
        let db = Self { conn };
        db.configure(wal_mode).await?;
        db.migrate().await?;
        debug!(path, wal_mode, "database opened");
        Ok(db)
    }

    /// Open a private in-memory database with the full schema applied.
    pub async fn open_in_memory() -> Result<Self, InboxError> {
        let conn = tokio_rusqlite::Connection::open_in_memory()
            .await
            .map_err(|e| InboxError::Storage {
                source: Box::new(e),
            })?;
        let db = Self { conn };
        db.configure(false).await?;
        db.migrate().await?;
        Ok(db)
    }

    async fn configure(&self, wal_mode: bool) -> Result<(), InboxError> {
        self.conn
            .call(move |conn| -> Result<(), rusqlite::Error> {
                if wal_mode {
                    // journal_mode returns a row, so it cannot go through execute_batch.
                    let _mode: String =
                        conn.query_row("PRAGMA journal_mode = WAL;", [], |row| row.get(0))?;
                    conn.execute_batch("PRAGMA synchronous = NORMAL;")?;
                }
                conn.execute_batch(
                    "PRAGMA foreign_keys = ON;
                     PRAGMA busy_timeout = 5000;",
                )?;
                Ok(())
            })
            .await
            .map_err(map_tr_err)
    }

    async fn migrate(&self) -> Result<(), InboxError> {
        self.conn
            .call(|conn| migrations::run_migrations(conn))
            .await
            .map_err(|e| InboxError::Storage {
                source: Box::new(e),
            })
    }

    /// The underlying async connection.
    pub fn connection(&self) -> &tokio_rusqlite::Connection {
        &self.conn
    }

    /// Checkpoint the WAL and close the connection.
    pub async fn close(self) -> Result<(), InboxError> {
        self.conn
            .call(|conn| -> Result<(), rusqlite::Error> {
                conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
                Ok(())
            })
            .await
            .map_err(map_tr_err)?;
        self.conn.close().await.map_err(map_tr_err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn open_creates_file_and_parent_dirs() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("nested").join("inbox.db");
        let db = Database::open(db_path.to_str().unwrap(), true).await.unwrap();
        assert!(db_path.exists());
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn wal_mode_is_enabled() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("wal.db");
        let db = Database::open(db_path.to_str().unwrap(), true).await.unwrap();

        let mode = db
            .connection()
            .call(|conn| -> Result<String, rusqlite::Error> {
                conn.query_row("PRAGMA journal_mode;", [], |row| row.get(0))
            })
            .await
            .unwrap();
        assert_eq!(mode.to_lowercase(), "wal");
    }

    #[tokio::test]
    async fn foreign_keys_are_enforced() {
        let db = Database::open_in_memory().await.unwrap();
        let result = db
            .connection()
            .call(|conn| -> Result<usize, rusqlite::Error> {
                conn.execute(
                    "INSERT INTO messages (user_id, provider_message_id, timestamp)
                     VALUES (999, 'orphan', '2026-01-01T00:00:00Z')",
                    [],
                )
            })
            .await;
        assert!(result.is_err(), "insert with unknown user must fail");
    }

    #[tokio::test]
    async fn reopen_keeps_schema_and_data() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("reopen.db");
        let path = db_path.to_str().unwrap();

        let db = Database::open(path, true).await.unwrap();
        db.connection()
            .call(|conn| -> Result<(), rusqlite::Error> {
                conn.execute(
                    "INSERT INTO users (display_name, email) VALUES ('A', 'a@example.com')",
                    [],
                )?;
                Ok(())
            })
            .await
            .unwrap();
        db.close().await.unwrap();

        let db = Database::open(path, true).await.unwrap();
        let count: i64 = db
            .connection()
            .call(|conn| -> Result<i64, rusqlite::Error> {
                conn.query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))
            })
            .await
            .unwrap();
        assert_eq!(count, 1);
    }
}
