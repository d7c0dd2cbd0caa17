// SPDX-FileCopyrightText: 2026 InboxPilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-user API key hashes.

use inboxpilot_core::InboxError;
use inboxpilot_core::types::{ApiKey, now_timestamp};
use rusqlite::{OptionalExtension, params};

use crate::database::Database;

pub async fn create_api_key(
    db: &Database,
    user_id: i64,
    label: Option<&str>,
    token_hash: &str,
) -> Result<i64, InboxError> {
    let label = label.map(str::to_string);
    let token_hash = token_hash.to_string();
    db.connection()
        .call(move |conn| -> Result<i64, rusqlite::Error> {
            conn.execute(
                "INSERT INTO api_keys (user_id, label, token_hash, created_at)
                 VALUES (?1, ?2, ?3, ?4)",
                params![user_id, label, token_hash, now_timestamp()],
            )?;
            Ok(conn.last_insert_rowid())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

pub async fn resolve_api_key(db: &Database, token_hash: &str) -> Result<Option<i64>, InboxError> {
    let token_hash = token_hash.to_string();
    db.connection()
        .call(move |conn| -> Result<Option<i64>, rusqlite::Error> {
            conn.query_row(
                "SELECT user_id FROM api_keys WHERE token_hash = ?1",
                params![token_hash],
                |row| row.get(0),
            )
            .optional()
        })
        .await
        .map_err(crate::database::map_tr_err)
}

pub async fn list_api_keys(db: &Database, user_id: i64) -> Result<Vec<ApiKey>, InboxError> {
    db.connection()
        .call(move |conn| -> Result<Vec<ApiKey>, rusqlite::Error> {
            let mut stmt = conn.prepare(
                "SELECT id, user_id, label, token_hash, created_at FROM api_keys
                 WHERE user_id = ?1 ORDER BY id ASC",
            )?;
            let rows = stmt.query_map(params![user_id], |row| {
                Ok(ApiKey {
                    id: row.get(0)?,
                    user_id: row.get(1)?,
                    label: row.get(2)?,
                    token_hash: row.get(3)?,
                    created_at: row.get(4)?,
                })
            })?;
            rows.collect()
        })
        .await
        .map_err(crate::database::map_tr_err)
}

pub async fn delete_api_key(db: &Database, user_id: i64, key_id: i64) -> Result<bool, InboxError> {
    db.connection()
        .call(move |conn| -> Result<bool, rusqlite::Error> {
            let deleted = conn.execute(
                "DELETE FROM api_keys WHERE id = ?1 AND user_id = ?2",
                params![key_id, user_id],
            )?;
            Ok(deleted > 0)
        })
        .await
        .map_err(crate::database::map_tr_err)
}
