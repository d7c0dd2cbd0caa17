// SPDX-FileCopyrightText: 2026 InboxPilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Linked external sources.

use inboxpilot_core::InboxError;
use inboxpilot_core::types::{Connection, NewConnection, now_timestamp};
use rusqlite::params;

use crate::database::Database;

pub async fn add_connection(
    db: &Database,
    connection: &NewConnection,
    user_id: i64,
) -> Result<i64, InboxError> {
    let connection = connection.clone();
    db.connection()
        .call(move |conn| -> Result<i64, rusqlite::Error> {
            conn.execute(
                "INSERT INTO connections (user_id, provider_type, provider_name, status,
                    details, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    user_id,
                    connection.provider_type,
                    connection.provider_name,
                    connection.status,
                    connection.details,
                    now_timestamp(),
                ],
            )?;
            Ok(conn.last_insert_rowid())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

pub async fn list_connections(db: &Database, user_id: i64) -> Result<Vec<Connection>, InboxError> {
    db.connection()
        .call(move |conn| -> Result<Vec<Connection>, rusqlite::Error> {
            let mut stmt = conn.prepare(
                "SELECT id, provider_type, provider_name, status, details, created_at
                 FROM connections WHERE user_id = ?1 ORDER BY id ASC",
            )?;
            let rows = stmt.query_map(params![user_id], |row| {
                Ok(Connection {
                    id: row.get(0)?,
                    provider_type: row.get(1)?,
                    provider_name: row.get(2)?,
                    status: row.get(3)?,
                    details: row.get(4)?,
                    created_at: row.get(5)?,
                })
            })?;
            rows.collect()
        })
        .await
        .map_err(crate::database::map_tr_err)
}
