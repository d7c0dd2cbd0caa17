// SPDX-FileCopyrightText: 2026 InboxPilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-user record counts.

use inboxpilot_core::InboxError;
use inboxpilot_core::types::StatsSnapshot;
use rusqlite::params;

use crate::database::Database;

pub async fn stats(db: &Database, user_id: i64) -> Result<StatsSnapshot, InboxError> {
    db.connection()
        .call(move |conn| -> Result<StatsSnapshot, rusqlite::Error> {
            conn.query_row(
                "SELECT
                    (SELECT COUNT(*) FROM messages WHERE user_id = ?1),
                    (SELECT COUNT(*) FROM meetings WHERE user_id = ?1),
                    (SELECT COUNT(*) FROM categories WHERE user_id = ?1),
                    (SELECT COUNT(*) FROM tasks WHERE user_id = ?1),
                    (SELECT COUNT(*) FROM notes WHERE user_id = ?1)",
                params![user_id],
                |row| {
                    Ok(StatsSnapshot {
                        messages: row.get(0)?,
                        meetings: row.get(1)?,
                        categories: row.get(2)?,
                        tasks: row.get(3)?,
                        notes: row.get(4)?,
                    })
                },
            )
        })
        .await
        .map_err(crate::database::map_tr_err)
}
