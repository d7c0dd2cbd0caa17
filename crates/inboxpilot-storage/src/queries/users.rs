// SPDX-FileCopyrightText: 2026 InboxPilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! User lookup and creation.

use inboxpilot_core::InboxError;
use inboxpilot_core::types::{NewUser, User, now_timestamp};
use rusqlite::{OptionalExtension, params};

use crate::database::Database;

const SELECT_USER: &str = "SELECT id, display_name, email, created_at FROM users";

fn map_user(row: &rusqlite::Row<'_>) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(0)?,
        display_name: row.get(1)?,
        email: row.get(2)?,
        created_at: row.get(3)?,
    })
}

/// Return the id of the user with this email, inserting it first if absent.
///
/// An existing user keeps its original display name.
pub async fn ensure_user(db: &Database, user: &NewUser) -> Result<i64, InboxError> {
    let user = user.clone();
    db.connection()
        .call(move |conn| -> Result<i64, rusqlite::Error> {
            conn.execute(
                "INSERT INTO users (display_name, email, created_at) VALUES (?1, ?2, ?3)
                 ON CONFLICT(email) DO NOTHING",
                params![user.display_name, user.email, now_timestamp()],
            )?;
            conn.query_row(
                "SELECT id FROM users WHERE email = ?1",
                params![user.email],
                |row| row.get(0),
            )
        })
        .await
        .map_err(crate::database::map_tr_err)
}

pub async fn get_user(db: &Database, id: i64) -> Result<Option<User>, InboxError> {
    db.connection()
        .call(move |conn| -> Result<Option<User>, rusqlite::Error> {
            conn.query_row(&format!("{SELECT_USER} WHERE id = ?1"), params![id], map_user)
                .optional()
        })
        .await
        .map_err(crate::database::map_tr_err)
}

pub async fn find_user_by_email(db: &Database, email: &str) -> Result<Option<User>, InboxError> {
    let email = email.to_string();
    db.connection()
        .call(move |conn| -> Result<Option<User>, rusqlite::Error> {
            conn.query_row(
                &format!("{SELECT_USER} WHERE email = ?1"),
                params![email],
                map_user,
            )
            .optional()
        })
        .await
        .map_err(crate::database::map_tr_err)
}

pub async fn list_users(db: &Database) -> Result<Vec<User>, InboxError> {
    db.connection()
        .call(|conn| -> Result<Vec<User>, rusqlite::Error> {
            let mut stmt = conn.prepare(&format!("{SELECT_USER} ORDER BY id ASC"))?;
            let rows = stmt.query_map([], map_user)?;
            rows.collect()
        })
        .await
        .map_err(crate::database::map_tr_err)
}
