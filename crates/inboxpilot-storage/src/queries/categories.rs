// SPDX-FileCopyrightText: 2026 InboxPilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Category CRUD and message assignments.

use inboxpilot_core::InboxError;
use inboxpilot_core::types::{Category, NewCategory};
use rusqlite::{OptionalExtension, params};

use crate::database::Database;

fn map_category(row: &rusqlite::Row<'_>) -> rusqlite::Result<Category> {
    Ok(Category {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
    })
}

/// Create a category; an existing name returns the existing id unchanged.
pub async fn create_category(
    db: &Database,
    category: &NewCategory,
    user_id: i64,
) -> Result<i64, InboxError> {
    let category = category.clone();
    db.connection()
        .call(move |conn| -> Result<i64, rusqlite::Error> {
            conn.execute(
                "INSERT INTO categories (user_id, name, description) VALUES (?1, ?2, ?3)
                 ON CONFLICT(user_id, name) DO NOTHING",
                params![user_id, category.name, category.description],
            )?;
            conn.query_row(
                "SELECT id FROM categories WHERE user_id = ?1 AND name = ?2",
                params![user_id, category.name],
                |row| row.get(0),
            )
        })
        .await
        .map_err(crate::database::map_tr_err)
}

pub async fn get_category(
    db: &Database,
    id: i64,
    user_id: i64,
) -> Result<Option<Category>, InboxError> {
    db.connection()
        .call(move |conn| -> Result<Option<Category>, rusqlite::Error> {
            conn.query_row(
                "SELECT id, name, description FROM categories WHERE id = ?1 AND user_id = ?2",
                params![id, user_id],
                map_category,
            )
            .optional()
        })
        .await
        .map_err(crate::database::map_tr_err)
}

pub async fn list_categories(db: &Database, user_id: i64) -> Result<Vec<Category>, InboxError> {
    db.connection()
        .call(move |conn| -> Result<Vec<Category>, rusqlite::Error> {
            let mut stmt = conn.prepare(
                "SELECT id, name, description FROM categories WHERE user_id = ?1
                 ORDER BY name ASC",
            )?;
            let rows = stmt.query_map(params![user_id], map_category)?;
            rows.collect()
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Link a message to a category. Repeating a link changes nothing.
pub async fn assign_category(
    db: &Database,
    message_id: i64,
    category_id: i64,
) -> Result<(), InboxError> {
    db.connection()
        .call(move |conn| -> Result<(), rusqlite::Error> {
            conn.execute(
                "INSERT OR IGNORE INTO category_assignments (message_id, category_id)
                 VALUES (?1, ?2)",
                params![message_id, category_id],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

pub async fn list_message_categories(
    db: &Database,
    message_id: i64,
    user_id: i64,
) -> Result<Vec<Category>, InboxError> {
    db.connection()
        .call(move |conn| -> Result<Vec<Category>, rusqlite::Error> {
            let mut stmt = conn.prepare(
                "SELECT c.id, c.name, c.description
                 FROM category_assignments a
                 JOIN categories c ON c.id = a.category_id
                 WHERE a.message_id = ?1 AND c.user_id = ?2
                 ORDER BY c.name ASC",
            )?;
            let rows = stmt.query_map(params![message_id, user_id], map_category)?;
            rows.collect()
        })
        .await
        .map_err(crate::database::map_tr_err)
}
