// SPDX-FileCopyrightText: 2026 InboxPilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Append-only notes on messages and meetings.

use inboxpilot_core::types::{NewNote, Note, now_timestamp};
use inboxpilot_core::{InboxError, ParentType};
use rusqlite::params;

use crate::database::Database;

pub async fn add_note(db: &Database, note: &NewNote, user_id: i64) -> Result<i64, InboxError> {
    let note = note.clone();
    db.connection()
        .call(move |conn| -> Result<i64, rusqlite::Error> {
            conn.execute(
                "INSERT INTO notes (user_id, parent_type, parent_id, content, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    user_id,
                    note.parent_type.to_string(),
                    note.parent_id,
                    note.content,
                    now_timestamp(),
                ],
            )?;
            Ok(conn.last_insert_rowid())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

pub async fn list_notes(
    db: &Database,
    parent_type: ParentType,
    parent_id: i64,
    user_id: i64,
) -> Result<Vec<Note>, InboxError> {
    let parent = parent_type.to_string();
    db.connection()
        .call(move |conn| -> Result<Vec<Note>, rusqlite::Error> {
            let mut stmt = conn.prepare(
                "SELECT id, parent_type, parent_id, content, created_at FROM notes
                 WHERE user_id = ?1 AND parent_type = ?2 AND parent_id = ?3
                 ORDER BY id ASC",
            )?;
            let rows = stmt.query_map(params![user_id, parent, parent_id], |row| {
                Ok(Note {
                    id: row.get(0)?,
                    parent_type: super::parent_type_at(row, 1)?,
                    parent_id: row.get(2)?,
                    content: row.get(3)?,
                    created_at: row.get(4)?,
                })
            })?;
            rows.collect()
        })
        .await
        .map_err(crate::database::map_tr_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::queries::test_support::db_with_user;

    #[tokio::test]
    async fn notes_are_listed_oldest_first_per_parent() {
        let (db, user) = db_with_user("a@example.com").await;
        for content in ["first", "second"] {
            add_note(
                &db,
                &NewNote {
                    parent_type: ParentType::Meeting,
                    parent_id: 3,
                    content: content.into(),
                },
                user,
            )
            .await
            .unwrap();
        }
        add_note(
            &db,
            &NewNote {
                parent_type: ParentType::Message,
                parent_id: 3,
                content: "elsewhere".into(),
            },
            user,
        )
        .await
        .unwrap();

        let notes = list_notes(&db, ParentType::Meeting, 3, user).await.unwrap();
        let contents: Vec<_> = notes.iter().map(|n| n.content.as_str()).collect();
        assert_eq!(contents, vec!["first", "second"]);
        assert_eq!(notes[0].parent_type, ParentType::Meeting);
    }
}
