// SPDX-FileCopyrightText: 2026 InboxPilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Message ingestion, lookup, listing and search.

use inboxpilot_core::InboxError;
use inboxpilot_core::types::{Message, NewMessage};
use rusqlite::{OptionalExtension, params};

use crate::database::Database;

const SELECT_MESSAGE: &str = "SELECT id, user_id, provider_message_id, subject, sender, recipients,
        timestamp, snippet, body FROM messages";

fn map_message(row: &rusqlite::Row<'_>) -> rusqlite::Result<Message> {
    Ok(Message {
        id: row.get(0)?,
        user_id: row.get(1)?,
        provider_message_id: row.get(2)?,
        subject: row.get(3)?,
        sender: row.get(4)?,
        recipients: row.get(5)?,
        timestamp: row.get(6)?,
        snippet: row.get(7)?,
        body: row.get(8)?,
    })
}

/// Insert messages in one transaction, skipping provider ids already stored.
///
/// Returns one id per input, in input order. A repeated provider id (in the
/// batch or already in the database) yields the existing row's id, and the
/// stored fields are left untouched.
pub async fn save_messages(
    db: &Database,
    messages: &[NewMessage],
    user_id: i64,
) -> Result<Vec<i64>, InboxError> {
    let messages = messages.to_vec();
    db.connection()
        .call(move |conn| -> Result<Vec<i64>, rusqlite::Error> {
            let tx = conn.transaction()?;
            let mut ids = Vec::with_capacity(messages.len());
            {
                let mut insert = tx.prepare_cached(
                    "INSERT INTO messages (user_id, provider_message_id, subject, sender,
                        recipients, timestamp, snippet, body)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
                     ON CONFLICT(user_id, provider_message_id) DO NOTHING",
                )?;
                let mut lookup = tx.prepare_cached(
                    "SELECT id FROM messages WHERE user_id = ?1 AND provider_message_id = ?2",
                )?;
                for m in &messages {
                    insert.execute(params![
                        user_id,
                        m.provider_message_id,
                        m.subject,
                        m.sender,
                        m.recipients,
                        m.timestamp,
                        m.snippet,
                        m.body,
                    ])?;
                    let id: i64 =
                        lookup.query_row(params![user_id, m.provider_message_id], |row| row.get(0))?;
                    ids.push(id);
                }
            }
            tx.commit()?;
            Ok(ids)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

pub async fn get_message(
    db: &Database,
    id: i64,
    user_id: i64,
) -> Result<Option<Message>, InboxError> {
    db.connection()
        .call(move |conn| -> Result<Option<Message>, rusqlite::Error> {
            conn.query_row(
                &format!("{SELECT_MESSAGE} WHERE id = ?1 AND user_id = ?2"),
                params![id, user_id],
                map_message,
            )
            .optional()
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Most recent first; ties broken by newest insert.
pub async fn list_messages(
    db: &Database,
    limit: u32,
    user_id: i64,
) -> Result<Vec<Message>, InboxError> {
    db.connection()
        .call(move |conn| -> Result<Vec<Message>, rusqlite::Error> {
            let mut stmt = conn.prepare(&format!(
                "{SELECT_MESSAGE} WHERE user_id = ?1 ORDER BY timestamp DESC, id DESC LIMIT ?2"
            ))?;
            let rows = stmt.query_map(params![user_id, limit], map_message)?;
            rows.collect()
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Case-insensitive (ASCII) substring match over subject, body and snippet.
pub async fn search_messages(
    db: &Database,
    query: &str,
    limit: u32,
    user_id: i64,
) -> Result<Vec<Message>, InboxError> {
    let pattern = super::like_pattern(query);
    db.connection()
        .call(move |conn| -> Result<Vec<Message>, rusqlite::Error> {
            let mut stmt = conn.prepare(&format!(
                "{SELECT_MESSAGE} WHERE user_id = ?1
                   AND (subject LIKE ?2 ESCAPE '\\'
                        OR body LIKE ?2 ESCAPE '\\'
                        OR snippet LIKE ?2 ESCAPE '\\')
                 ORDER BY timestamp DESC, id DESC LIMIT ?3"
            ))?;
            let rows = stmt.query_map(params![user_id, pattern, limit], map_message)?;
            rows.collect()
        })
        .await
        .map_err(crate::database::map_tr_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::queries::test_support::db_with_user;

    fn message(provider_id: &str, subject: &str, timestamp: &str) -> NewMessage {
        NewMessage {
            provider_message_id: provider_id.into(),
            subject: subject.into(),
            sender: "sender@example.com".into(),
            recipients: "me@example.com".into(),
            timestamp: timestamp.into(),
            snippet: format!("{subject} snippet"),
            body: format!("{subject} body"),
        }
    }

    #[tokio::test]
    async fn save_returns_ids_in_input_order() {
        let (db, user) = db_with_user("a@example.com").await;
        let ids = save_messages(
            &db,
            &[
                message("p1", "One", "2026-01-01T00:00:00Z"),
                message("p2", "Two", "2026-01-02T00:00:00Z"),
            ],
            user,
        )
        .await
        .unwrap();
        assert_eq!(ids.len(), 2);
        assert_ne!(ids[0], ids[1]);

        let first = get_message(&db, ids[0], user).await.unwrap().unwrap();
        assert_eq!(first.provider_message_id, "p1");
    }

    #[tokio::test]
    async fn reingesting_the_same_provider_id_is_a_no_op() {
        let (db, user) = db_with_user("a@example.com").await;
        let first = save_messages(&db, &[message("p1", "Original", "2026-01-01T00:00:00Z")], user)
            .await
            .unwrap();
        let second = save_messages(&db, &[message("p1", "Changed", "2026-02-01T00:00:00Z")], user)
            .await
            .unwrap();
        assert_eq!(first, second);

        let all = list_messages(&db, 50, user).await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].subject, "Original");
    }

    #[tokio::test]
    async fn duplicate_within_one_batch_shares_an_id() {
        let (db, user) = db_with_user("a@example.com").await;
        let ids = save_messages(
            &db,
            &[
                message("p1", "One", "2026-01-01T00:00:00Z"),
                message("p1", "One again", "2026-01-01T00:00:00Z"),
            ],
            user,
        )
        .await
        .unwrap();
        assert_eq!(ids[0], ids[1]);
    }

    #[tokio::test]
    async fn list_is_most_recent_first_and_limited() {
        let (db, user) = db_with_user("a@example.com").await;
        save_messages(
            &db,
            &[
                message("old", "Old", "2026-01-01T00:00:00Z"),
                message("new", "New", "2026-03-01T00:00:00Z"),
                message("mid", "Mid", "2026-02-01T00:00:00Z"),
            ],
            user,
        )
        .await
        .unwrap();

        let listed = list_messages(&db, 2, user).await.unwrap();
        let subjects: Vec<_> = listed.iter().map(|m| m.subject.as_str()).collect();
        assert_eq!(subjects, vec!["New", "Mid"]);
    }

    #[tokio::test]
    async fn search_matches_subject_body_and_snippet() {
        let (db, user) = db_with_user("a@example.com").await;
        let mut by_body = message("p2", "Plain", "2026-01-02T00:00:00Z");
        by_body.body = "the INVOICE is attached".into();
        save_messages(
            &db,
            &[message("p1", "Invoice March", "2026-01-01T00:00:00Z"), by_body],
            user,
        )
        .await
        .unwrap();

        let hits = search_messages(&db, "invoice", 10, user).await.unwrap();
        assert_eq!(hits.len(), 2);
        assert!(search_messages(&db, "nothing-like-this", 10, user)
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn messages_are_scoped_to_their_user() {
        let (db, alice) = db_with_user("alice@example.com").await;
        let bob = crate::queries::users::ensure_user(
            &db,
            &inboxpilot_core::types::NewUser {
                display_name: "Bob".into(),
                email: "bob@example.com".into(),
            },
        )
        .await
        .unwrap();

        let ids = save_messages(&db, &[message("p1", "Private", "2026-01-01T00:00:00Z")], alice)
            .await
            .unwrap();
        // The same provider id under another user is a distinct row.
        let bob_ids = save_messages(&db, &[message("p1", "Bob's", "2026-01-01T00:00:00Z")], bob)
            .await
            .unwrap();
        assert_ne!(ids[0], bob_ids[0]);

        assert!(get_message(&db, ids[0], bob).await.unwrap().is_none());
        assert_eq!(list_messages(&db, 10, bob).await.unwrap().len(), 1);
        assert!(search_messages(&db, "Private", 10, bob).await.unwrap().is_empty());
    }
}
