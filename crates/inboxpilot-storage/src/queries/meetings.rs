// SPDX-FileCopyrightText: 2026 InboxPilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Meeting ingestion, search and transcripts.

use inboxpilot_core::InboxError;
use inboxpilot_core::types::{Meeting, NewMeeting, Transcript, now_timestamp};
use rusqlite::{OptionalExtension, params};

use crate::database::Database;

const SELECT_MEETING: &str = "SELECT id, user_id, provider_event_id, title, participants,
        start_time, end_time, transcript_ref FROM meetings";

fn map_meeting(row: &rusqlite::Row<'_>) -> rusqlite::Result<Meeting> {
    Ok(Meeting {
        id: row.get(0)?,
        user_id: row.get(1)?,
        provider_event_id: row.get(2)?,
        title: row.get(3)?,
        participants: row.get(4)?,
        start_time: row.get(5)?,
        end_time: row.get(6)?,
        transcript_ref: row.get(7)?,
    })
}

/// Insert meetings in one transaction; known provider event ids are skipped.
pub async fn save_meetings(
    db: &Database,
    meetings: &[NewMeeting],
    user_id: i64,
) -> Result<Vec<i64>, InboxError> {
    let meetings = meetings.to_vec();
    db.connection()
        .call(move |conn| -> Result<Vec<i64>, rusqlite::Error> {
            let tx = conn.transaction()?;
            let mut ids = Vec::with_capacity(meetings.len());
            {
                let mut insert = tx.prepare_cached(
                    "INSERT INTO meetings (user_id, provider_event_id, title, participants,
                        start_time, end_time, transcript_ref)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
                     ON CONFLICT(user_id, provider_event_id) DO NOTHING",
                )?;
                let mut lookup = tx.prepare_cached(
                    "SELECT id FROM meetings WHERE user_id = ?1 AND provider_event_id = ?2",
                )?;
                for m in &meetings {
                    insert.execute(params![
                        user_id,
                        m.provider_event_id,
                        m.title,
                        m.participants,
                        m.start_time,
                        m.end_time,
                        m.transcript_ref,
                    ])?;
                    let id: i64 =
                        lookup.query_row(params![user_id, m.provider_event_id], |row| row.get(0))?;
                    ids.push(id);
                }
            }
            tx.commit()?;
            Ok(ids)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

pub async fn get_meeting(
    db: &Database,
    id: i64,
    user_id: i64,
) -> Result<Option<Meeting>, InboxError> {
    db.connection()
        .call(move |conn| -> Result<Option<Meeting>, rusqlite::Error> {
            conn.query_row(
                &format!("{SELECT_MEETING} WHERE id = ?1 AND user_id = ?2"),
                params![id, user_id],
                map_meeting,
            )
            .optional()
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Latest start time first.
pub async fn list_meetings(
    db: &Database,
    limit: u32,
    user_id: i64,
) -> Result<Vec<Meeting>, InboxError> {
    db.connection()
        .call(move |conn| -> Result<Vec<Meeting>, rusqlite::Error> {
            let mut stmt = conn.prepare(&format!(
                "{SELECT_MEETING} WHERE user_id = ?1 ORDER BY start_time DESC, id DESC LIMIT ?2"
            ))?;
            let rows = stmt.query_map(params![user_id, limit], map_meeting)?;
            rows.collect()
        })
        .await
        .map_err(crate::database::map_tr_err)
}

pub async fn search_meetings(
    db: &Database,
    query: &str,
    limit: u32,
    user_id: i64,
) -> Result<Vec<Meeting>, InboxError> {
    let pattern = super::like_pattern(query);
    db.connection()
        .call(move |conn| -> Result<Vec<Meeting>, rusqlite::Error> {
            let mut stmt = conn.prepare(&format!(
                "{SELECT_MEETING} WHERE user_id = ?1
                   AND (title LIKE ?2 ESCAPE '\\' OR participants LIKE ?2 ESCAPE '\\')
                 ORDER BY start_time DESC, id DESC LIMIT ?3"
            ))?;
            let rows = stmt.query_map(params![user_id, pattern, limit], map_meeting)?;
            rows.collect()
        })
        .await
        .map_err(crate::database::map_tr_err)
}

pub async fn add_transcript(
    db: &Database,
    meeting_id: i64,
    content: &str,
) -> Result<i64, InboxError> {
    let content = content.to_string();
    db.connection()
        .call(move |conn| -> Result<i64, rusqlite::Error> {
            conn.execute(
                "INSERT INTO transcripts (meeting_id, content, created_at) VALUES (?1, ?2, ?3)",
                params![meeting_id, content, now_timestamp()],
            )?;
            Ok(conn.last_insert_rowid())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// The newest transcript of a meeting, if the meeting belongs to `user_id`.
pub async fn get_meeting_transcript(
    db: &Database,
    meeting_id: i64,
    user_id: i64,
) -> Result<Option<Transcript>, InboxError> {
    db.connection()
        .call(move |conn| -> Result<Option<Transcript>, rusqlite::Error> {
            conn.query_row(
                "SELECT t.id, t.meeting_id, t.content, t.created_at
                 FROM transcripts t
                 JOIN meetings m ON m.id = t.meeting_id
                 WHERE t.meeting_id = ?1 AND m.user_id = ?2
                 ORDER BY t.id DESC LIMIT 1",
                params![meeting_id, user_id],
                |row| {
                    Ok(Transcript {
                        id: row.get(0)?,
                        meeting_id: row.get(1)?,
                        content: row.get(2)?,
                        created_at: row.get(3)?,
                    })
                },
            )
            .optional()
        })
        .await
        .map_err(crate::database::map_tr_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::queries::test_support::db_with_user;

    fn meeting(event_id: &str, title: &str, start: &str) -> NewMeeting {
        NewMeeting {
            provider_event_id: event_id.into(),
            title: title.into(),
            participants: "alice@example.com, bob@example.com".into(),
            start_time: start.into(),
            end_time: start.into(),
            transcript_ref: None,
        }
    }

    #[tokio::test]
    async fn save_is_idempotent_on_event_id() {
        let (db, user) = db_with_user("a@example.com").await;
        let first = save_meetings(&db, &[meeting("e1", "Standup", "2026-01-01T09:00:00Z")], user)
            .await
            .unwrap();
        let second = save_meetings(&db, &[meeting("e1", "Renamed", "2026-01-01T09:00:00Z")], user)
            .await
            .unwrap();
        assert_eq!(first, second);
        assert_eq!(list_meetings(&db, 10, user).await.unwrap()[0].title, "Standup");
    }

    #[tokio::test]
    async fn search_matches_title_or_participants() {
        let (db, user) = db_with_user("a@example.com").await;
        save_meetings(
            &db,
            &[
                meeting("e1", "Quarterly planning", "2026-01-01T09:00:00Z"),
                meeting("e2", "Design review", "2026-01-02T09:00:00Z"),
            ],
            user,
        )
        .await
        .unwrap();

        assert_eq!(search_meetings(&db, "planning", 10, user).await.unwrap().len(), 1);
        assert_eq!(search_meetings(&db, "bob@", 10, user).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn latest_transcript_wins() {
        let (db, user) = db_with_user("a@example.com").await;
        let ids = save_meetings(&db, &[meeting("e1", "Standup", "2026-01-01T09:00:00Z")], user)
            .await
            .unwrap();
        add_transcript(&db, ids[0], "first draft").await.unwrap();
        add_transcript(&db, ids[0], "final text").await.unwrap();

        let transcript = get_meeting_transcript(&db, ids[0], user)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(transcript.content, "final text");
    }

    #[tokio::test]
    async fn transcript_is_hidden_from_other_users() {
        let (db, user) = db_with_user("a@example.com").await;
        let ids = save_meetings(&db, &[meeting("e1", "Standup", "2026-01-01T09:00:00Z")], user)
            .await
            .unwrap();
        add_transcript(&db, ids[0], "secret").await.unwrap();

        assert!(get_meeting_transcript(&db, ids[0], user + 1)
            .await
            .unwrap()
            .is_none());
        assert!(get_meeting(&db, ids[0], user + 1).await.unwrap().is_none());
    }
}
