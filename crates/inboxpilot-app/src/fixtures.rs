// SPDX-FileCopyrightText: 2026 InboxPilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! JSON fixture sources for offline ingestion.
//!
//! A message fixture is a JSON array of objects with `provider_message_id`,
//! `subject`, `sender`, `recipients`, `timestamp`, `snippet` and `body`.
//! A meeting fixture is an array of objects with `provider_event_id`,
//! `title`, `participants`, `start_time`, `end_time` and an optional
//! `transcript_ref`. Timestamps are ISO 8601, with or without an offset.

use std::path::Path;

use inboxpilot_core::InboxError;
use inboxpilot_core::types::{NewMeeting, NewMessage};
use serde::de::DeserializeOwned;

/// Read up to `limit` messages from a fixture file, in file order.
pub async fn load_message_fixture(path: &Path, limit: usize) -> Result<Vec<NewMessage>, InboxError> {
    let mut messages: Vec<NewMessage> = read_array(path).await?;
    messages.truncate(limit);
    for message in &messages {
        check_timestamp(&message.timestamp, "timestamp", &message.provider_message_id)?;
    }
    Ok(messages)
}

/// Read up to `limit` meetings from a fixture file, in file order.
pub async fn load_meeting_fixture(path: &Path, limit: usize) -> Result<Vec<NewMeeting>, InboxError> {
    let mut meetings: Vec<NewMeeting> = read_array(path).await?;
    meetings.truncate(limit);
    for meeting in &meetings {
        check_timestamp(&meeting.start_time, "start_time", &meeting.provider_event_id)?;
        check_timestamp(&meeting.end_time, "end_time", &meeting.provider_event_id)?;
    }
    Ok(meetings)
}

async fn read_array<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, InboxError> {
    let raw = match tokio::fs::read_to_string(path).await {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(InboxError::InvalidInput(format!(
                "fixture not found: {}",
                path.display()
            )));
        }
        Err(e) => {
            return Err(InboxError::Internal(format!(
                "failed to read fixture {}: {e}",
                path.display()
            )));
        }
    };
    serde_json::from_str(&raw).map_err(|e| {
        InboxError::InvalidInput(format!("malformed fixture {}: {e}", path.display()))
    })
}

fn check_timestamp(value: &str, field: &str, id: &str) -> Result<(), InboxError> {
    let parses = chrono::DateTime::parse_from_rfc3339(value).is_ok()
        || chrono::NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f").is_ok()
        || chrono::NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S").is_ok();
    if parses {
        Ok(())
    } else {
        Err(InboxError::InvalidInput(format!(
            "record `{id}` has an invalid {field}: `{value}`"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(dir: &tempfile::TempDir, name: &str, body: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, body).unwrap();
        path
    }

    const MESSAGES: &str = r#"[
        {"provider_message_id": "a", "subject": "One", "sender": "x@example.com",
         "recipients": "me@example.com", "timestamp": "2026-02-01T09:00:00",
         "snippet": "s", "body": "b"},
        {"provider_message_id": "b", "subject": "Two", "sender": "y@example.com",
         "recipients": "me@example.com", "timestamp": "2026-02-02T09:00:00+02:00",
         "snippet": "s", "body": "b"}
    ]"#;

    #[tokio::test]
    async fn loads_messages_in_file_order_with_limit() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "m.json", MESSAGES);

        let all = load_message_fixture(&path, 10).await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].provider_message_id, "a");

        let one = load_message_fixture(&path, 1).await.unwrap();
        assert_eq!(one.len(), 1);
        assert_eq!(one[0].subject, "One");
    }

    #[tokio::test]
    async fn meetings_transcript_ref_is_optional() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            &dir,
            "c.json",
            r#"[{"provider_event_id": "e1", "title": "Sync", "participants": "a, b",
                 "start_time": "2026-02-01T09:00:00", "end_time": "2026-02-01T09:30:00"}]"#,
        );
        let meetings = load_meeting_fixture(&path, 5).await.unwrap();
        assert_eq!(meetings[0].transcript_ref, None);
    }

    #[tokio::test]
    async fn missing_file_is_invalid_input() {
        let err = load_message_fixture(Path::new("/nonexistent/fixture.json"), 5)
            .await
            .unwrap_err();
        assert!(matches!(err, InboxError::InvalidInput(ref m) if m.contains("not found")));
    }

    #[tokio::test]
    async fn bad_timestamp_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            &dir,
            "m.json",
            r#"[{"provider_message_id": "a", "subject": "", "sender": "", "recipients": "",
                 "timestamp": "yesterday", "snippet": "", "body": ""}]"#,
        );
        let err = load_message_fixture(&path, 5).await.unwrap_err();
        assert!(err.to_string().contains("yesterday"));
    }

    #[tokio::test]
    async fn missing_field_is_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "m.json", r#"[{"subject": "no id"}]"#);
        let err = load_message_fixture(&path, 5).await.unwrap_err();
        assert!(err.to_string().contains("malformed"));
    }
}
