// SPDX-FileCopyrightText: 2026 InboxPilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! AI request/response audit trail. Rows are append-only.

use inboxpilot_core::InboxError;
use inboxpilot_core::types::{AiRequest, AiResponse, LoggedAiRequest, LoggedAiResponse};
use rusqlite::params;

use crate::database::Database;

/// Record a request before it is dispatched. Returns the request id.
pub async fn log_ai_request(
    db: &Database,
    request: &AiRequest,
    user_id: i64,
) -> Result<i64, InboxError> {
    let request = request.clone();
    db.connection()
        .call(move |conn| -> Result<i64, rusqlite::Error> {
            conn.execute(
                "INSERT INTO ai_requests (user_id, provider, model, prompt, purpose, timestamp)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    user_id,
                    request.provider,
                    request.model,
                    request.prompt,
                    request.purpose,
                    request.timestamp,
                ],
            )?;
            Ok(conn.last_insert_rowid())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

pub async fn log_ai_response(db: &Database, response: &AiResponse) -> Result<i64, InboxError> {
    let response = response.clone();
    db.connection()
        .call(move |conn| -> Result<i64, rusqlite::Error> {
            conn.execute(
                "INSERT INTO ai_responses (request_id, response_text, latency_ms, token_estimate)
                 VALUES (?1, ?2, ?3, ?4)",
                params![
                    response.request_id,
                    response.response_text,
                    response.latency_ms,
                    response.token_estimate,
                ],
            )?;
            Ok(conn.last_insert_rowid())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

pub async fn list_ai_requests(
    db: &Database,
    limit: u32,
    user_id: i64,
) -> Result<Vec<LoggedAiRequest>, InboxError> {
    db.connection()
        .call(move |conn| -> Result<Vec<LoggedAiRequest>, rusqlite::Error> {
            let mut stmt = conn.prepare(
                "SELECT id, provider, model, prompt, purpose, timestamp FROM ai_requests
                 WHERE user_id = ?1 ORDER BY id DESC LIMIT ?2",
            )?;
            let rows = stmt.query_map(params![user_id, limit], |row| {
                Ok(LoggedAiRequest {
                    id: row.get(0)?,
                    provider: row.get(1)?,
                    model: row.get(2)?,
                    prompt: row.get(3)?,
                    purpose: row.get(4)?,
                    timestamp: row.get(5)?,
                })
            })?;
            rows.collect()
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Responses whose request belongs to `user_id`, newest first.
pub async fn list_ai_responses(
    db: &Database,
    limit: u32,
    user_id: i64,
) -> Result<Vec<LoggedAiResponse>, InboxError> {
    db.connection()
        .call(move |conn| -> Result<Vec<LoggedAiResponse>, rusqlite::Error> {
            let mut stmt = conn.prepare(
                "SELECT s.id, s.request_id, s.response_text, s.latency_ms, s.token_estimate
                 FROM ai_responses s
                 JOIN ai_requests r ON r.id = s.request_id
                 WHERE r.user_id = ?1
                 ORDER BY s.id DESC LIMIT ?2",
            )?;
            let rows = stmt.query_map(params![user_id, limit], |row| {
                Ok(LoggedAiResponse {
                    id: row.get(0)?,
                    request_id: row.get(1)?,
                    response_text: row.get(2)?,
                    latency_ms: row.get(3)?,
                    token_estimate: row.get(4)?,
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
    async fn request_and_response_are_linked() {
        let (db, user) = db_with_user("a@example.com").await;
        let request = AiRequest::new("mock", "mock", "Summarize this", "summarize_message");
        let request_id = log_ai_request(&db, &request, user).await.unwrap();
        let response_id = log_ai_response(
            &db,
            &AiResponse {
                request_id,
                response_text: "A summary".into(),
                latency_ms: 12,
                token_estimate: 2,
            },
        )
        .await
        .unwrap();

        let requests = list_ai_requests(&db, 10, user).await.unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].prompt, "Summarize this");
        assert_eq!(requests[0].purpose, "summarize_message");

        let responses = list_ai_responses(&db, 10, user).await.unwrap();
        assert_eq!(responses[0].id, response_id);
        assert_eq!(responses[0].request_id, request_id);
        assert_eq!(responses[0].latency_ms, 12);
    }

    #[tokio::test]
    async fn requests_are_newest_first_and_per_user() {
        let (db, user) = db_with_user("a@example.com").await;
        for purpose in ["first", "second", "third"] {
            log_ai_request(&db, &AiRequest::new("mock", "mock", "p", purpose), user)
                .await
                .unwrap();
        }

        let recent = list_ai_requests(&db, 2, user).await.unwrap();
        let purposes: Vec<_> = recent.iter().map(|r| r.purpose.as_str()).collect();
        assert_eq!(purposes, vec!["third", "second"]);
        assert!(list_ai_requests(&db, 10, user + 1).await.unwrap().is_empty());
        assert!(list_ai_responses(&db, 10, user + 1).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn response_for_unknown_request_is_rejected() {
        let (db, _user) = db_with_user("a@example.com").await;
        let result = log_ai_response(
            &db,
            &AiResponse {
                request_id: 404,
                response_text: "orphan".into(),
                latency_ms: 1,
                token_estimate: 1,
            },
        )
        .await;
        assert!(matches!(result, Err(InboxError::Storage { .. })));
    }
}
