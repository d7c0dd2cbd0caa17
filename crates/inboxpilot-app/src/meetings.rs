// SPDX-FileCopyrightText: 2026 InboxPilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use std::sync::Arc;

use inboxpilot_core::types::Meeting;
use inboxpilot_core::{InboxError, InboxStore, UserContext};
use inboxpilot_insights::MeetingNotes;

/// Meeting listing, search and transcripts.
pub struct MeetingService {
    user_id: i64,
    store: Arc<dyn InboxStore>,
    notes: MeetingNotes,
}

impl MeetingService {
    pub fn new(ctx: &UserContext) -> Self {
        Self {
            user_id: ctx.user_id,
            store: ctx.store.clone(),
            notes: MeetingNotes::new(ctx),
        }
    }

    /// Most recent meetings first.
    pub async fn list(&self, limit: u32) -> Result<Vec<Meeting>, InboxError> {
        self.store.list_meetings(limit, self.user_id).await
    }

    /// Substring search over title and participants.
    pub async fn search(&self, query: &str, limit: u32) -> Result<Vec<Meeting>, InboxError> {
        self.store.search_meetings(query, limit, self.user_id).await
    }

    pub async fn add_transcript(&self, meeting_id: i64, content: &str) -> Result<i64, InboxError> {
        if content.trim().is_empty() {
            return Err(InboxError::InvalidInput("transcript must not be empty".into()));
        }
        self.notes.add_transcript(meeting_id, content).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use inboxpilot_test_utils::TestHarness;

    #[tokio::test]
    async fn search_matches_title() {
        let harness = TestHarness::builder().build().await.unwrap();
        harness.seed_meeting("e1", "Quarterly planning").await.unwrap();
        harness.seed_meeting("e2", "Coffee").await.unwrap();
        let service = MeetingService::new(&harness.context());

        let hits = service.search("planning", 10).await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "Quarterly planning");
        assert_eq!(service.list(10).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn transcript_requires_existing_meeting() {
        let harness = TestHarness::builder().build().await.unwrap();
        let err = MeetingService::new(&harness.context())
            .add_transcript(3, "hello")
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }
}
