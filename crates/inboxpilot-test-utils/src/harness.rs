// SPDX-FileCopyrightText: 2026 InboxPilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test harness for service-level integration testing.
//!
//! `TestHarness` assembles a temp SQLite store, a default user, and a
//! [`MockProvider`], and hands out [`UserContext`]s wired to them.

use std::sync::Arc;

use inboxpilot_config::model::StorageConfig;
use inboxpilot_core::types::{
    NewCategory, NewMeeting, NewMessage, NewUser, TriageKeywords,
};
use inboxpilot_core::{InboxError, InboxStore, UserContext};
use inboxpilot_storage::SqliteStore;

use crate::mock_provider::MockProvider;

/// Email of the user every harness creates.
pub const TEST_USER_EMAIL: &str = "tester@example.com";

/// Builder for creating test environments with configurable options.
pub struct TestHarnessBuilder {
    responses: Vec<String>,
    failing: bool,
    triage: TriageKeywords,
}

impl TestHarnessBuilder {
    fn new() -> Self {
        Self {
            responses: Vec::new(),
            failing: false,
            triage: TriageKeywords {
                high: vec!["urgent".into(), "asap".into()],
                medium: vec!["review".into(), "question".into()],
            },
        }
    }

    /// Set mock provider responses.
    pub fn with_mock_responses<I, S>(mut self, responses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.responses = responses.into_iter().map(Into::into).collect();
        self
    }

    /// Make every AI call fail.
    pub fn with_failing_provider(mut self) -> Self {
        self.failing = true;
        self
    }

    /// Replace the triage keyword lists.
    pub fn with_triage(mut self, triage: TriageKeywords) -> Self {
        self.triage = triage;
        self
    }

    /// Build the test harness, creating the temp database and default user.
    pub async fn build(self) -> Result<TestHarness, InboxError> {
        let temp_dir =
            tempfile::TempDir::new().map_err(|e| InboxError::Storage { source: e.into() })?;
        let db_path = temp_dir.path().join("test.db");

        let store = SqliteStore::new(StorageConfig {
            database_path: db_path.to_string_lossy().into_owned(),
            wal_mode: true,
        });
        store.initialize().await?;
        let store: Arc<dyn InboxStore> = Arc::new(store);

        let user_id = store
            .ensure_user(&NewUser {
                display_name: "Tester".into(),
                email: TEST_USER_EMAIL.into(),
            })
            .await?;

        let provider = Arc::new(MockProvider::with_responses(self.responses));
        provider.set_failing(self.failing);

        Ok(TestHarness {
            provider,
            store,
            user_id,
            triage: self.triage,
            _temp_dir: temp_dir,
        })
    }
}

/// A complete test environment with a mock provider and temp storage.
pub struct TestHarness {
    /// The scripted AI provider.
    pub provider: Arc<MockProvider>,
    /// SQLite store (temp DB, cleaned up on drop).
    pub store: Arc<dyn InboxStore>,
    /// The default user's id.
    pub user_id: i64,
    pub triage: TriageKeywords,
    /// Temp directory kept alive for cleanup on drop.
    _temp_dir: tempfile::TempDir,
}

impl TestHarness {
    /// Create a new builder for configuring the test harness.
    pub fn builder() -> TestHarnessBuilder {
        TestHarnessBuilder::new()
    }

    /// Context for the default user.
    pub fn context(&self) -> UserContext {
        self.context_for(self.user_id)
    }

    /// Context for any user id, sharing the store and provider.
    pub fn context_for(&self, user_id: i64) -> UserContext {
        UserContext::new(
            user_id,
            self.store.clone(),
            self.provider.clone(),
            self.triage.clone(),
        )
    }

    /// Create (or fetch) another user.
    pub async fn add_user(&self, email: &str) -> Result<i64, InboxError> {
        self.store
            .ensure_user(&NewUser {
                display_name: email.to_string(),
                email: email.to_string(),
            })
            .await
    }

    /// Store one message for the default user and return its id.
    pub async fn seed_message(
        &self,
        provider_id: &str,
        subject: &str,
        body: &str,
        timestamp: &str,
    ) -> Result<i64, InboxError> {
        let ids = self
            .store
            .save_messages(
                &[NewMessage {
                    provider_message_id: provider_id.to_string(),
                    subject: subject.to_string(),
                    sender: "sender@example.com".to_string(),
                    recipients: TEST_USER_EMAIL.to_string(),
                    timestamp: timestamp.to_string(),
                    snippet: body.chars().take(80).collect(),
                    body: body.to_string(),
                }],
                self.user_id,
            )
            .await?;
        ids.into_iter()
            .next()
            .ok_or_else(|| InboxError::Internal("save_messages returned no id".into()))
    }

    /// Store one meeting for the default user and return its id.
    pub async fn seed_meeting(&self, event_id: &str, title: &str) -> Result<i64, InboxError> {
        let ids = self
            .store
            .save_meetings(
                &[NewMeeting {
                    provider_event_id: event_id.to_string(),
                    title: title.to_string(),
                    participants: TEST_USER_EMAIL.to_string(),
                    start_time: "2026-03-02T09:00:00Z".to_string(),
                    end_time: "2026-03-02T09:30:00Z".to_string(),
                    transcript_ref: None,
                }],
                self.user_id,
            )
            .await?;
        ids.into_iter()
            .next()
            .ok_or_else(|| InboxError::Internal("save_meetings returned no id".into()))
    }

    /// Create a category for the default user.
    pub async fn seed_category(
        &self,
        name: &str,
        description: Option<&str>,
    ) -> Result<i64, InboxError> {
        self.store
            .create_category(&NewCategory::new(name, description), self.user_id)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn harness_builds_with_default_user() {
        let harness = TestHarness::builder().build().await.unwrap();
        let user = harness.store.get_user(harness.user_id).await.unwrap().unwrap();
        assert_eq!(user.email, TEST_USER_EMAIL);
        assert_eq!(harness.context().user_id, harness.user_id);
    }

    #[tokio::test]
    async fn seeded_records_are_visible_to_the_context_user() {
        let harness = TestHarness::builder().build().await.unwrap();
        let id = harness
            .seed_message("p1", "Hello", "Body", "2026-01-01T00:00:00Z")
            .await
            .unwrap();
        let ctx = harness.context();
        assert!(ctx.store.get_message(id, ctx.user_id).await.unwrap().is_some());
    }
}
