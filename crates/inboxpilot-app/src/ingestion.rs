// SPDX-FileCopyrightText: 2026 InboxPilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Message and meeting ingestion.
//!
//! Ingestion is idempotent on provider ids: re-ingesting a record returns the
//! id it already has and leaves the stored row untouched.

use std::path::Path;
use std::sync::Arc;

use inboxpilot_core::types::{NewMeeting, NewMessage};
use inboxpilot_core::{InboxError, InboxStore, UserContext};
use tracing::info;

use crate::fixtures::{load_meeting_fixture, load_message_fixture};

pub struct IngestionService {
    user_id: i64,
    store: Arc<dyn InboxStore>,
}

impl IngestionService {
    pub fn new(ctx: &UserContext) -> Self {
        Self {
            user_id: ctx.user_id,
            store: ctx.store.clone(),
        }
    }

    pub async fn ingest_messages(&self, messages: &[NewMessage]) -> Result<Vec<i64>, InboxError> {
        let ids = self.store.save_messages(messages, self.user_id).await?;
        info!(user_id = self.user_id, count = ids.len(), "messages ingested");
        Ok(ids)
    }

    pub async fn ingest_meetings(&self, meetings: &[NewMeeting]) -> Result<Vec<i64>, InboxError> {
        let ids = self.store.save_meetings(meetings, self.user_id).await?;
        info!(user_id = self.user_id, count = ids.len(), "meetings ingested");
        Ok(ids)
    }

    pub async fn ingest_message_fixture(
        &self,
        path: &Path,
        limit: usize,
    ) -> Result<Vec<i64>, InboxError> {
        let messages = load_message_fixture(path, limit).await?;
        self.ingest_messages(&messages).await
    }

    pub async fn ingest_meeting_fixture(
        &self,
        path: &Path,
        limit: usize,
    ) -> Result<Vec<i64>, InboxError> {
        let meetings = load_meeting_fixture(path, limit).await?;
        self.ingest_meetings(&meetings).await
    }
}
