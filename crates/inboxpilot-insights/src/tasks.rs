// SPDX-FileCopyrightText: 2026 InboxPilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Action-item extraction from messages and meeting transcripts.

use std::sync::Arc;

use inboxpilot_ai::AuditedGateway;
use inboxpilot_core::types::{Meeting, NewTask, ParentType, Transcript};
use inboxpilot_core::{InboxError, InboxStore, UserContext};
use tracing::info;

use crate::parse::parse_item_lines;
use crate::prompts;

/// Turns AI answers into tasks, one per non-empty line.
///
/// Extraction is not idempotent: running it twice on the same source
/// creates the tasks twice.
pub struct TaskExtractor {
    user_id: i64,
    store: Arc<dyn InboxStore>,
    gateway: AuditedGateway,
}

impl TaskExtractor {
    pub fn new(ctx: &UserContext) -> Self {
        Self {
            user_id: ctx.user_id,
            store: ctx.store.clone(),
            gateway: AuditedGateway::new(ctx),
        }
    }

    /// Extract tasks from a message. Returns the new task ids in answer order.
    pub async fn from_message(&self, message_id: i64) -> Result<Vec<i64>, InboxError> {
        let message = self
            .store
            .get_message(message_id, self.user_id)
            .await?
            .ok_or_else(|| InboxError::not_found("message", message_id))?;

        let prompt = prompts::extract_message_tasks(&message);
        let generation = self
            .gateway
            .generate(&prompt, prompts::PURPOSE_EXTRACT_TASKS)
            .await?;

        self.persist(ParentType::Message, message_id, &generation.text)
            .await
    }

    /// Extract tasks from the latest transcript of a meeting.
    pub async fn from_meeting(&self, meeting_id: i64) -> Result<Vec<i64>, InboxError> {
        let (meeting, transcript) =
            load_meeting_transcript(self.store.as_ref(), self.user_id, meeting_id).await?;

        let prompt = prompts::extract_meeting_tasks(&meeting, &transcript);
        let generation = self
            .gateway
            .generate(&prompt, prompts::PURPOSE_EXTRACT_TASKS)
            .await?;

        self.persist(ParentType::Meeting, meeting_id, &generation.text)
            .await
    }

    async fn persist(
        &self,
        parent_type: ParentType,
        parent_id: i64,
        text: &str,
    ) -> Result<Vec<i64>, InboxError> {
        let mut ids = Vec::new();
        for description in parse_item_lines(text) {
            let task = NewTask::open(parent_type, parent_id, description);
            ids.push(self.store.add_task(&task, self.user_id).await?);
        }
        info!(%parent_type, parent_id, created = ids.len(), "tasks extracted");
        Ok(ids)
    }
}

/// Resolve a meeting and its latest transcript for `user_id`.
///
/// Missing meeting and missing transcript are both `NotFound`.
pub(crate) async fn load_meeting_transcript(
    store: &dyn InboxStore,
    user_id: i64,
    meeting_id: i64,
) -> Result<(Meeting, Transcript), InboxError> {
    let meeting = store
        .get_meeting(meeting_id, user_id)
        .await?
        .ok_or_else(|| InboxError::not_found("meeting", meeting_id))?;
    let transcript = store
        .get_meeting_transcript(meeting_id, user_id)
        .await?
        .ok_or_else(|| InboxError::not_found("transcript", meeting_id))?;
    Ok((meeting, transcript))
}
