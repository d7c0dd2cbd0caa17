// SPDX-FileCopyrightText: 2026 InboxPilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Summaries and follow-up suggestions, stored as notes.
//!
//! The AI answer is persisted unsplit as a single note on its parent.

use std::sync::Arc;

use inboxpilot_ai::AuditedGateway;
use inboxpilot_core::types::{Message, NewNote, ParentType};
use inboxpilot_core::{InboxError, InboxStore, UserContext};
use tracing::debug;

use crate::prompts;
use crate::tasks::load_meeting_transcript;

/// A stored follow-up suggestion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FollowUp {
    pub note_id: i64,
    pub suggestion: String,
}

/// Generate with `prompt` and store the answer as a note. Returns the note id
/// and the stored text.
async fn generate_note(
    store: &dyn InboxStore,
    gateway: &AuditedGateway,
    user_id: i64,
    parent_type: ParentType,
    parent_id: i64,
    prompt: &str,
    purpose: &str,
) -> Result<(i64, String), InboxError> {
    let generation = gateway.generate(prompt, purpose).await?;
    let note = NewNote {
        parent_type,
        parent_id,
        content: generation.text.clone(),
    };
    let note_id = store.add_note(&note, user_id).await?;
    debug!(%parent_type, parent_id, note_id, purpose, "AI note stored");
    Ok((note_id, generation.text))
}

/// Summaries and follow-ups for a single message.
pub struct MessageInsights {
    user_id: i64,
    store: Arc<dyn InboxStore>,
    gateway: AuditedGateway,
}

impl MessageInsights {
    pub fn new(ctx: &UserContext) -> Self {
        Self {
            user_id: ctx.user_id,
            store: ctx.store.clone(),
            gateway: AuditedGateway::new(ctx),
        }
    }

    async fn message(&self, message_id: i64) -> Result<Message, InboxError> {
        self.store
            .get_message(message_id, self.user_id)
            .await?
            .ok_or_else(|| InboxError::not_found("message", message_id))
    }

    /// Summarize a message into a note. Returns the note id.
    pub async fn summarize(&self, message_id: i64) -> Result<i64, InboxError> {
        let message = self.message(message_id).await?;
        let (note_id, _) = generate_note(
            self.store.as_ref(),
            &self.gateway,
            self.user_id,
            ParentType::Message,
            message_id,
            &prompts::summarize_message(&message),
            prompts::PURPOSE_MESSAGE_SUMMARY,
        )
        .await?;
        Ok(note_id)
    }

    /// Suggest a follow-up and keep it as a note on the message.
    pub async fn follow_up(&self, message_id: i64) -> Result<FollowUp, InboxError> {
        let message = self.message(message_id).await?;
        let (note_id, suggestion) = generate_note(
            self.store.as_ref(),
            &self.gateway,
            self.user_id,
            ParentType::Message,
            message_id,
            &prompts::follow_up(&message),
            prompts::PURPOSE_FOLLOW_UP,
        )
        .await?;
        Ok(FollowUp {
            note_id,
            suggestion,
        })
    }
}

/// Meeting summaries from transcripts.
pub struct MeetingNotes {
    user_id: i64,
    store: Arc<dyn InboxStore>,
    gateway: AuditedGateway,
}

impl MeetingNotes {
    pub fn new(ctx: &UserContext) -> Self {
        Self {
            user_id: ctx.user_id,
            store: ctx.store.clone(),
            gateway: AuditedGateway::new(ctx),
        }
    }

    /// Attach a transcript to one of the user's meetings.
    pub async fn add_transcript(&self, meeting_id: i64, content: &str) -> Result<i64, InboxError> {
        if self
            .store
            .get_meeting(meeting_id, self.user_id)
            .await?
            .is_none()
        {
            return Err(InboxError::not_found("meeting", meeting_id));
        }
        self.store.add_transcript(meeting_id, content).await
    }

    /// Summarize the latest transcript into a note on the meeting.
    pub async fn summarize(&self, meeting_id: i64) -> Result<i64, InboxError> {
        let (meeting, transcript) =
            load_meeting_transcript(self.store.as_ref(), self.user_id, meeting_id).await?;
        let (note_id, _) = generate_note(
            self.store.as_ref(),
            &self.gateway,
            self.user_id,
            ParentType::Meeting,
            meeting_id,
            &prompts::summarize_meeting(&meeting, &transcript),
            prompts::PURPOSE_MEETING_SUMMARY,
        )
        .await?;
        Ok(note_id)
    }
}
