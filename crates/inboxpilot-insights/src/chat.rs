// SPDX-FileCopyrightText: 2026 InboxPilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Question answering over the inbox and reply drafting.
//!
//! Drafts are returned to the caller only. Nothing here sends mail.

use std::sync::Arc;

use inboxpilot_ai::AuditedGateway;
use inboxpilot_core::{InboxError, InboxStore, UserContext};
use tracing::debug;

use crate::prompts;

/// Number of search hits given to the model when the caller has no preference.
pub const DEFAULT_CONTEXT_MESSAGES: u32 = 3;

pub struct ChatAssistant {
    user_id: i64,
    store: Arc<dyn InboxStore>,
    gateway: AuditedGateway,
}

impl ChatAssistant {
    pub fn new(ctx: &UserContext) -> Self {
        Self {
            user_id: ctx.user_id,
            store: ctx.store.clone(),
            gateway: AuditedGateway::new(ctx),
        }
    }

    /// Answer `query` using up to `limit` matching messages as context.
    ///
    /// A query with no matching messages is still sent, with an empty
    /// context section.
    pub async fn answer(&self, query: &str, limit: u32) -> Result<String, InboxError> {
        let hits = self
            .store
            .search_messages(query, limit, self.user_id)
            .await?;
        debug!(hits = hits.len(), "chat context assembled");

        let prompt = prompts::answer(query, &hits);
        let generation = self.gateway.generate(&prompt, prompts::PURPOSE_ANSWER).await?;
        Ok(generation.text)
    }

    /// Draft a reply to a stored message following `instructions`.
    pub async fn draft_reply(
        &self,
        message_id: i64,
        instructions: &str,
    ) -> Result<String, InboxError> {
        let message = self
            .store
            .get_message(message_id, self.user_id)
            .await?
            .ok_or_else(|| InboxError::not_found("message", message_id))?;

        let prompt = prompts::draft_reply(&message, instructions);
        let generation = self.gateway.generate(&prompt, prompts::PURPOSE_DRAFT).await?;
        Ok(generation.text)
    }
}
