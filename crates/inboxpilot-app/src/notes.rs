// SPDX-FileCopyrightText: 2026 InboxPilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use std::sync::Arc;

use inboxpilot_core::types::{NewNote, Note, ParentType};
use inboxpilot_core::{InboxError, InboxStore, UserContext};

use crate::parents::ensure_parent;

/// Free-form notes on messages and meetings. Notes are append-only.
pub struct NoteService {
    user_id: i64,
    store: Arc<dyn InboxStore>,
}

impl NoteService {
    pub fn new(ctx: &UserContext) -> Self {
        Self {
            user_id: ctx.user_id,
            store: ctx.store.clone(),
        }
    }

    pub async fn add(
        &self,
        parent_type: ParentType,
        parent_id: i64,
        content: &str,
    ) -> Result<i64, InboxError> {
        if content.trim().is_empty() {
            return Err(InboxError::InvalidInput("note content must not be empty".into()));
        }
        ensure_parent(self.store.as_ref(), self.user_id, parent_type, parent_id).await?;
        let note = NewNote {
            parent_type,
            parent_id,
            content: content.to_string(),
        };
        self.store.add_note(&note, self.user_id).await
    }

    pub async fn list(&self, parent_type: ParentType, parent_id: i64) -> Result<Vec<Note>, InboxError> {
        self.store.list_notes(parent_type, parent_id, self.user_id).await
    }
}
