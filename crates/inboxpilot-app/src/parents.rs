// SPDX-FileCopyrightText: 2026 InboxPilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use inboxpilot_core::types::ParentType;
use inboxpilot_core::{InboxError, InboxStore};

/// `NotFound` unless the message or meeting exists for `user_id`.
pub(crate) async fn ensure_parent(
    store: &dyn InboxStore,
    user_id: i64,
    parent_type: ParentType,
    parent_id: i64,
) -> Result<(), InboxError> {
    let exists = match parent_type {
        ParentType::Message => store.get_message(parent_id, user_id).await?.is_some(),
        ParentType::Meeting => store.get_meeting(parent_id, user_id).await?.is_some(),
    };
    if exists {
        Ok(())
    } else {
        Err(InboxError::not_found(
            match parent_type {
                ParentType::Message => "message",
                ParentType::Meeting => "meeting",
            },
            parent_id,
        ))
    }
}
