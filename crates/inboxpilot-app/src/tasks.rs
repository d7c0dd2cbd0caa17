// SPDX-FileCopyrightText: 2026 InboxPilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Manual task management plus AI extraction.

use std::sync::Arc;

use inboxpilot_core::types::{NewTask, ParentType, Task};
use inboxpilot_core::{InboxError, InboxStore, UserContext};
use inboxpilot_insights::TaskExtractor;

use crate::parents::ensure_parent;

pub struct TaskService {
    user_id: i64,
    store: Arc<dyn InboxStore>,
    extractor: TaskExtractor,
}

impl TaskService {
    pub fn new(ctx: &UserContext) -> Self {
        Self {
            user_id: ctx.user_id,
            store: ctx.store.clone(),
            extractor: TaskExtractor::new(ctx),
        }
    }

    /// Add an open task to one of the user's messages or meetings.
    pub async fn add(
        &self,
        parent_type: ParentType,
        parent_id: i64,
        description: &str,
    ) -> Result<i64, InboxError> {
        let description = description.trim();
        if description.is_empty() {
            return Err(InboxError::InvalidInput(
                "task description must not be empty".into(),
            ));
        }
        ensure_parent(self.store.as_ref(), self.user_id, parent_type, parent_id).await?;
        self.store
            .add_task(&NewTask::open(parent_type, parent_id, description), self.user_id)
            .await
    }

    pub async fn list(&self, parent_type: ParentType, parent_id: i64) -> Result<Vec<Task>, InboxError> {
        self.store.list_tasks(parent_type, parent_id, self.user_id).await
    }

    /// Every task of the user whose status is not `done`.
    pub async fn list_open(&self) -> Result<Vec<Task>, InboxError> {
        self.store.list_open_tasks(self.user_id).await
    }

    /// Set a task's status. `NotFound` if the task is not the user's.
    pub async fn update_status(&self, task_id: i64, status: &str) -> Result<(), InboxError> {
        let status = status.trim();
        if status.is_empty() {
            return Err(InboxError::InvalidInput("task status must not be empty".into()));
        }
        if self
            .store
            .update_task_status(task_id, status, self.user_id)
            .await?
        {
            Ok(())
        } else {
            Err(InboxError::not_found("task", task_id))
        }
    }

    pub async fn extract_from_message(&self, message_id: i64) -> Result<Vec<i64>, InboxError> {
        self.extractor.from_message(message_id).await
    }

    pub async fn extract_from_meeting(&self, meeting_id: i64) -> Result<Vec<i64>, InboxError> {
        self.extractor.from_meeting(meeting_id).await
    }
}
