// SPDX-FileCopyrightText: 2026 InboxPilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use std::sync::Arc;

use inboxpilot_classify::{CategorySuggester, CategorySuggestions};
use inboxpilot_core::types::{Category, NewCategory};
use inboxpilot_core::{InboxError, InboxStore, UserContext};

/// Category management for one user.
pub struct CategoryService {
    user_id: i64,
    store: Arc<dyn InboxStore>,
    suggester: CategorySuggester,
}

impl CategoryService {
    pub fn new(ctx: &UserContext) -> Self {
        Self {
            user_id: ctx.user_id,
            store: ctx.store.clone(),
            suggester: CategorySuggester::new(ctx),
        }
    }

    /// Create a category, or return the id of the existing one with that name.
    pub async fn create(&self, name: &str, description: Option<&str>) -> Result<i64, InboxError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(InboxError::InvalidInput("category name must not be empty".into()));
        }
        self.store
            .create_category(&NewCategory::new(name, description), self.user_id)
            .await
    }

    pub async fn list(&self) -> Result<Vec<Category>, InboxError> {
        self.store.list_categories(self.user_id).await
    }

    /// Link a category to a message. Both must belong to the user.
    pub async fn assign(&self, message_id: i64, category_id: i64) -> Result<(), InboxError> {
        if self
            .store
            .get_message(message_id, self.user_id)
            .await?
            .is_none()
        {
            return Err(InboxError::not_found("message", message_id));
        }
        if self
            .store
            .get_category(category_id, self.user_id)
            .await?
            .is_none()
        {
            return Err(InboxError::not_found("category", category_id));
        }
        self.store.assign_category(message_id, category_id).await
    }

    pub async fn categories_for_message(&self, message_id: i64) -> Result<Vec<Category>, InboxError> {
        self.store
            .list_message_categories(message_id, self.user_id)
            .await
    }

    pub async fn suggest(&self, message_id: i64) -> Result<CategorySuggestions, InboxError> {
        self.suggester.suggest_for_message(message_id).await
    }
}
