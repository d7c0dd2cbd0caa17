// SPDX-FileCopyrightText: 2026 InboxPilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! AI-backed category suggestions with a rule-based fallback.
//!
//! The model is asked to choose from the user's existing categories only.
//! Each answer line is matched against those names case-insensitively; when
//! nothing matches, the [`RuleBasedClassifier`] result is returned instead.
//! Both request and response are in the audit log either way.

use std::sync::Arc;

use inboxpilot_ai::AuditedGateway;
use inboxpilot_core::types::{Category, Message};
use inboxpilot_core::{InboxError, InboxStore, UserContext};
use serde::Serialize;
use tracing::{debug, info};

use crate::classifier::RuleBasedClassifier;

/// Purpose tag recorded in the audit log.
pub const SUGGESTION_PURPOSE: &str = "category_suggestion";

/// Where a set of suggestions came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, strum::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SuggestionSource {
    /// The AI named at least one existing category.
    Ai,
    /// The AI answer matched nothing; keyword rules were applied.
    Rules,
    /// The user has no categories; no AI call was made.
    NoCategories,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategorySuggestions {
    pub categories: Vec<Category>,
    pub source: SuggestionSource,
}

pub struct CategorySuggester {
    user_id: i64,
    store: Arc<dyn InboxStore>,
    gateway: AuditedGateway,
    rules: RuleBasedClassifier,
}

impl CategorySuggester {
    pub fn new(ctx: &UserContext) -> Self {
        Self {
            user_id: ctx.user_id,
            store: ctx.store.clone(),
            gateway: AuditedGateway::new(ctx),
            rules: RuleBasedClassifier::new(),
        }
    }

    /// Suggest categories for one of the user's messages.
    ///
    /// Fails with `NotFound` if the message is not the user's, and with
    /// `ProviderUnavailable` if the AI call fails. Provider failures do not
    /// fall back to rules.
    pub async fn suggest_for_message(
        &self,
        message_id: i64,
    ) -> Result<CategorySuggestions, InboxError> {
        let message = self
            .store
            .get_message(message_id, self.user_id)
            .await?
            .ok_or_else(|| InboxError::not_found("message", message_id))?;

        let categories = self.store.list_categories(self.user_id).await?;
        if categories.is_empty() {
            debug!(message_id, "no categories defined; skipping AI suggestion");
            return Ok(CategorySuggestions {
                categories: Vec::new(),
                source: SuggestionSource::NoCategories,
            });
        }

        let prompt = suggestion_prompt(&message, &categories);
        let generation = self.gateway.generate(&prompt, SUGGESTION_PURPOSE).await?;

        let chosen = match_response(&generation.text, &categories);
        if !chosen.is_empty() {
            debug!(message_id, count = chosen.len(), "AI suggestions validated");
            return Ok(CategorySuggestions {
                categories: chosen,
                source: SuggestionSource::Ai,
            });
        }

        info!(
            message_id,
            request_id = generation.request_id,
            "AI named no known category; using keyword rules"
        );
        Ok(CategorySuggestions {
            categories: self.rules.suggest(&message, &categories),
            source: SuggestionSource::Rules,
        })
    }
}

/// Prompt listing exactly the user's category names, one per line.
pub fn suggestion_prompt(message: &Message, categories: &[Category]) -> String {
    let names: Vec<&str> = categories.iter().map(|c| c.name.as_str()).collect();
    format!(
        "Choose the best categories for this email. Respond with category names only, \
         one per line, using only names from the list.\n\n\
         Categories:\n{}\n\n\
         Subject: {}\nBody: {}\n",
        names.join("\n"),
        message.subject,
        message.body,
    )
}

/// Categories named by `response`, in answer order, each at most once.
///
/// A line names a category when, after trimming and dropping leading `-`
/// bullets, it equals the category name ignoring case.
pub fn match_response(response: &str, categories: &[Category]) -> Vec<Category> {
    let mut chosen: Vec<Category> = Vec::new();
    for line in response.lines() {
        let candidate = line
            .trim()
            .trim_start_matches('-')
            .trim()
            .to_lowercase();
        if candidate.is_empty() {
            continue;
        }
        if let Some(category) = categories
            .iter()
            .find(|c| c.name.to_lowercase() == candidate)
            && !chosen.iter().any(|c| c.id == category.id)
        {
            chosen.push(category.clone());
        }
    }
    chosen
}
