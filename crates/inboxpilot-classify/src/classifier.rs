// SPDX-FileCopyrightText: 2026 InboxPilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Keyword matching between category names/descriptions and message text.

use inboxpilot_core::types::{Category, Message};

/// Stateless substring classifier.
///
/// A category matches when any word of its name or description occurs
/// anywhere in the lowercased `subject + " " + body`. Matching is on raw
/// substrings, so `"cat"` matches `"concatenate"`.
#[derive(Debug, Default, Clone, Copy)]
pub struct RuleBasedClassifier;

impl RuleBasedClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Categories matching `message`, in the order they were given.
    pub fn suggest(&self, message: &Message, categories: &[Category]) -> Vec<Category> {
        let text = format!("{} {}", message.subject, message.body).to_lowercase();
        categories
            .iter()
            .filter(|category| {
                category_keywords(category)
                    .iter()
                    .any(|keyword| text.contains(keyword.as_str()))
            })
            .cloned()
            .collect()
    }
}

/// Lowercased words of `name + " " + description`, split on anything that is
/// not a letter, digit or underscore.
pub fn category_keywords(category: &Category) -> Vec<String> {
    let source = format!(
        "{} {}",
        category.name,
        category.description.as_deref().unwrap_or_default()
    )
    .to_lowercase();

    source
        .split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|word| !word.is_empty())
        .map(str::to_string)
        .collect()
}
