// SPDX-FileCopyrightText: 2026 InboxPilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Keyword triage over the most recent messages.

use std::sync::Arc;

use inboxpilot_core::types::{Message, TriageKeywords};
use inboxpilot_core::{InboxError, InboxStore, UserContext};
use serde::Serialize;

/// Priority label derived from a triage score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn from_score(score: u8) -> Self {
        match score {
            0 => Self::Low,
            1 => Self::Medium,
            _ => Self::High,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TriageItem {
    pub id: i64,
    pub subject: String,
    pub sender: String,
    pub priority: Priority,
    pub score: u8,
}

pub struct TriageEngine {
    user_id: i64,
    store: Arc<dyn InboxStore>,
    high: Vec<String>,
    medium: Vec<String>,
}

impl TriageEngine {
    pub fn new(ctx: &UserContext) -> Self {
        Self::with_keywords(ctx.user_id, ctx.store.clone(), &ctx.triage)
    }

    pub fn with_keywords(
        user_id: i64,
        store: Arc<dyn InboxStore>,
        keywords: &TriageKeywords,
    ) -> Self {
        Self {
            user_id,
            store,
            high: normalize(&keywords.high),
            medium: normalize(&keywords.medium),
        }
    }

    /// Score the `limit` most recent messages.
    ///
    /// Items come back in storage order (newest first). They are not
    /// re-sorted by score.
    pub async fn rank(&self, limit: u32) -> Result<Vec<TriageItem>, InboxError> {
        let messages = self.store.list_messages(limit, self.user_id).await?;
        Ok(messages.iter().map(|m| self.score_message(m)).collect())
    }

    /// +2 for any high keyword, +1 for any medium keyword.
    pub fn score_message(&self, message: &Message) -> TriageItem {
        let text = format!("{} {}", message.subject, message.body).to_lowercase();
        let mut score = 0;
        if self.high.iter().any(|k| text.contains(k.as_str())) {
            score += 2;
        }
        if self.medium.iter().any(|k| text.contains(k.as_str())) {
            score += 1;
        }

        TriageItem {
            id: message.id,
            subject: message.subject.clone(),
            sender: message.sender.clone(),
            priority: Priority::from_score(score),
            score,
        }
    }
}

fn normalize(keywords: &[String]) -> Vec<String> {
    keywords
        .iter()
        .map(|k| k.trim().to_lowercase())
        .filter(|k| !k.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use inboxpilot_test_utils::TestHarness;

    fn keywords(high: &[&str], medium: &[&str]) -> TriageKeywords {
        TriageKeywords {
            high: high.iter().map(|s| s.to_string()).collect(),
            medium: medium.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn priority_thresholds() {
        assert_eq!(Priority::from_score(0), Priority::Low);
        assert_eq!(Priority::from_score(1), Priority::Medium);
        assert_eq!(Priority::from_score(2), Priority::High);
        assert_eq!(Priority::from_score(3), Priority::High);
        assert_eq!(Priority::High.to_string(), "high");
    }

    #[tokio::test]
    async fn scores_are_additive() {
        let harness = TestHarness::builder()
            .with_triage(keywords(&["urgent"], &["review"]))
            .build()
            .await
            .unwrap();
        harness
            .seed_message("m1", "URGENT: review contract", "", "2026-01-01T00:00:00Z")
            .await
            .unwrap();

        let items = TriageEngine::new(&harness.context()).rank(10).await.unwrap();
        assert_eq!(items[0].score, 3);
        assert_eq!(items[0].priority, Priority::High);
    }

    #[tokio::test]
    async fn body_keywords_count() {
        let harness = TestHarness::builder()
            .with_triage(keywords(&["deadline"], &[]))
            .build()
            .await
            .unwrap();
        harness
            .seed_message("m1", "Hello", "The Deadline is Friday", "2026-01-01T00:00:00Z")
            .await
            .unwrap();

        let items = TriageEngine::new(&harness.context()).rank(10).await.unwrap();
        assert_eq!(items[0].score, 2);
    }

    #[tokio::test]
    async fn output_keeps_storage_order_not_score_order() {
        let harness = TestHarness::builder()
            .with_triage(keywords(&["urgent"], &["question"]))
            .build()
            .await
            .unwrap();
        let oldest = harness
            .seed_message("m1", "urgent outage", "", "2026-01-01T00:00:00Z")
            .await
            .unwrap();
        let middle = harness
            .seed_message("m2", "a question", "", "2026-01-02T00:00:00Z")
            .await
            .unwrap();
        let newest = harness
            .seed_message("m3", "lunch", "", "2026-01-03T00:00:00Z")
            .await
            .unwrap();

        let items = TriageEngine::new(&harness.context()).rank(10).await.unwrap();
        let ids: Vec<i64> = items.iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![newest, middle, oldest]);
        let scores: Vec<u8> = items.iter().map(|i| i.score).collect();
        assert_eq!(scores, vec![0, 1, 2]);
    }

    #[tokio::test]
    async fn empty_keyword_lists_score_zero() {
        let harness = TestHarness::builder()
            .with_triage(TriageKeywords::default())
            .build()
            .await
            .unwrap();
        harness
            .seed_message("m1", "urgent asap", "", "2026-01-01T00:00:00Z")
            .await
            .unwrap();

        let items = TriageEngine::new(&harness.context()).rank(10).await.unwrap();
        assert_eq!(items[0].score, 0);
        assert_eq!(items[0].priority, Priority::Low);
    }

    #[tokio::test]
    async fn keywords_are_normalized() {
        let harness = TestHarness::builder()
            .with_triage(keywords(&["  ASAP ", "   "], &[""]))
            .build()
            .await
            .unwrap();
        harness
            .seed_message("m1", "Need this asap", "", "2026-01-01T00:00:00Z")
            .await
            .unwrap();
        harness
            .seed_message("m2", "plain", "", "2026-01-02T00:00:00Z")
            .await
            .unwrap();

        let items = TriageEngine::new(&harness.context()).rank(10).await.unwrap();
        assert_eq!(items[0].score, 0, "blank keywords must not match everything");
        assert_eq!(items[1].score, 2);
    }

    #[tokio::test]
    async fn limit_bounds_the_window() {
        let harness = TestHarness::builder().build().await.unwrap();
        for i in 0..5 {
            harness
                .seed_message(&format!("m{i}"), "hi", "", &format!("2026-01-0{}T00:00:00Z", i + 1))
                .await
                .unwrap();
        }
        let items = TriageEngine::new(&harness.context()).rank(2).await.unwrap();
        assert_eq!(items.len(), 2);
    }
}
