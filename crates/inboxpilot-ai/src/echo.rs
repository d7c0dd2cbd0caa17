// SPDX-FileCopyrightText: 2026 InboxPilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Offline, deterministic echo backend.

use std::time::Instant;

use async_trait::async_trait;
use inboxpilot_core::types::{AdapterType, Generation, HealthStatus};
use inboxpilot_core::{AiProvider, InboxError, PluginAdapter};

/// Number of prompt characters echoed back.
pub const ECHO_PREFIX_CHARS: usize = 240;

/// Echoes the purpose and a one-line prompt prefix. Never fails.
///
/// Output: `[mock:{purpose}] {prefix}`. Line breaks in the prefix become
/// single spaces, so the echo is always one line and never looks like a
/// list of categories or tasks.
#[derive(Debug, Default, Clone)]
pub struct EchoProvider;

impl EchoProvider {
    pub fn new() -> Self {
        Self
    }
}

fn one_line_prefix(prompt: &str) -> String {
    let mut out = String::with_capacity(ECHO_PREFIX_CHARS);
    let mut prev_cr = false;
    for c in prompt.chars().take(ECHO_PREFIX_CHARS) {
        match c {
            '\n' if prev_cr => {}
            '\n' | '\r' => out.push(' '),
            other => out.push(other),
        }
        prev_cr = c == '\r';
    }
    out
}

#[async_trait]
impl PluginAdapter for EchoProvider {
    fn name(&self) -> &str {
        "mock"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Provider
    }

    async fn health_check(&self) -> Result<HealthStatus, InboxError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), InboxError> {
        Ok(())
    }
}

#[async_trait]
impl AiProvider for EchoProvider {
    fn model(&self) -> &str {
        "mock"
    }

    async fn generate(&self, prompt: &str, purpose: &str) -> Result<Generation, InboxError> {
        let started = Instant::now();
        let text = format!("[mock:{purpose}] {}", one_line_prefix(prompt));
        Ok(Generation {
            text,
            latency_ms: started.elapsed().as_millis() as u64,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn echo_is_deterministic() {
        let provider = EchoProvider::new();
        let a = provider.generate("Summarize this", "message_summary").await.unwrap();
        let b = provider.generate("Summarize this", "message_summary").await.unwrap();
        assert_eq!(a.text, "[mock:message_summary] Summarize this");
        assert_eq!(a.text, b.text);
    }

    #[tokio::test]
    async fn prefix_is_truncated_to_240_chars() {
        let prompt = "x".repeat(500);
        let generation = EchoProvider::new().generate(&prompt, "answer").await.unwrap();
        let echoed = generation.text.strip_prefix("[mock:answer] ").unwrap();
        assert_eq!(echoed.chars().count(), ECHO_PREFIX_CHARS);
    }

    #[tokio::test]
    async fn echo_is_a_single_line() {
        let generation = EchoProvider::new()
            .generate("Categories:\nBilling\r\nTravel\rDone", "category_suggestion")
            .await
            .unwrap();
        assert!(!generation.text.contains(['\n', '\r']));
        assert_eq!(
            generation.text,
            "[mock:category_suggestion] Categories: Billing Travel Done"
        );
    }

    #[test]
    fn identity() {
        let provider = EchoProvider::new();
        assert_eq!(provider.name(), "mock");
        assert_eq!(provider.model(), "mock");
    }
}
