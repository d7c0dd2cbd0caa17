// SPDX-FileCopyrightText: 2026 InboxPilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Scripted AI provider for deterministic testing.
//!
//! `MockProvider` implements `AiProvider` with pre-configured responses,
//! enabling fast, CI-runnable tests without external API calls.

use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;

use inboxpilot_core::types::{AdapterType, Generation, HealthStatus};
use inboxpilot_core::{AiProvider, InboxError, PluginAdapter};

/// Text returned once the scripted queue is exhausted.
pub const DEFAULT_MOCK_RESPONSE: &str = "mock response";

/// A recorded `generate` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub prompt: String,
    pub purpose: String,
}

/// A mock AI provider that returns pre-configured responses.
///
/// Responses are popped from a FIFO queue. When the queue is empty,
/// [`DEFAULT_MOCK_RESPONSE`] is returned. In failing mode every call
/// returns `ProviderUnavailable` (and is still counted).
pub struct MockProvider {
    responses: Arc<Mutex<VecDeque<String>>>,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
    call_count: AtomicUsize,
    failing: AtomicBool,
}

impl MockProvider {
    /// Create a new mock provider with an empty response queue.
    pub fn new() -> Self {
        Self::with_responses(Vec::new())
    }

    /// Create a mock provider pre-loaded with the given responses.
    pub fn with_responses(responses: Vec<String>) -> Self {
        Self {
            responses: Arc::new(Mutex::new(VecDeque::from(responses))),
            calls: Arc::new(Mutex::new(Vec::new())),
            call_count: AtomicUsize::new(0),
            failing: AtomicBool::new(false),
        }
    }

    /// Create a mock provider whose every call fails.
    pub fn failing() -> Self {
        let provider = Self::new();
        provider.set_failing(true);
        provider
    }

    /// Toggle failing mode.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Number of `generate` calls so far, failed ones included.
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    /// The most recent call, if any.
    pub async fn last_call(&self) -> Option<RecordedCall> {
        self.calls.lock().await.last().cloned()
    }

    async fn next_response(&self) -> String {
        self.responses
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| DEFAULT_MOCK_RESPONSE.to_string())
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PluginAdapter for MockProvider {
    fn name(&self) -> &str {
        "mock-provider"
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
impl AiProvider for MockProvider {
    fn model(&self) -> &str {
        "mock-model"
    }

    async fn generate(&self, prompt: &str, purpose: &str) -> Result<Generation, InboxError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        self.calls.lock().await.push(RecordedCall {
            prompt: prompt.to_string(),
            purpose: purpose.to_string(),
        });

        if self.failing.load(Ordering::SeqCst) {
            return Err(InboxError::provider("mock-provider", "scripted failure"));
        }

        Ok(Generation {
            text: self.next_response().await,
            latency_ms: 1,
        })
    }
}
