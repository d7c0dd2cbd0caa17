// SPDX-FileCopyrightText: 2026 InboxPilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! OpenAI provider adapter for InboxPilot.
//!
//! Implements [`AiProvider`] on top of chat completions. Each generation is
//! a two-message conversation: a fixed system line naming the task purpose,
//! then the prompt as the user turn.

pub mod client;
pub mod types;

use std::time::{Duration, Instant};

use async_trait::async_trait;
use inboxpilot_config::InboxConfig;
use inboxpilot_core::types::{AdapterType, Generation, HealthStatus};
use inboxpilot_core::{AiProvider, InboxError, PluginAdapter};
use tracing::{debug, info};

use crate::client::OpenAiClient;
use crate::types::{ChatMessage, ChatRequest};

/// Environment variable consulted when `openai.api_key` is unset.
pub const API_KEY_ENV_VAR: &str = "OPENAI_API_KEY";

/// Sampling temperature for every request.
const TEMPERATURE: f32 = 0.2;

/// OpenAI-backed text generation.
///
/// API key resolution order: config -> `OPENAI_API_KEY` env var -> error.
pub struct OpenAiProvider {
    client: OpenAiClient,
    model: String,
}

impl OpenAiProvider {
    /// Creates a provider from `[openai]` and `ai.timeout_secs`.
    ///
    /// Fails with [`InboxError::ConfigurationMissing`] when no API key is
    /// configured or exported.
    pub fn new(config: &InboxConfig) -> Result<Self, InboxError> {
        let api_key = resolve_api_key(
            config.openai.api_key.as_deref(),
            std::env::var(API_KEY_ENV_VAR).ok(),
        )?;
        let client = OpenAiClient::new(
            &api_key,
            &config.openai.base_url,
            Duration::from_secs(config.ai.timeout_secs),
        )?;
        info!(model = %config.openai.model, "OpenAI provider initialized");
        Ok(Self {
            client,
            model: config.openai.model.clone(),
        })
    }

    /// Creates a provider with an existing client (for testing).
    #[cfg(test)]
    fn with_client(client: OpenAiClient, model: &str) -> Self {
        Self {
            client,
            model: model.to_string(),
        }
    }

    fn to_chat_request(&self, prompt: &str, purpose: &str) -> ChatRequest {
        ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage::system(format!("You are InboxPilot. Task: {purpose}.")),
                ChatMessage::user(prompt),
            ],
            temperature: TEMPERATURE,
        }
    }
}

/// Picks the configured key, then the environment; blank values count as absent.
fn resolve_api_key(config_key: Option<&str>, env_key: Option<String>) -> Result<String, InboxError> {
    if let Some(key) = config_key
        && !key.trim().is_empty()
    {
        return Ok(key.to_string());
    }
    match env_key {
        Some(key) if !key.trim().is_empty() => Ok(key),
        _ => Err(InboxError::ConfigurationMissing {
            key: "openai.api_key".into(),
        }),
    }
}

#[async_trait]
impl PluginAdapter for OpenAiProvider {
    fn name(&self) -> &str {
        "openai"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Provider
    }

    async fn health_check(&self) -> Result<HealthStatus, InboxError> {
        // Avoid spending tokens on health checks.
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), InboxError> {
        debug!("OpenAI provider shutting down");
        Ok(())
    }
}

#[async_trait]
impl AiProvider for OpenAiProvider {
    fn model(&self) -> &str {
        &self.model
    }

    async fn generate(&self, prompt: &str, purpose: &str) -> Result<Generation, InboxError> {
        let request = self.to_chat_request(prompt, purpose);

        let started = Instant::now();
        let response = self.client.complete(&request).await?;
        let text = response
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content.unwrap_or_default())
            .ok_or_else(|| InboxError::provider("openai", "response contained no choices"))?;
        let latency_ms = started.elapsed().as_millis() as u64;

        debug!(purpose, latency_ms, "OpenAI generation complete");
        Ok(Generation { text, latency_ms })
    }
}
