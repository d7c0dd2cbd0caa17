// SPDX-FileCopyrightText: 2026 InboxPilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ollama provider adapter for InboxPilot.
//!
//! Implements [`AiProvider`] against a local Ollama server's non-streaming
//! `/api/generate` endpoint.

pub mod client;
pub mod types;

use std::time::{Duration, Instant};

use async_trait::async_trait;
use inboxpilot_config::InboxConfig;
use inboxpilot_core::types::{AdapterType, Generation, HealthStatus};
use inboxpilot_core::{AiProvider, InboxError, PluginAdapter};
use tracing::{debug, info};

use crate::client::OllamaClient;
use crate::types::GenerateRequest;

/// Ollama-backed text generation.
pub struct OllamaProvider {
    client: OllamaClient,
    model: String,
}

impl OllamaProvider {
    /// Creates a provider from `[ollama]` and `ai.timeout_secs`.
    pub fn new(config: &InboxConfig) -> Result<Self, InboxError> {
        let client = OllamaClient::new(
            &config.ollama.base_url,
            Duration::from_secs(config.ai.timeout_secs),
        )?;
        info!(
            base_url = %config.ollama.base_url,
            model = %config.ollama.model,
            "Ollama provider initialized"
        );
        Ok(Self {
            client,
            model: config.ollama.model.clone(),
        })
    }

    /// Creates a provider with an existing client (for testing).
    #[cfg(test)]
    fn with_client(client: OllamaClient, model: &str) -> Self {
        Self {
            client,
            model: model.to_string(),
        }
    }
}

#[async_trait]
impl PluginAdapter for OllamaProvider {
    fn name(&self) -> &str {
        "ollama"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Provider
    }

    async fn health_check(&self) -> Result<HealthStatus, InboxError> {
        // Generating would load the model; construction already validated the client.
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), InboxError> {
        debug!("Ollama provider shutting down");
        Ok(())
    }
}

#[async_trait]
impl AiProvider for OllamaProvider {
    fn model(&self) -> &str {
        &self.model
    }

    async fn generate(&self, prompt: &str, purpose: &str) -> Result<Generation, InboxError> {
        let request = GenerateRequest {
            model: self.model.clone(),
            prompt: prompt.to_string(),
            stream: false,
        };

        let started = Instant::now();
        let response = self.client.generate(&request).await?;
        let latency_ms = started.elapsed().as_millis() as u64;

        debug!(purpose, latency_ms, "Ollama generation complete");
        Ok(Generation {
            text: response.response,
            latency_ms,
        })
    }
}
