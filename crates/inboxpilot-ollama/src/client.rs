// SPDX-FileCopyrightText: 2026 InboxPilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for a local Ollama server.

use std::time::Duration;

use inboxpilot_core::InboxError;
use tracing::debug;

use crate::types::{ApiErrorResponse, GenerateRequest, GenerateResponse};

const PROVIDER: &str = "ollama";

/// HTTP client for Ollama's generate API.
///
/// Sends exactly one request per call. There is no retry loop: a failed
/// generation is reported to the caller as-is.
#[derive(Debug, Clone)]
pub struct OllamaClient {
    client: reqwest::Client,
    base_url: String,
}

impl OllamaClient {
    /// Creates a client for the server at `base_url` (e.g. `http://localhost:11434`).
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, InboxError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| InboxError::ProviderUnavailable {
                provider: PROVIDER.into(),
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Overrides the base URL (for testing with wiremock).
    #[cfg(test)]
    pub fn with_base_url(mut self, url: String) -> Self {
        self.base_url = url;
        self
    }

    /// Runs one non-streaming generation.
    pub async fn generate(&self, request: &GenerateRequest) -> Result<GenerateResponse, InboxError> {
        let url = format!("{}/api/generate", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| InboxError::ProviderUnavailable {
                provider: PROVIDER.into(),
                message: format!("HTTP request failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        debug!(status = %status, model = %request.model, "generate response received");

        let body = response
            .text()
            .await
            .map_err(|e| InboxError::ProviderUnavailable {
                provider: PROVIDER.into(),
                message: format!("failed to read response body: {e}"),
                source: Some(Box::new(e)),
            })?;

        if !status.is_success() {
            let message = match serde_json::from_str::<ApiErrorResponse>(&body) {
                Ok(api_err) => format!("Ollama returned {status}: {}", api_err.error),
                Err(_) => format!("Ollama returned {status}: {body}"),
            };
            return Err(InboxError::provider(PROVIDER, message));
        }

        serde_json::from_str(&body).map_err(|e| InboxError::ProviderUnavailable {
            provider: PROVIDER.into(),
            message: format!("failed to parse generate response: {e}"),
            source: Some(Box::new(e)),
        })
    }
}
