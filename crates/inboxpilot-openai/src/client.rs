// SPDX-FileCopyrightText: 2026 InboxPilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the OpenAI Chat Completions API.
//!
//! Provides [`OpenAiClient`] which handles request construction and bearer
//! authentication. One request per call; failures are not retried.

use std::time::Duration;

use inboxpilot_core::InboxError;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use tracing::debug;

use crate::types::{ApiErrorResponse, ChatRequest, ChatResponse};

const PROVIDER: &str = "openai";

#[derive(Debug, Clone)]
pub struct OpenAiClient {
    client: reqwest::Client,
    base_url: String,
}

impl OpenAiClient {
    /// Creates a client with the bearer token baked into default headers.
    pub fn new(api_key: &str, base_url: &str, timeout: Duration) -> Result<Self, InboxError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {api_key}"))
                .map_err(|e| InboxError::Config(format!("invalid API key header value: {e}")))?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
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

    /// Sends one chat completion request.
    pub async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, InboxError> {
        let url = format!("{}/chat/completions", self.base_url);
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
        debug!(status = %status, model = %request.model, "chat completion response received");

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
                Ok(api_err) => format!(
                    "OpenAI API error ({}): {}",
                    api_err.error.type_.as_deref().unwrap_or("unknown"),
                    api_err.error.message
                ),
                Err(_) => format!("API returned {status}: {body}"),
            };
            return Err(InboxError::provider(PROVIDER, message));
        }

        serde_json::from_str(&body).map_err(|e| InboxError::ProviderUnavailable {
            provider: PROVIDER.into(),
            message: format!("failed to parse API response: {e}"),
            source: Some(Box::new(e)),
        })
    }
}
