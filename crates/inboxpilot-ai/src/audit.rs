// SPDX-FileCopyrightText: 2026 InboxPilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Audited generation: every AI call is bracketed by audit log writes.
//!
//! The request row is written before the provider is invoked, so a failed
//! call leaves an orphaned request with no response. Prompts are stored
//! verbatim.

use std::sync::Arc;

use inboxpilot_core::types::{AiRequest, AiResponse};
use inboxpilot_core::{AiProvider, InboxError, InboxStore, PluginAdapter, UserContext};
use tracing::{info, warn};

use crate::tokens::estimate_tokens;

/// Result of one audited AI call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditedGeneration {
    pub request_id: i64,
    pub response_id: i64,
    pub text: String,
    pub latency_ms: u64,
}

/// The AI gateway as seen by services: a provider plus the audit log of
/// the context user.
#[derive(Clone)]
pub struct AuditedGateway {
    user_id: i64,
    store: Arc<dyn InboxStore>,
    provider: Arc<dyn AiProvider>,
}

impl AuditedGateway {
    pub fn new(ctx: &UserContext) -> Self {
        Self {
            user_id: ctx.user_id,
            store: ctx.store.clone(),
            provider: ctx.ai.clone(),
        }
    }

    /// Log the request, call the provider, log the response.
    ///
    /// Provider errors propagate unchanged after the request has been logged.
    pub async fn generate(
        &self,
        prompt: &str,
        purpose: &str,
    ) -> Result<AuditedGeneration, InboxError> {
        let request = AiRequest::new(self.provider.name(), self.provider.model(), prompt, purpose);
        let request_id = self.store.log_ai_request(&request, self.user_id).await?;

        let generation = match self.provider.generate(prompt, purpose).await {
            Ok(generation) => generation,
            Err(e) => {
                warn!(
                    request_id,
                    provider = self.provider.name(),
                    purpose,
                    error = %e,
                    "AI call failed; request left without response"
                );
                return Err(e);
            }
        };

        let response = AiResponse {
            request_id,
            response_text: generation.text.clone(),
            latency_ms: generation.latency_ms,
            token_estimate: estimate_tokens(&generation.text),
        };
        let response_id = self.store.log_ai_response(&response).await?;

        info!(
            request_id,
            response_id,
            provider = self.provider.name(),
            model = self.provider.model(),
            purpose,
            latency_ms = generation.latency_ms,
            token_estimate = response.token_estimate,
            "AI call recorded"
        );

        Ok(AuditedGeneration {
            request_id,
            response_id,
            text: generation.text,
            latency_ms: generation.latency_ms,
        })
    }
}
