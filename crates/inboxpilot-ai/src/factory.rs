// SPDX-FileCopyrightText: 2026 InboxPilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Resolves `ai.provider` to a concrete backend once, at startup.

use std::sync::Arc;

use inboxpilot_config::{AiProviderKind, InboxConfig};
use inboxpilot_core::{AiProvider, InboxError, PluginAdapter};
use inboxpilot_ollama::OllamaProvider;
use inboxpilot_openai::OpenAiProvider;
use tracing::info;

use crate::echo::EchoProvider;

/// Build the configured AI provider.
///
/// `openai` without an API key fails here with
/// [`InboxError::ConfigurationMissing`] rather than on first use.
pub fn build_provider(config: &InboxConfig) -> Result<Arc<dyn AiProvider>, InboxError> {
    let provider: Arc<dyn AiProvider> = match config.ai.provider {
        AiProviderKind::Mock => Arc::new(EchoProvider::new()),
        AiProviderKind::Ollama => Arc::new(OllamaProvider::new(config)?),
        AiProviderKind::Openai => Arc::new(OpenAiProvider::new(config)?),
    };
    info!(
        provider = provider.name(),
        model = provider.model(),
        "AI provider selected"
    );
    Ok(provider)
}
