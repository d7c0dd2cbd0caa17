// SPDX-FileCopyrightText: 2026 InboxPilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! AI provider trait: the single text-generation capability behind the AI gateway.

use async_trait::async_trait;

use crate::error::InboxError;
use crate::traits::adapter::PluginAdapter;
use crate::types::Generation;

/// An interchangeable text-generation backend.
///
/// Implementations perform exactly one generation per call. They never cache
/// and never retry; transport and upstream failures surface as
/// [`InboxError::ProviderUnavailable`].
#[async_trait]
pub trait AiProvider: PluginAdapter {
    /// Model identifier recorded alongside every audited request.
    fn model(&self) -> &str;

    /// Generate text for `prompt`. `purpose` tags the kind of task
    /// (e.g. `"category_suggestion"`, `"extract_tasks"`).
    async fn generate(&self, prompt: &str, purpose: &str) -> Result<Generation, InboxError>;
}
