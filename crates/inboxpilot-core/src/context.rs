// SPDX-FileCopyrightText: 2026 InboxPilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-user context handed to every service constructor.

use std::sync::Arc;

use crate::traits::{AiProvider, InboxStore, PluginAdapter};
use crate::types::TriageKeywords;

/// Everything a service needs to act on behalf of one user.
///
/// Built once per CLI invocation or HTTP request. Cloning is cheap: the store
/// and provider are shared handles.
#[derive(Clone)]
pub struct UserContext {
    /// Owning user for every read and write made through this context.
    pub user_id: i64,
    pub store: Arc<dyn InboxStore>,
    pub ai: Arc<dyn AiProvider>,
    pub triage: TriageKeywords,
}

impl UserContext {
    pub fn new(
        user_id: i64,
        store: Arc<dyn InboxStore>,
        ai: Arc<dyn AiProvider>,
        triage: TriageKeywords,
    ) -> Self {
        Self {
            user_id,
            store,
            ai,
            triage,
        }
    }
}

impl std::fmt::Debug for UserContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserContext")
            .field("user_id", &self.user_id)
            .field("store", &self.store.name())
            .field("ai", &self.ai.name())
            .field("model", &self.ai.model())
            .finish()
    }
}
