// SPDX-FileCopyrightText: 2026 InboxPilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Process-wide wiring and per-user service bundles.
//!
//! [`AppContext`] owns the shared store and AI provider. Everything that
//! touches user data is reached through [`AppContext::services_for_user`],
//! which builds one [`UserContext`] and hands it to every component.

use std::sync::Arc;

use inboxpilot_ai::build_provider;
use inboxpilot_classify::TriageEngine;
use inboxpilot_config::InboxConfig;
use inboxpilot_core::types::NewUser;
use inboxpilot_core::{AiProvider, InboxError, InboxStore, PluginAdapter, UserContext};
use inboxpilot_insights::{ChatAssistant, MeetingNotes, MessageInsights};
use inboxpilot_storage::SqliteStore;
use tracing::info;

use crate::api_keys::ApiKeyService;
use crate::categories::CategoryService;
use crate::ingestion::IngestionService;
use crate::meetings::MeetingService;
use crate::notes::NoteService;
use crate::records::{AuditService, ConnectionService, StatsService};
use crate::tasks::TaskService;
use crate::templates::TemplateService;

/// Shared application state. Cheap to clone.
#[derive(Clone)]
pub struct AppContext {
    config: Arc<InboxConfig>,
    store: Arc<dyn InboxStore>,
    ai: Arc<dyn AiProvider>,
    default_user_id: i64,
    api_keys: ApiKeyService,
}

impl AppContext {
    /// Open storage, select the AI provider and ensure the configured user.
    pub async fn build(config: InboxConfig) -> Result<Self, InboxError> {
        let ai = build_provider(&config)?;
        let store = SqliteStore::new(config.storage.clone());
        store.initialize().await?;
        Self::from_parts(config, Arc::new(store), ai).await
    }

    /// Assemble a context around an already initialized store and provider.
    pub async fn from_parts(
        config: InboxConfig,
        store: Arc<dyn InboxStore>,
        ai: Arc<dyn AiProvider>,
    ) -> Result<Self, InboxError> {
        let default_user_id = store
            .ensure_user(&NewUser {
                display_name: config.user.name.clone(),
                email: config.user.email.clone(),
            })
            .await?;
        let api_keys = ApiKeyService::new(store.clone(), &config.gateway.token_secret);

        info!(
            default_user_id,
            store = store.name(),
            provider = ai.name(),
            model = ai.model(),
            "application context ready"
        );

        Ok(Self {
            config: Arc::new(config),
            store,
            ai,
            default_user_id,
            api_keys,
        })
    }

    pub fn config(&self) -> &InboxConfig {
        &self.config
    }

    pub fn store(&self) -> &Arc<dyn InboxStore> {
        &self.store
    }

    pub fn provider(&self) -> &Arc<dyn AiProvider> {
        &self.ai
    }

    pub fn default_user_id(&self) -> i64 {
        self.default_user_id
    }

    pub fn api_keys(&self) -> &ApiKeyService {
        &self.api_keys
    }

    /// Id of the user with `email`, creating the user on first use.
    pub async fn user_id_for_email(&self, email: &str) -> Result<i64, InboxError> {
        let email = email.trim();
        if email.is_empty() {
            return Err(InboxError::InvalidInput("user email must not be empty".into()));
        }
        if email == self.config.user.email {
            return Ok(self.default_user_id);
        }
        self.store
            .ensure_user(&NewUser {
                display_name: email.to_string(),
                email: email.to_string(),
            })
            .await
    }

    fn user_context(&self, user_id: i64) -> UserContext {
        UserContext::new(
            user_id,
            self.store.clone(),
            self.ai.clone(),
            self.config.triage.keywords(),
        )
    }

    pub fn services_for_user(&self, user_id: i64) -> UserServices {
        UserServices::new(&self.user_context(user_id))
    }

    pub async fn shutdown(&self) -> Result<(), InboxError> {
        self.store.close().await
    }
}

/// Every service, bound to one user.
pub struct UserServices {
    pub user_id: i64,
    pub ingestion: IngestionService,
    pub categories: CategoryService,
    pub templates: TemplateService,
    pub tasks: TaskService,
    pub notes: NoteService,
    pub meetings: MeetingService,
    pub insights: MessageInsights,
    pub meeting_notes: MeetingNotes,
    pub chat: ChatAssistant,
    pub triage: TriageEngine,
    pub connections: ConnectionService,
    pub stats: StatsService,
    pub audit: AuditService,
    store: Arc<dyn InboxStore>,
}

impl UserServices {
    pub fn new(ctx: &UserContext) -> Self {
        Self {
            user_id: ctx.user_id,
            ingestion: IngestionService::new(ctx),
            categories: CategoryService::new(ctx),
            templates: TemplateService::new(ctx),
            tasks: TaskService::new(ctx),
            notes: NoteService::new(ctx),
            meetings: MeetingService::new(ctx),
            insights: MessageInsights::new(ctx),
            meeting_notes: MeetingNotes::new(ctx),
            chat: ChatAssistant::new(ctx),
            triage: TriageEngine::new(ctx),
            connections: ConnectionService::new(ctx),
            stats: StatsService::new(ctx),
            audit: AuditService::new(ctx),
            store: ctx.store.clone(),
        }
    }

    /// Most recent messages first.
    pub async fn list_messages(
        &self,
        limit: u32,
    ) -> Result<Vec<inboxpilot_core::types::Message>, InboxError> {
        self.store.list_messages(limit, self.user_id).await
    }

    pub async fn search_messages(
        &self,
        query: &str,
        limit: u32,
    ) -> Result<Vec<inboxpilot_core::types::Message>, InboxError> {
        self.store.search_messages(query, limit, self.user_id).await
    }

    pub async fn get_message(
        &self,
        message_id: i64,
    ) -> Result<inboxpilot_core::types::Message, InboxError> {
        self.store
            .get_message(message_id, self.user_id)
            .await?
            .ok_or_else(|| InboxError::not_found("message", message_id))
    }
}
