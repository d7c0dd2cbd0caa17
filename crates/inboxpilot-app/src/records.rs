// SPDX-FileCopyrightText: 2026 InboxPilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Read-mostly services: connections, counts and the AI audit trail.

use std::sync::Arc;

use inboxpilot_core::types::{
    Connection, LoggedAiRequest, LoggedAiResponse, NewConnection, StatsSnapshot,
};
use inboxpilot_core::{InboxError, InboxStore, UserContext};

pub struct ConnectionService {
    user_id: i64,
    store: Arc<dyn InboxStore>,
}

impl ConnectionService {
    pub fn new(ctx: &UserContext) -> Self {
        Self {
            user_id: ctx.user_id,
            store: ctx.store.clone(),
        }
    }

    pub async fn add(&self, connection: &NewConnection) -> Result<i64, InboxError> {
        if connection.provider_name.trim().is_empty() {
            return Err(InboxError::InvalidInput("provider_name must not be empty".into()));
        }
        self.store.add_connection(connection, self.user_id).await
    }

    pub async fn list(&self) -> Result<Vec<Connection>, InboxError> {
        self.store.list_connections(self.user_id).await
    }
}

pub struct StatsService {
    user_id: i64,
    store: Arc<dyn InboxStore>,
}

impl StatsService {
    pub fn new(ctx: &UserContext) -> Self {
        Self {
            user_id: ctx.user_id,
            store: ctx.store.clone(),
        }
    }

    pub async fn snapshot(&self) -> Result<StatsSnapshot, InboxError> {
        self.store.stats(self.user_id).await
    }
}

/// The user's AI requests and responses, newest first.
pub struct AuditService {
    user_id: i64,
    store: Arc<dyn InboxStore>,
}

impl AuditService {
    pub fn new(ctx: &UserContext) -> Self {
        Self {
            user_id: ctx.user_id,
            store: ctx.store.clone(),
        }
    }

    pub async fn recent_requests(&self, limit: u32) -> Result<Vec<LoggedAiRequest>, InboxError> {
        self.store.list_ai_requests(limit, self.user_id).await
    }

    pub async fn recent_responses(&self, limit: u32) -> Result<Vec<LoggedAiResponse>, InboxError> {
        self.store.list_ai_responses(limit, self.user_id).await
    }
}
