// SPDX-FileCopyrightText: 2026 InboxPilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for InboxPilot.

use thiserror::Error;

/// The primary error type shared by the store, the AI gateway and every service.
#[derive(Debug, Error)]
pub enum InboxError {
    /// Configuration errors (invalid TOML, bad values, unknown provider).
    #[error("configuration error: {0}")]
    Config(String),

    /// A credential or setting required to construct a component is absent.
    #[error("missing configuration: {key}")]
    ConfigurationMissing { key: String },

    /// Storage backend errors (database connection, query failure, migrations).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// AI backend transport failure, non-2xx status, or unreadable body.
    #[error("AI provider `{provider}` unavailable: {message}")]
    ProviderUnavailable {
        provider: String,
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A referenced record does not exist for the requesting user.
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i64 },

    /// Caller supplied an argument the operation cannot accept.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl InboxError {
    /// Shorthand for a [`InboxError::NotFound`] error.
    pub fn not_found(entity: &'static str, id: i64) -> Self {
        Self::NotFound { entity, id }
    }

    /// Shorthand for a [`InboxError::ProviderUnavailable`] error without a source.
    pub fn provider(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ProviderUnavailable {
            provider: provider.into(),
            message: message.into(),
            source: None,
        }
    }

    /// Returns true if this error is a [`InboxError::NotFound`].
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
