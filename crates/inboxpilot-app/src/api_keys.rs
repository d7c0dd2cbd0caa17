// SPDX-FileCopyrightText: 2026 InboxPilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-user API keys.
//!
//! A key is 32 random bytes, hex encoded, shown to the caller once. Only the
//! HMAC-SHA256 of the token (keyed by `gateway.token_secret`) is stored.

use std::sync::Arc;

use hmac::{Hmac, Mac};
use inboxpilot_core::types::ApiKey;
use inboxpilot_core::{InboxError, InboxStore};
use rand::RngCore;
use sha2::Sha256;
use tracing::info;

type HmacSha256 = Hmac<Sha256>;

const TOKEN_BYTES: usize = 32;

/// A freshly created key. `token` is not recoverable later.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedApiKey {
    pub id: i64,
    pub token: String,
}

#[derive(Clone)]
pub struct ApiKeyService {
    store: Arc<dyn InboxStore>,
    secret: Arc<[u8]>,
}

impl std::fmt::Debug for ApiKeyService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiKeyService")
            .field("secret", &"[redacted]")
            .finish()
    }
}

impl ApiKeyService {
    pub fn new(store: Arc<dyn InboxStore>, token_secret: &str) -> Self {
        Self {
            store,
            secret: Arc::from(token_secret.as_bytes()),
        }
    }

    /// Hex HMAC-SHA256 of `token`.
    pub fn hash_token(&self, token: &str) -> Result<String, InboxError> {
        let mut mac = HmacSha256::new_from_slice(&self.secret)
            .map_err(|e| InboxError::Internal(format!("invalid token secret: {e}")))?;
        mac.update(token.as_bytes());
        Ok(hex::encode(mac.finalize().into_bytes()))
    }

    pub async fn create(
        &self,
        user_id: i64,
        label: Option<&str>,
    ) -> Result<CreatedApiKey, InboxError> {
        if self.store.get_user(user_id).await?.is_none() {
            return Err(InboxError::not_found("user", user_id));
        }

        let mut bytes = [0u8; TOKEN_BYTES];
        rand::thread_rng().fill_bytes(&mut bytes);
        let token = hex::encode(bytes);

        let hash = self.hash_token(&token)?;
        let id = self.store.create_api_key(user_id, label, &hash).await?;
        info!(user_id, key_id = id, "API key created");
        Ok(CreatedApiKey { id, token })
    }

    /// The user a token belongs to, if any.
    pub async fn resolve_user_id(&self, token: &str) -> Result<Option<i64>, InboxError> {
        let hash = self.hash_token(token)?;
        self.store.resolve_api_key(&hash).await
    }

    pub async fn list(&self, user_id: i64) -> Result<Vec<ApiKey>, InboxError> {
        self.store.list_api_keys(user_id).await
    }

    /// Delete one of the user's keys. `false` if it was not theirs.
    pub async fn revoke(&self, user_id: i64, key_id: i64) -> Result<bool, InboxError> {
        let deleted = self.store.delete_api_key(user_id, key_id).await?;
        if deleted {
            info!(user_id, key_id, "API key revoked");
        }
        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use inboxpilot_test_utils::TestHarness;

    #[tokio::test]
    async fn created_key_resolves_and_only_hash_is_stored() {
        let harness = TestHarness::builder().build().await.unwrap();
        let service = ApiKeyService::new(harness.store.clone(), "secret");

        let created = service.create(harness.user_id, Some("laptop")).await.unwrap();
        assert_eq!(created.token.len(), TOKEN_BYTES * 2);
        assert!(created.token.chars().all(|c| c.is_ascii_hexdigit()));

        assert_eq!(
            service.resolve_user_id(&created.token).await.unwrap(),
            Some(harness.user_id)
        );

        let keys = service.list(harness.user_id).await.unwrap();
        assert_eq!(keys.len(), 1);
        assert_eq!(keys[0].label.as_deref(), Some("laptop"));
        assert_ne!(keys[0].token_hash, created.token);
        assert_eq!(keys[0].token_hash, service.hash_token(&created.token).unwrap());
    }

    #[tokio::test]
    async fn revoked_key_stops_resolving() {
        let harness = TestHarness::builder().build().await.unwrap();
        let service = ApiKeyService::new(harness.store.clone(), "secret");
        let created = service.create(harness.user_id, None).await.unwrap();

        assert!(service.revoke(harness.user_id, created.id).await.unwrap());
        assert_eq!(service.resolve_user_id(&created.token).await.unwrap(), None);
        assert!(!service.revoke(harness.user_id, created.id).await.unwrap());
    }

    #[tokio::test]
    async fn other_user_cannot_revoke() {
        let harness = TestHarness::builder().build().await.unwrap();
        let other = harness.add_user("other@example.com").await.unwrap();
        let service = ApiKeyService::new(harness.store.clone(), "secret");
        let created = service.create(harness.user_id, None).await.unwrap();

        assert!(!service.revoke(other, created.id).await.unwrap());
        assert!(service.resolve_user_id(&created.token).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn hash_depends_on_secret() {
        let harness = TestHarness::builder().build().await.unwrap();
        let a = ApiKeyService::new(harness.store.clone(), "one");
        let b = ApiKeyService::new(harness.store.clone(), "two");
        assert_ne!(a.hash_token("t").unwrap(), b.hash_token("t").unwrap());

        let created = a.create(harness.user_id, None).await.unwrap();
        assert_eq!(b.resolve_user_id(&created.token).await.unwrap(), None);
    }

    #[tokio::test]
    async fn unknown_token_resolves_to_none() {
        let harness = TestHarness::builder().build().await.unwrap();
        let service = ApiKeyService::new(harness.store.clone(), "secret");
        assert_eq!(service.resolve_user_id("deadbeef").await.unwrap(), None);
    }

    #[tokio::test]
    async fn create_for_unknown_user_is_not_found() {
        let harness = TestHarness::builder().build().await.unwrap();
        let service = ApiKeyService::new(harness.store.clone(), "secret");
        assert!(service.create(9999, None).await.unwrap_err().is_not_found());
    }
}
