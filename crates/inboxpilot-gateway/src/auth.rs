// SPDX-FileCopyrightText: 2026 InboxPilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `X-API-Key` authentication middleware.
//!
//! Resolution order:
//! 1. the static `gateway.api_key`, which maps to the default user;
//! 2. a per-user key issued through `POST /api-keys`.
//!
//! Without a static key, a request that sends no header runs as the default
//! user. A header that resolves to nobody is always rejected.

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::Response,
};

use crate::server::GatewayState;

/// Header carrying the API key.
pub const API_KEY_HEADER: &str = "x-api-key";

/// The user a request was authenticated as. Inserted into request extensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser(pub i64);

/// Static key configuration.
#[derive(Clone, Default)]
pub struct AuthConfig {
    /// Static key for the default user. `None` enables local-first mode.
    pub static_key: Option<String>,
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("static_key", &self.static_key.as_ref().map(|_| "[redacted]"))
            .finish()
    }
}

pub async fn auth_middleware(
    State(state): State<GatewayState>,
    mut request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let presented = request
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);

    let user_id = match presented {
        None => {
            if state.auth.static_key.is_some() {
                tracing::debug!("request without API key rejected");
                return Err(StatusCode::UNAUTHORIZED);
            }
            state.app.default_user_id()
        }
        Some(key) => {
            if state.auth.static_key.as_deref() == Some(key.as_str()) {
                state.app.default_user_id()
            } else {
                match state.app.api_keys().resolve_user_id(&key).await {
                    Ok(Some(user_id)) => user_id,
                    Ok(None) => {
                        tracing::debug!("unknown API key rejected");
                        return Err(StatusCode::UNAUTHORIZED);
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "API key lookup failed");
                        return Err(StatusCode::INTERNAL_SERVER_ERROR);
                    }
                }
            }
        }
    };

    request.extensions_mut().insert(AuthenticatedUser(user_id));
    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_config_debug_redacts_key() {
        let config = AuthConfig {
            static_key: Some("super-secret".to_string()),
        };
        let debug = format!("{config:?}");
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("[redacted]"));
    }

    #[test]
    fn default_auth_config_has_no_static_key() {
        assert!(AuthConfig::default().static_key.is_none());
    }
}
