// SPDX-FileCopyrightText: 2026 InboxPilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gateway HTTP server built on axum.
//!
//! Sets up routes, middleware, and shared state for the API.

use axum::{
    Router, middleware as axum_middleware,
    routing::{delete, get, post},
};
use inboxpilot_app::AppContext;
use inboxpilot_core::InboxError;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::auth::{AuthConfig, auth_middleware};
use crate::handlers;

/// Shared state for axum request handlers.
#[derive(Clone)]
pub struct GatewayState {
    /// Application services and storage.
    pub app: AppContext,
    /// Authentication configuration.
    pub auth: AuthConfig,
}

impl GatewayState {
    /// State with the static key taken from `gateway.api_key`.
    pub fn from_app(app: AppContext) -> Self {
        let static_key = app
            .config()
            .gateway
            .api_key
            .clone()
            .filter(|k| !k.trim().is_empty());
        Self {
            app,
            auth: AuthConfig { static_key },
        }
    }
}

/// Gateway server configuration (mirrors `GatewayConfig` from inboxpilot-config).
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host address to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
}

/// Build the full router. `GET /health` is public; everything else passes
/// through [`auth_middleware`].
pub fn router(state: GatewayState) -> Router {
    let public_routes = Router::new().route("/health", get(handlers::get_health));

    let api_routes = Router::new()
        .route("/ingest/mock", post(handlers::post_ingest_mock))
        .route("/ingest/calendar-mock", post(handlers::post_ingest_calendar_mock))
        .route("/messages", get(handlers::get_messages))
        .route("/messages/{id}", get(handlers::get_message))
        .route("/messages/summary", post(handlers::post_message_summary))
        .route("/messages/follow-up", post(handlers::post_follow_up))
        .route(
            "/categories",
            get(handlers::get_categories).post(handlers::post_category),
        )
        .route("/categories/assign", post(handlers::post_assign_category))
        .route("/categories/suggest", post(handlers::post_suggest_categories))
        .route("/templates", get(handlers::get_templates))
        .route("/templates/load", post(handlers::post_load_template))
        .route("/chat", post(handlers::post_chat))
        .route("/draft", post(handlers::post_draft))
        .route("/notes", get(handlers::get_notes).post(handlers::post_note))
        .route("/tasks", get(handlers::get_tasks).post(handlers::post_task))
        .route("/tasks/update", post(handlers::post_update_task))
        .route("/tasks/extract", post(handlers::post_extract_tasks))
        .route(
            "/tasks/extract-meeting",
            post(handlers::post_extract_meeting_tasks),
        )
        .route("/meetings", get(handlers::get_meetings))
        .route("/meetings/transcript", post(handlers::post_transcript))
        .route("/meetings/summary", post(handlers::post_meeting_summary))
        .route(
            "/connections",
            get(handlers::get_connections).post(handlers::post_connection),
        )
        .route("/stats", get(handlers::get_stats))
        .route("/triage", get(handlers::get_triage))
        .route("/ai/requests", get(handlers::get_ai_requests))
        .route("/ai/responses", get(handlers::get_ai_responses))
        .route(
            "/api-keys",
            get(handlers::get_api_keys).post(handlers::post_api_key),
        )
        .route("/api-keys/{id}", delete(handlers::delete_api_key))
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ))
        .with_state(state);

    Router::new()
        .merge(public_routes)
        .merge(api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// Bind to the configured host:port and serve until the process exits.
pub async fn start_server(config: &ServerConfig, state: GatewayState) -> Result<(), InboxError> {
    let local_first = state.auth.static_key.is_none();
    let app = router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| InboxError::Internal(format!("failed to bind gateway to {addr}: {e}")))?;

    tracing::info!(local_first, "InboxPilot API listening on {addr}");

    axum::serve(listener, app)
        .await
        .map_err(|e| InboxError::Internal(format!("gateway server error: {e}")))?;

    Ok(())
}
