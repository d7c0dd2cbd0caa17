// SPDX-FileCopyrightText: 2026 InboxPilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `inboxpilot serve` and process-wide tracing setup.

use inboxpilot_app::AppContext;
use inboxpilot_core::InboxError;
use inboxpilot_gateway::{GatewayState, ServerConfig, start_server};
use tracing::info;

/// Run the HTTP API until the process is stopped.
pub async fn run_serve(
    app: AppContext,
    host: Option<String>,
    port: Option<u16>,
) -> Result<(), InboxError> {
    let gateway = &app.config().gateway;
    let config = ServerConfig {
        host: host.unwrap_or_else(|| gateway.host.clone()),
        port: port.unwrap_or(gateway.port),
    };
    if config.port == 0 {
        return Err(InboxError::InvalidInput("port must be non-zero".into()));
    }

    info!(
        host = %config.host,
        port = config.port,
        default_user_id = app.default_user_id(),
        "starting InboxPilot API"
    );
    start_server(&config, GatewayState::from_app(app)).await
}

/// Logs go to stderr so command output on stdout stays clean.
pub fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("inboxpilot={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}
