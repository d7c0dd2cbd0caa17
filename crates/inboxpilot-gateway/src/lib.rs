// SPDX-FileCopyrightText: 2026 InboxPilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP API for InboxPilot.
//!
//! JSON REST endpoints over the application services, authenticated with the
//! `X-API-Key` header.

pub mod auth;
pub mod error;
pub mod handlers;
pub mod server;

pub use auth::{AuthConfig, AuthenticatedUser};
pub use error::{ApiError, ErrorResponse};
pub use server::{GatewayState, ServerConfig, router, start_server};
