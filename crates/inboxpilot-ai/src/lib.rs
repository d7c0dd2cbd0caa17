// SPDX-FileCopyrightText: 2026 InboxPilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! AI gateway for InboxPilot.
//!
//! - [`build_provider`] resolves `ai.provider` to one backend at startup.
//! - [`EchoProvider`] is the offline deterministic backend (`mock`).
//! - [`AuditedGateway`] is what services call: it records every request and
//!   response in the user's audit log around the provider call.

pub mod audit;
pub mod echo;
pub mod factory;
pub mod tokens;

pub use audit::{AuditedGateway, AuditedGeneration};
pub use echo::EchoProvider;
pub use factory::build_provider;
pub use tokens::estimate_tokens;
