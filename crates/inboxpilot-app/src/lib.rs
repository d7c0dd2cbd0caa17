// SPDX-FileCopyrightText: 2026 InboxPilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Application services shared by the InboxPilot CLI and HTTP API.
//!
//! Start from [`AppContext::build`], then obtain a [`UserServices`] bundle per
//! request or command with [`AppContext::services_for_user`].

pub mod api_keys;
pub mod categories;
pub mod context;
pub mod fixtures;
pub mod ingestion;
pub mod meetings;
pub mod notes;
mod parents;
pub mod records;
pub mod tasks;
pub mod templates;

pub use api_keys::{ApiKeyService, CreatedApiKey};
pub use categories::CategoryService;
pub use context::{AppContext, UserServices};
pub use ingestion::IngestionService;
pub use meetings::MeetingService;
pub use notes::NoteService;
pub use records::{AuditService, ConnectionService, StatsService};
pub use tasks::TaskService;
pub use templates::{CategoryTemplate, TemplateService, find_template, list_templates};
