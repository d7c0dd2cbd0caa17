// SPDX-FileCopyrightText: 2026 InboxPilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! AI-derived insights over stored messages and meetings.
//!
//! Every generation goes through [`inboxpilot_ai::AuditedGateway`], so each
//! call here leaves a request/response pair in the user's audit log.

pub mod chat;
pub mod parse;
pub mod prompts;
pub mod summaries;
pub mod tasks;

pub use chat::ChatAssistant;
pub use parse::parse_item_lines;
pub use summaries::{FollowUp, MeetingNotes, MessageInsights};
pub use tasks::TaskExtractor;
