// SPDX-FileCopyrightText: 2026 InboxPilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain records shared by storage, the AI gateway and the services.
//!
//! `New*` structs are what callers hand to the store; the plain-named structs
//! are rows read back, carrying their internal ids.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Timestamp format used for every persisted `created_at`/`timestamp` column.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

/// Status assigned to tasks that were created without an explicit one.
pub const DEFAULT_TASK_STATUS: &str = "open";

/// Current UTC time rendered with [`TIMESTAMP_FORMAT`].
pub fn now_timestamp() -> String {
    chrono::Utc::now().format(TIMESTAMP_FORMAT).to_string()
}

/// Health status reported by adapter health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Adapter is fully operational.
    Healthy,
    /// Adapter is operational but experiencing issues.
    Degraded(String),
    /// Adapter is not operational.
    Unhealthy(String),
}

/// Identifies the kind of adapter.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
pub enum AdapterType {
    Provider,
    Storage,
}

// --- Users ---

/// A user to create or look up by email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    pub display_name: String,
    pub email: String,
}

/// A stored user; the isolation boundary for every other record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub display_name: String,
    pub email: String,
    pub created_at: String,
}

// --- Messages ---

/// An ingested email, keyed by the provider-assigned id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewMessage {
    pub provider_message_id: String,
    pub subject: String,
    pub sender: String,
    pub recipients: String,
    pub timestamp: String,
    pub snippet: String,
    pub body: String,
}

/// A stored email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: i64,
    pub user_id: i64,
    pub provider_message_id: String,
    pub subject: String,
    pub sender: String,
    pub recipients: String,
    pub timestamp: String,
    pub snippet: String,
    pub body: String,
}

// --- Categories ---

/// A user-defined label. The description doubles as classifier keywords.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCategory {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl NewCategory {
    pub fn new(name: impl Into<String>, description: Option<&str>) -> Self {
        Self {
            name: name.into(),
            description: description.map(str::to_string),
        }
    }
}

/// A stored category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
}

// --- Meetings ---

/// An ingested calendar event, keyed by the provider-assigned id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewMeeting {
    pub provider_event_id: String,
    pub title: String,
    pub participants: String,
    pub start_time: String,
    pub end_time: String,
    #[serde(default)]
    pub transcript_ref: Option<String>,
}

/// A stored calendar event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meeting {
    pub id: i64,
    pub user_id: i64,
    pub provider_event_id: String,
    pub title: String,
    pub participants: String,
    pub start_time: String,
    pub end_time: String,
    pub transcript_ref: Option<String>,
}

/// Transcript text attached to a meeting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transcript {
    pub id: i64,
    pub meeting_id: i64,
    pub content: String,
    pub created_at: String,
}

// --- Notes and tasks ---

/// What a note or task hangs off.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ParentType {
    Message,
    Meeting,
}

/// A note to append.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewNote {
    pub parent_type: ParentType,
    pub parent_id: i64,
    pub content: String,
}

/// A stored note. Notes are append-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: i64,
    pub parent_type: ParentType,
    pub parent_id: i64,
    pub content: String,
    pub created_at: String,
}

/// A task to create.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTask {
    pub parent_type: ParentType,
    pub parent_id: i64,
    pub description: String,
    pub status: String,
    pub due_date: Option<String>,
}

impl NewTask {
    /// An open task with no due date.
    pub fn open(parent_type: ParentType, parent_id: i64, description: impl Into<String>) -> Self {
        Self {
            parent_type,
            parent_id,
            description: description.into(),
            status: DEFAULT_TASK_STATUS.to_string(),
            due_date: None,
        }
    }
}

/// A stored task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    pub parent_type: ParentType,
    pub parent_id: i64,
    pub description: String,
    pub status: String,
    pub due_date: Option<String>,
    pub created_at: String,
}

// --- AI audit ---

/// Text returned by an AI backend together with the measured wall-clock latency.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generation {
    pub text: String,
    pub latency_ms: u64,
}

/// One AI invocation as it is about to be sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AiRequest {
    pub provider: String,
    pub model: String,
    pub prompt: String,
    pub purpose: String,
    pub timestamp: String,
}

impl AiRequest {
    /// Build a request record stamped with the current time.
    pub fn new(provider: &str, model: &str, prompt: &str, purpose: &str) -> Self {
        Self {
            provider: provider.to_string(),
            model: model.to_string(),
            prompt: prompt.to_string(),
            purpose: purpose.to_string(),
            timestamp: now_timestamp(),
        }
    }
}

/// A stored AI request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggedAiRequest {
    pub id: i64,
    pub provider: String,
    pub model: String,
    pub prompt: String,
    pub purpose: String,
    pub timestamp: String,
}

/// The response paired with a logged request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AiResponse {
    pub request_id: i64,
    pub response_text: String,
    pub latency_ms: u64,
    pub token_estimate: u64,
}

/// A stored AI response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggedAiResponse {
    pub id: i64,
    pub request_id: i64,
    pub response_text: String,
    pub latency_ms: u64,
    pub token_estimate: u64,
}

// --- Connections and API keys ---

/// A linked external source (mailbox, calendar).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewConnection {
    pub provider_type: String,
    pub provider_name: String,
    pub status: String,
    #[serde(default)]
    pub details: Option<String>,
}

/// A stored connection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connection {
    pub id: i64,
    pub provider_type: String,
    pub provider_name: String,
    pub status: String,
    pub details: Option<String>,
    pub created_at: String,
}

/// A stored API key. Only the token hash is ever persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiKey {
    pub id: i64,
    pub user_id: i64,
    pub label: Option<String>,
    pub token_hash: String,
    pub created_at: String,
}

/// Per-user record counts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsSnapshot {
    pub messages: u64,
    pub meetings: u64,
    pub categories: u64,
    pub tasks: u64,
    pub notes: u64,
}

// --- Triage ---

/// Keyword lists used to score messages. Supplied by configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriageKeywords {
    pub high: Vec<String>,
    pub medium: Vec<String>,
}
