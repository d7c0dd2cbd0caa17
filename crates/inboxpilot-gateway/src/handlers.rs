// SPDX-FileCopyrightText: 2026 InboxPilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP request handlers for the InboxPilot REST API.
//!
//! Every authenticated handler resolves a [`UserServices`] bundle for the
//! [`AuthenticatedUser`] placed in request extensions by the auth middleware.

use std::path::PathBuf;
use std::str::FromStr;

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
};
use inboxpilot_app::UserServices;
use inboxpilot_classify::{SuggestionSource, TriageItem};
use inboxpilot_core::{InboxError, ParentType};
use inboxpilot_core::types::{
    Category, Connection, LoggedAiRequest, LoggedAiResponse, Meeting, Message, NewConnection,
    Note, StatsSnapshot, Task,
};
use inboxpilot_insights::chat::DEFAULT_CONTEXT_MESSAGES;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::auth::AuthenticatedUser;
use crate::error::ApiError;
use crate::server::GatewayState;

/// Fixture read by `POST /ingest/mock` when no path is given.
pub const DEFAULT_MESSAGE_FIXTURE: &str = "data/mock_messages.json";
/// Fixture read by `POST /ingest/calendar-mock` when no path is given.
pub const DEFAULT_MEETING_FIXTURE: &str = "data/mock_meetings.json";

const MAX_INGEST_LIMIT: usize = 200;
const MAX_CHAT_LIMIT: u32 = 50;
const DEFAULT_LIST_LIMIT: u32 = 10;
const DEFAULT_TRIAGE_LIMIT: u32 = 20;
const DEFAULT_AUDIT_LIMIT: u32 = 20;

type ApiResult<T> = Result<Json<T>, ApiError>;

fn services(state: &GatewayState, user: AuthenticatedUser) -> UserServices {
    state.app.services_for_user(user.0)
}

fn parse_parent_type(raw: &str) -> Result<ParentType, ApiError> {
    ParentType::from_str(raw.trim())
        .map_err(|_| ApiError::invalid(format!("unknown parent_type '{raw}'")))
}

fn ok_status() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

// --- request bodies ---

fn default_ingest_limit() -> usize {
    5
}

fn default_chat_limit() -> u32 {
    DEFAULT_CONTEXT_MESSAGES
}

#[derive(Debug, Deserialize)]
pub struct IngestRequest {
    #[serde(default = "default_ingest_limit")]
    pub limit: usize,
    #[serde(default)]
    pub fixture_path: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CategoryCreateRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CategoryAssignRequest {
    pub message_id: i64,
    pub category_id: i64,
}

#[derive(Debug, Deserialize)]
pub struct MessageRequest {
    pub message_id: i64,
}

#[derive(Debug, Deserialize)]
pub struct MeetingRequest {
    pub meeting_id: i64,
}

#[derive(Debug, Deserialize)]
pub struct TemplateLoadRequest {
    pub template_name: String,
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub query: String,
    #[serde(default = "default_chat_limit")]
    pub limit: u32,
}

#[derive(Debug, Deserialize)]
pub struct DraftRequest {
    pub message_id: i64,
    pub instructions: String,
}

#[derive(Debug, Deserialize)]
pub struct NoteCreateRequest {
    pub parent_type: String,
    pub parent_id: i64,
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub struct TaskCreateRequest {
    pub parent_type: String,
    pub parent_id: i64,
    pub description: String,
}

#[derive(Debug, Deserialize)]
pub struct TaskUpdateRequest {
    pub task_id: i64,
    pub status: String,
}

#[derive(Debug, Deserialize)]
pub struct TranscriptRequest {
    pub meeting_id: i64,
    pub content: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct ApiKeyCreateRequest {
    #[serde(default)]
    pub label: Option<String>,
}

// --- query strings ---

#[derive(Debug, Deserialize)]
pub struct LimitQuery {
    pub limit: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct MeetingsQuery {
    pub limit: Option<u32>,
    pub query: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ParentQuery {
    pub parent_type: String,
    pub parent_id: i64,
}

// --- response bodies ---

/// A message in list responses; the body is omitted.
#[derive(Debug, Serialize)]
pub struct MessageListItem {
    pub id: i64,
    pub provider_message_id: String,
    pub subject: String,
    pub sender: String,
    pub recipients: String,
    pub timestamp: String,
    pub snippet: String,
}

impl From<Message> for MessageListItem {
    fn from(m: Message) -> Self {
        Self {
            id: m.id,
            provider_message_id: m.provider_message_id,
            subject: m.subject,
            sender: m.sender,
            recipients: m.recipients,
            timestamp: m.timestamp,
            snippet: m.snippet,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SuggestedCategory {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SuggestionResponse {
    pub source: SuggestionSource,
    pub categories: Vec<SuggestedCategory>,
}

#[derive(Debug, Serialize)]
pub struct TemplateSummary {
    pub name: &'static str,
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct ApiKeyView {
    pub id: i64,
    pub label: Option<String>,
    pub created_at: String,
}

#[derive(Debug, Serialize)]
pub struct CreatedKeyResponse {
    pub id: i64,
    pub token: String,
}

// --- public ---

/// GET /health
pub async fn get_health() -> Json<Value> {
    ok_status()
}

// --- ingestion ---

fn check_ingest_limit(limit: usize) -> Result<(), ApiError> {
    if limit == 0 || limit > MAX_INGEST_LIMIT {
        return Err(ApiError::invalid(format!(
            "limit must be between 1 and {MAX_INGEST_LIMIT}"
        )));
    }
    Ok(())
}

/// POST /ingest/mock
pub async fn post_ingest_mock(
    State(state): State<GatewayState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(body): Json<IngestRequest>,
) -> ApiResult<Value> {
    check_ingest_limit(body.limit)?;
    let path = PathBuf::from(body.fixture_path.as_deref().unwrap_or(DEFAULT_MESSAGE_FIXTURE));
    let ids = services(&state, user)
        .ingestion
        .ingest_message_fixture(&path, body.limit)
        .await?;
    Ok(Json(json!({ "ingested": ids.len() })))
}

/// POST /ingest/calendar-mock
pub async fn post_ingest_calendar_mock(
    State(state): State<GatewayState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(body): Json<IngestRequest>,
) -> ApiResult<Value> {
    check_ingest_limit(body.limit)?;
    let path = PathBuf::from(body.fixture_path.as_deref().unwrap_or(DEFAULT_MEETING_FIXTURE));
    let ids = services(&state, user)
        .ingestion
        .ingest_meeting_fixture(&path, body.limit)
        .await?;
    Ok(Json(json!({ "ingested": ids.len() })))
}

// --- messages ---

/// GET /messages?limit
pub async fn get_messages(
    State(state): State<GatewayState>,
    Extension(user): Extension<AuthenticatedUser>,
    Query(query): Query<LimitQuery>,
) -> ApiResult<Vec<MessageListItem>> {
    let messages = services(&state, user)
        .list_messages(query.limit.unwrap_or(DEFAULT_LIST_LIMIT))
        .await?;
    Ok(Json(messages.into_iter().map(MessageListItem::from).collect()))
}

/// GET /messages/{id}
pub async fn get_message(
    State(state): State<GatewayState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(message_id): Path<i64>,
) -> ApiResult<Message> {
    Ok(Json(services(&state, user).get_message(message_id).await?))
}

/// POST /messages/summary
pub async fn post_message_summary(
    State(state): State<GatewayState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(body): Json<MessageRequest>,
) -> ApiResult<Value> {
    let note_id = services(&state, user)
        .insights
        .summarize(body.message_id)
        .await?;
    Ok(Json(json!({ "note_id": note_id })))
}

/// POST /messages/follow-up
pub async fn post_follow_up(
    State(state): State<GatewayState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(body): Json<MessageRequest>,
) -> ApiResult<Value> {
    let follow_up = services(&state, user)
        .insights
        .follow_up(body.message_id)
        .await?;
    Ok(Json(json!({
        "note_id": follow_up.note_id,
        "suggestion": follow_up.suggestion,
    })))
}

// --- categories and templates ---

/// GET /categories
pub async fn get_categories(
    State(state): State<GatewayState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> ApiResult<Vec<Category>> {
    Ok(Json(services(&state, user).categories.list().await?))
}

/// POST /categories
pub async fn post_category(
    State(state): State<GatewayState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(body): Json<CategoryCreateRequest>,
) -> ApiResult<Value> {
    let id = services(&state, user)
        .categories
        .create(&body.name, body.description.as_deref())
        .await?;
    Ok(Json(json!({ "id": id })))
}

/// POST /categories/assign
pub async fn post_assign_category(
    State(state): State<GatewayState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(body): Json<CategoryAssignRequest>,
) -> ApiResult<Value> {
    services(&state, user)
        .categories
        .assign(body.message_id, body.category_id)
        .await?;
    Ok(ok_status())
}

/// POST /categories/suggest
pub async fn post_suggest_categories(
    State(state): State<GatewayState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(body): Json<MessageRequest>,
) -> ApiResult<SuggestionResponse> {
    let suggestions = services(&state, user)
        .categories
        .suggest(body.message_id)
        .await?;
    Ok(Json(SuggestionResponse {
        source: suggestions.source,
        categories: suggestions
            .categories
            .into_iter()
            .map(|c| SuggestedCategory {
                name: c.name,
                description: c.description,
            })
            .collect(),
    }))
}

/// GET /templates
pub async fn get_templates(
    State(state): State<GatewayState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Json<Vec<TemplateSummary>> {
    let templates = services(&state, user)
        .templates
        .list()
        .iter()
        .map(|t| TemplateSummary {
            name: t.name,
            count: t.categories.len(),
        })
        .collect();
    Json(templates)
}

/// POST /templates/load
pub async fn post_load_template(
    State(state): State<GatewayState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(body): Json<TemplateLoadRequest>,
) -> ApiResult<Value> {
    let created = services(&state, user)
        .templates
        .load(&body.template_name)
        .await?;
    Ok(Json(json!({ "created": created })))
}

// --- chat ---

/// POST /chat
pub async fn post_chat(
    State(state): State<GatewayState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(body): Json<ChatRequest>,
) -> ApiResult<Value> {
    if body.limit == 0 || body.limit > MAX_CHAT_LIMIT {
        return Err(ApiError::invalid(format!(
            "limit must be between 1 and {MAX_CHAT_LIMIT}"
        )));
    }
    let answer = services(&state, user)
        .chat
        .answer(&body.query, body.limit)
        .await?;
    Ok(Json(json!({ "answer": answer })))
}

/// POST /draft
pub async fn post_draft(
    State(state): State<GatewayState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(body): Json<DraftRequest>,
) -> ApiResult<Value> {
    let draft = services(&state, user)
        .chat
        .draft_reply(body.message_id, &body.instructions)
        .await?;
    Ok(Json(json!({ "draft": draft })))
}

// --- notes ---

/// GET /notes?parent_type&parent_id
pub async fn get_notes(
    State(state): State<GatewayState>,
    Extension(user): Extension<AuthenticatedUser>,
    Query(query): Query<ParentQuery>,
) -> ApiResult<Vec<Note>> {
    let parent_type = parse_parent_type(&query.parent_type)?;
    let notes = services(&state, user)
        .notes
        .list(parent_type, query.parent_id)
        .await?;
    Ok(Json(notes))
}

/// POST /notes
pub async fn post_note(
    State(state): State<GatewayState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(body): Json<NoteCreateRequest>,
) -> ApiResult<Value> {
    let parent_type = parse_parent_type(&body.parent_type)?;
    let id = services(&state, user)
        .notes
        .add(parent_type, body.parent_id, &body.content)
        .await?;
    Ok(Json(json!({ "id": id })))
}

// --- tasks ---

/// GET /tasks?parent_type&parent_id
pub async fn get_tasks(
    State(state): State<GatewayState>,
    Extension(user): Extension<AuthenticatedUser>,
    Query(query): Query<ParentQuery>,
) -> ApiResult<Vec<Task>> {
    let parent_type = parse_parent_type(&query.parent_type)?;
    let tasks = services(&state, user)
        .tasks
        .list(parent_type, query.parent_id)
        .await?;
    Ok(Json(tasks))
}

/// POST /tasks
pub async fn post_task(
    State(state): State<GatewayState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(body): Json<TaskCreateRequest>,
) -> ApiResult<Value> {
    let parent_type = parse_parent_type(&body.parent_type)?;
    let id = services(&state, user)
        .tasks
        .add(parent_type, body.parent_id, &body.description)
        .await?;
    Ok(Json(json!({ "id": id })))
}

/// POST /tasks/update
pub async fn post_update_task(
    State(state): State<GatewayState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(body): Json<TaskUpdateRequest>,
) -> ApiResult<Value> {
    services(&state, user)
        .tasks
        .update_status(body.task_id, &body.status)
        .await?;
    Ok(ok_status())
}

/// POST /tasks/extract
pub async fn post_extract_tasks(
    State(state): State<GatewayState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(body): Json<MessageRequest>,
) -> ApiResult<Value> {
    let ids = services(&state, user)
        .tasks
        .extract_from_message(body.message_id)
        .await?;
    Ok(Json(json!({ "created": ids.len() })))
}

/// POST /tasks/extract-meeting
pub async fn post_extract_meeting_tasks(
    State(state): State<GatewayState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(body): Json<MeetingRequest>,
) -> ApiResult<Value> {
    let ids = services(&state, user)
        .tasks
        .extract_from_meeting(body.meeting_id)
        .await?;
    Ok(Json(json!({ "created": ids.len() })))
}

// --- meetings ---

/// GET /meetings?limit&query
pub async fn get_meetings(
    State(state): State<GatewayState>,
    Extension(user): Extension<AuthenticatedUser>,
    Query(query): Query<MeetingsQuery>,
) -> ApiResult<Vec<Meeting>> {
    let limit = query.limit.unwrap_or(DEFAULT_LIST_LIMIT);
    let meetings = services(&state, user).meetings;
    let found = match query.query.as_deref().map(str::trim) {
        Some(q) if !q.is_empty() => meetings.search(q, limit).await?,
        _ => meetings.list(limit).await?,
    };
    Ok(Json(found))
}

/// POST /meetings/transcript
pub async fn post_transcript(
    State(state): State<GatewayState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(body): Json<TranscriptRequest>,
) -> ApiResult<Value> {
    let id = services(&state, user)
        .meetings
        .add_transcript(body.meeting_id, &body.content)
        .await?;
    Ok(Json(json!({ "status": "ok", "transcript_id": id })))
}

/// POST /meetings/summary
pub async fn post_meeting_summary(
    State(state): State<GatewayState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(body): Json<MeetingRequest>,
) -> ApiResult<Value> {
    let note_id = services(&state, user)
        .meeting_notes
        .summarize(body.meeting_id)
        .await?;
    Ok(Json(json!({ "note_id": note_id })))
}

// --- connections, stats, triage, audit ---

/// GET /connections
pub async fn get_connections(
    State(state): State<GatewayState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> ApiResult<Vec<Connection>> {
    Ok(Json(services(&state, user).connections.list().await?))
}

/// POST /connections
pub async fn post_connection(
    State(state): State<GatewayState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(body): Json<NewConnection>,
) -> ApiResult<Value> {
    let id = services(&state, user).connections.add(&body).await?;
    Ok(Json(json!({ "id": id })))
}

/// GET /stats
pub async fn get_stats(
    State(state): State<GatewayState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> ApiResult<StatsSnapshot> {
    Ok(Json(services(&state, user).stats.snapshot().await?))
}

/// GET /triage?limit
pub async fn get_triage(
    State(state): State<GatewayState>,
    Extension(user): Extension<AuthenticatedUser>,
    Query(query): Query<LimitQuery>,
) -> ApiResult<Vec<TriageItem>> {
    let items = services(&state, user)
        .triage
        .rank(query.limit.unwrap_or(DEFAULT_TRIAGE_LIMIT))
        .await?;
    Ok(Json(items))
}

/// GET /ai/requests?limit
pub async fn get_ai_requests(
    State(state): State<GatewayState>,
    Extension(user): Extension<AuthenticatedUser>,
    Query(query): Query<LimitQuery>,
) -> ApiResult<Vec<LoggedAiRequest>> {
    let requests = services(&state, user)
        .audit
        .recent_requests(query.limit.unwrap_or(DEFAULT_AUDIT_LIMIT))
        .await?;
    Ok(Json(requests))
}

/// GET /ai/responses?limit
pub async fn get_ai_responses(
    State(state): State<GatewayState>,
    Extension(user): Extension<AuthenticatedUser>,
    Query(query): Query<LimitQuery>,
) -> ApiResult<Vec<LoggedAiResponse>> {
    let responses = services(&state, user)
        .audit
        .recent_responses(query.limit.unwrap_or(DEFAULT_AUDIT_LIMIT))
        .await?;
    Ok(Json(responses))
}

// --- API keys ---

/// GET /api-keys
pub async fn get_api_keys(
    State(state): State<GatewayState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> ApiResult<Vec<ApiKeyView>> {
    let keys = state.app.api_keys().list(user.0).await?;
    Ok(Json(
        keys.into_iter()
            .map(|k| ApiKeyView {
                id: k.id,
                label: k.label,
                created_at: k.created_at,
            })
            .collect(),
    ))
}

/// POST /api-keys
pub async fn post_api_key(
    State(state): State<GatewayState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(body): Json<ApiKeyCreateRequest>,
) -> ApiResult<CreatedKeyResponse> {
    let created = state
        .app
        .api_keys()
        .create(user.0, body.label.as_deref())
        .await?;
    Ok(Json(CreatedKeyResponse {
        id: created.id,
        token: created.token,
    }))
}

/// DELETE /api-keys/{id}
pub async fn delete_api_key(
    State(state): State<GatewayState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(key_id): Path<i64>,
) -> ApiResult<Value> {
    if state.app.api_keys().revoke(user.0, key_id).await? {
        Ok(ok_status())
    } else {
        Err(InboxError::not_found("api key", key_id).into())
    }
}
