// SPDX-FileCopyrightText: 2026 InboxPilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Storage trait for the local inbox database.

use async_trait::async_trait;

use crate::error::InboxError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{
    AiRequest, AiResponse, ApiKey, Category, Connection, LoggedAiRequest, LoggedAiResponse,
    Meeting, Message, NewCategory, NewConnection, NewMeeting, NewMessage, NewNote, NewTask,
    NewUser, Note, ParentType, StatsSnapshot, Task, Transcript, User,
};

/// Persistence for every InboxPilot record.
///
/// Every operation that reads or writes user-owned data takes the owning
/// `user_id` and filters on it. Ingestion and category creation are
/// idempotent on their natural keys: a conflicting insert is a no-op that
/// returns the existing row's id.
#[async_trait]
pub trait InboxStore: PluginAdapter {
    /// Opens the backend and applies pending migrations.
    async fn initialize(&self) -> Result<(), InboxError>;

    /// Closes the backend, flushing pending writes.
    async fn close(&self) -> Result<(), InboxError>;

    // --- Users ---

    /// Returns the id of the user with this email, creating it if absent.
    async fn ensure_user(&self, user: &NewUser) -> Result<i64, InboxError>;

    async fn get_user(&self, id: i64) -> Result<Option<User>, InboxError>;

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, InboxError>;

    /// Lists every user. Administrative use only.
    async fn list_users(&self) -> Result<Vec<User>, InboxError>;

    // --- Messages ---

    /// Persists messages and returns their ids in input order.
    async fn save_messages(
        &self,
        messages: &[NewMessage],
        user_id: i64,
    ) -> Result<Vec<i64>, InboxError>;

    async fn get_message(&self, id: i64, user_id: i64) -> Result<Option<Message>, InboxError>;

    /// Most recent first.
    async fn list_messages(&self, limit: u32, user_id: i64) -> Result<Vec<Message>, InboxError>;

    /// Substring match over subject, body and snippet; most recent first.
    async fn search_messages(
        &self,
        query: &str,
        limit: u32,
        user_id: i64,
    ) -> Result<Vec<Message>, InboxError>;

    // --- Categories ---

    /// Creates a category, or returns the id of the existing one with the same name.
    async fn create_category(
        &self,
        category: &NewCategory,
        user_id: i64,
    ) -> Result<i64, InboxError>;

    async fn get_category(&self, id: i64, user_id: i64) -> Result<Option<Category>, InboxError>;

    /// Ordered by name.
    async fn list_categories(&self, user_id: i64) -> Result<Vec<Category>, InboxError>;

    /// Links a message to a category. Duplicate links are a no-op.
    async fn assign_category(&self, message_id: i64, category_id: i64) -> Result<(), InboxError>;

    /// Categories assigned to a message, ordered by name.
    async fn list_message_categories(
        &self,
        message_id: i64,
        user_id: i64,
    ) -> Result<Vec<Category>, InboxError>;

    // --- Meetings ---

    /// Persists meetings and returns their ids in input order.
    async fn save_meetings(
        &self,
        meetings: &[NewMeeting],
        user_id: i64,
    ) -> Result<Vec<i64>, InboxError>;

    async fn get_meeting(&self, id: i64, user_id: i64) -> Result<Option<Meeting>, InboxError>;

    /// Latest start time first.
    async fn list_meetings(&self, limit: u32, user_id: i64) -> Result<Vec<Meeting>, InboxError>;

    /// Substring match over title and participants.
    async fn search_meetings(
        &self,
        query: &str,
        limit: u32,
        user_id: i64,
    ) -> Result<Vec<Meeting>, InboxError>;

    /// Attaches transcript text to a meeting the caller has already resolved.
    async fn add_transcript(&self, meeting_id: i64, content: &str) -> Result<i64, InboxError>;

    /// Most recent transcript of a meeting owned by `user_id`.
    async fn get_meeting_transcript(
        &self,
        meeting_id: i64,
        user_id: i64,
    ) -> Result<Option<Transcript>, InboxError>;

    // --- Notes ---

    async fn add_note(&self, note: &NewNote, user_id: i64) -> Result<i64, InboxError>;

    /// Oldest first.
    async fn list_notes(
        &self,
        parent_type: ParentType,
        parent_id: i64,
        user_id: i64,
    ) -> Result<Vec<Note>, InboxError>;

    // --- Tasks ---

    async fn add_task(&self, task: &NewTask, user_id: i64) -> Result<i64, InboxError>;

    /// Oldest first.
    async fn list_tasks(
        &self,
        parent_type: ParentType,
        parent_id: i64,
        user_id: i64,
    ) -> Result<Vec<Task>, InboxError>;

    /// Every task for the user whose status is not `done`, oldest first.
    async fn list_open_tasks(&self, user_id: i64) -> Result<Vec<Task>, InboxError>;

    /// Returns false if no task with this id belongs to the user.
    async fn update_task_status(
        &self,
        task_id: i64,
        status: &str,
        user_id: i64,
    ) -> Result<bool, InboxError>;

    // --- AI audit ---

    async fn log_ai_request(&self, request: &AiRequest, user_id: i64) -> Result<i64, InboxError>;

    async fn log_ai_response(&self, response: &AiResponse) -> Result<i64, InboxError>;

    /// Newest first.
    async fn list_ai_requests(
        &self,
        limit: u32,
        user_id: i64,
    ) -> Result<Vec<LoggedAiRequest>, InboxError>;

    /// Newest first; only responses to the user's requests.
    async fn list_ai_responses(
        &self,
        limit: u32,
        user_id: i64,
    ) -> Result<Vec<LoggedAiResponse>, InboxError>;

    // --- Connections ---

    async fn add_connection(
        &self,
        connection: &NewConnection,
        user_id: i64,
    ) -> Result<i64, InboxError>;

    async fn list_connections(&self, user_id: i64) -> Result<Vec<Connection>, InboxError>;

    // --- API keys ---

    async fn create_api_key(
        &self,
        user_id: i64,
        label: Option<&str>,
        token_hash: &str,
    ) -> Result<i64, InboxError>;

    /// Owning user of the key with this hash.
    async fn resolve_api_key(&self, token_hash: &str) -> Result<Option<i64>, InboxError>;

    async fn list_api_keys(&self, user_id: i64) -> Result<Vec<ApiKey>, InboxError>;

    /// Returns false if no key with this id belongs to the user.
    async fn delete_api_key(&self, user_id: i64, key_id: i64) -> Result<bool, InboxError>;

    // --- Stats ---

    async fn stats(&self, user_id: i64) -> Result<StatsSnapshot, InboxError>;
}
