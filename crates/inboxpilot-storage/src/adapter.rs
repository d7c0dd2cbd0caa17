// SPDX-FileCopyrightText: 2026 InboxPilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite implementation of the InboxStore trait.

use async_trait::async_trait;
use tokio::sync::OnceCell;
use tracing::debug;

use inboxpilot_config::model::StorageConfig;
use inboxpilot_core::types::{
    AiRequest, AiResponse, ApiKey, Category, Connection, LoggedAiRequest, LoggedAiResponse,
    Meeting, Message, NewCategory, NewConnection, NewMeeting, NewMessage, NewNote, NewTask,
    NewUser, Note, StatsSnapshot, Task, Transcript, User,
};
use inboxpilot_core::{
    AdapterType, HealthStatus, InboxError, InboxStore, ParentType, PluginAdapter,
};

use crate::database::Database;
use crate::queries;

/// Path value that selects a private in-memory database.
pub const IN_MEMORY_PATH: &str = ":memory:";

/// SQLite-backed inbox store.
///
/// Wraps a [`Database`] handle and delegates all query operations to the
/// typed query modules. The database is lazily initialized on the first
/// call to [`InboxStore::initialize`].
pub struct SqliteStore {
    config: StorageConfig,
    db: OnceCell<Database>,
}

impl SqliteStore {
    /// Create a new SqliteStore with the given configuration.
    ///
    /// The database connection is not opened until [`InboxStore::initialize`] is called.
    pub fn new(config: StorageConfig) -> Self {
        Self {
            config,
            db: OnceCell::new(),
        }
    }

    /// A store backed by a private in-memory database.
    pub fn in_memory() -> Self {
        Self::new(StorageConfig {
            database_path: IN_MEMORY_PATH.to_string(),
            wal_mode: false,
        })
    }

    /// Returns a reference to the underlying Database, or an error if not initialized.
    fn db(&self) -> Result<&Database, InboxError> {
        self.db.get().ok_or_else(|| InboxError::Storage {
            source: "storage not initialized -- call initialize() first".into(),
        })
    }

    async fn checkpoint(&self, db: &Database) -> Result<(), InboxError> {
        if !self.config.wal_mode {
            return Ok(());
        }
        db.connection()
            .call(|conn| -> Result<(), rusqlite::Error> {
                conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
                Ok(())
            })
            .await
            .map_err(crate::database::map_tr_err)?;
        debug!("WAL checkpoint complete");
        Ok(())
    }
}

#[async_trait]
impl PluginAdapter for SqliteStore {
    fn name(&self) -> &str {
        "sqlite"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Storage
    }

    async fn health_check(&self) -> Result<HealthStatus, InboxError> {
        let db = self.db()?;
        db.connection()
            .call(|conn| -> Result<(), rusqlite::Error> {
                conn.execute_batch("SELECT 1;")?;
                Ok(())
            })
            .await
            .map_err(crate::database::map_tr_err)?;
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), InboxError> {
        if let Some(db) = self.db.get() {
            self.checkpoint(db).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl InboxStore for SqliteStore {
    async fn initialize(&self) -> Result<(), InboxError> {
        let path = self.config.database_path.as_str();
        let db = if path == IN_MEMORY_PATH {
            Database::open_in_memory().await?
        } else {
            Database::open(path, self.config.wal_mode).await?
        };
        self.db.set(db).map_err(|_| InboxError::Storage {
            source: "storage already initialized".into(),
        })?;
        debug!(path, "SQLite storage initialized");
        Ok(())
    }

    async fn close(&self) -> Result<(), InboxError> {
        let db = self.db()?;
        self.checkpoint(db).await
    }

    // --- Users ---

    async fn ensure_user(&self, user: &NewUser) -> Result<i64, InboxError> {
        queries::users::ensure_user(self.db()?, user).await
    }

    async fn get_user(&self, id: i64) -> Result<Option<User>, InboxError> {
        queries::users::get_user(self.db()?, id).await
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, InboxError> {
        queries::users::find_user_by_email(self.db()?, email).await
    }

    async fn list_users(&self) -> Result<Vec<User>, InboxError> {
        queries::users::list_users(self.db()?).await
    }

    // --- Messages ---

    async fn save_messages(
        &self,
        messages: &[NewMessage],
        user_id: i64,
    ) -> Result<Vec<i64>, InboxError> {
        queries::messages::save_messages(self.db()?, messages, user_id).await
    }

    async fn get_message(&self, id: i64, user_id: i64) -> Result<Option<Message>, InboxError> {
        queries::messages::get_message(self.db()?, id, user_id).await
    }

    async fn list_messages(&self, limit: u32, user_id: i64) -> Result<Vec<Message>, InboxError> {
        queries::messages::list_messages(self.db()?, limit, user_id).await
    }

    async fn search_messages(
        &self,
        query: &str,
        limit: u32,
        user_id: i64,
    ) -> Result<Vec<Message>, InboxError> {
        queries::messages::search_messages(self.db()?, query, limit, user_id).await
    }

    // --- Categories ---

    async fn create_category(
        &self,
        category: &NewCategory,
        user_id: i64,
    ) -> Result<i64, InboxError> {
        queries::categories::create_category(self.db()?, category, user_id).await
    }

    async fn get_category(&self, id: i64, user_id: i64) -> Result<Option<Category>, InboxError> {
        queries::categories::get_category(self.db()?, id, user_id).await
    }

    async fn list_categories(&self, user_id: i64) -> Result<Vec<Category>, InboxError> {
        queries::categories::list_categories(self.db()?, user_id).await
    }

    async fn assign_category(&self, message_id: i64, category_id: i64) -> Result<(), InboxError> {
        queries::categories::assign_category(self.db()?, message_id, category_id).await
    }

    async fn list_message_categories(
        &self,
        message_id: i64,
        user_id: i64,
    ) -> Result<Vec<Category>, InboxError> {
        queries::categories::list_message_categories(self.db()?, message_id, user_id).await
    }

    // --- Meetings ---

    async fn save_meetings(
        &self,
        meetings: &[NewMeeting],
        user_id: i64,
    ) -> Result<Vec<i64>, InboxError> {
        queries::meetings::save_meetings(self.db()?, meetings, user_id).await
    }

    async fn get_meeting(&self, id: i64, user_id: i64) -> Result<Option<Meeting>, InboxError> {
        queries::meetings::get_meeting(self.db()?, id, user_id).await
    }

    async fn list_meetings(&self, limit: u32, user_id: i64) -> Result<Vec<Meeting>, InboxError> {
        queries::meetings::list_meetings(self.db()?, limit, user_id).await
    }

    async fn search_meetings(
        &self,
        query: &str,
        limit: u32,
        user_id: i64,
    ) -> Result<Vec<Meeting>, InboxError> {
        queries::meetings::search_meetings(self.db()?, query, limit, user_id).await
    }

    async fn add_transcript(&self, meeting_id: i64, content: &str) -> Result<i64, InboxError> {
        queries::meetings::add_transcript(self.db()?, meeting_id, content).await
    }

    async fn get_meeting_transcript(
        &self,
        meeting_id: i64,
        user_id: i64,
    ) -> Result<Option<Transcript>, InboxError> {
        queries::meetings::get_meeting_transcript(self.db()?, meeting_id, user_id).await
    }

    // --- Notes ---

    async fn add_note(&self, note: &NewNote, user_id: i64) -> Result<i64, InboxError> {
        queries::notes::add_note(self.db()?, note, user_id).await
    }

    async fn list_notes(
        &self,
        parent_type: ParentType,
        parent_id: i64,
        user_id: i64,
    ) -> Result<Vec<Note>, InboxError> {
        queries::notes::list_notes(self.db()?, parent_type, parent_id, user_id).await
    }

    // --- Tasks ---

    async fn add_task(&self, task: &NewTask, user_id: i64) -> Result<i64, InboxError> {
        queries::tasks::add_task(self.db()?, task, user_id).await
    }

    async fn list_tasks(
        &self,
        parent_type: ParentType,
        parent_id: i64,
        user_id: i64,
    ) -> Result<Vec<Task>, InboxError> {
        queries::tasks::list_tasks(self.db()?, parent_type, parent_id, user_id).await
    }

    async fn list_open_tasks(&self, user_id: i64) -> Result<Vec<Task>, InboxError> {
        queries::tasks::list_open_tasks(self.db()?, user_id).await
    }

    async fn update_task_status(
        &self,
        task_id: i64,
        status: &str,
        user_id: i64,
    ) -> Result<bool, InboxError> {
        queries::tasks::update_task_status(self.db()?, task_id, status, user_id).await
    }

    // --- AI audit ---

    async fn log_ai_request(&self, request: &AiRequest, user_id: i64) -> Result<i64, InboxError> {
        queries::ai_audit::log_ai_request(self.db()?, request, user_id).await
    }

    async fn log_ai_response(&self, response: &AiResponse) -> Result<i64, InboxError> {
        queries::ai_audit::log_ai_response(self.db()?, response).await
    }

    async fn list_ai_requests(
        &self,
        limit: u32,
        user_id: i64,
    ) -> Result<Vec<LoggedAiRequest>, InboxError> {
        queries::ai_audit::list_ai_requests(self.db()?, limit, user_id).await
    }

    async fn list_ai_responses(
        &self,
        limit: u32,
        user_id: i64,
    ) -> Result<Vec<LoggedAiResponse>, InboxError> {
        queries::ai_audit::list_ai_responses(self.db()?, limit, user_id).await
    }

    // --- Connections ---

    async fn add_connection(
        &self,
        connection: &NewConnection,
        user_id: i64,
    ) -> Result<i64, InboxError> {
        queries::connections::add_connection(self.db()?, connection, user_id).await
    }

    async fn list_connections(&self, user_id: i64) -> Result<Vec<Connection>, InboxError> {
        queries::connections::list_connections(self.db()?, user_id).await
    }

    // --- API keys ---

    async fn create_api_key(
        &self,
        user_id: i64,
        label: Option<&str>,
        token_hash: &str,
    ) -> Result<i64, InboxError> {
        queries::api_keys::create_api_key(self.db()?, user_id, label, token_hash).await
    }

    async fn resolve_api_key(&self, token_hash: &str) -> Result<Option<i64>, InboxError> {
        queries::api_keys::resolve_api_key(self.db()?, token_hash).await
    }

    async fn list_api_keys(&self, user_id: i64) -> Result<Vec<ApiKey>, InboxError> {
        queries::api_keys::list_api_keys(self.db()?, user_id).await
    }

    async fn delete_api_key(&self, user_id: i64, key_id: i64) -> Result<bool, InboxError> {
        queries::api_keys::delete_api_key(self.db()?, user_id, key_id).await
    }

    // --- Stats ---

    async fn stats(&self, user_id: i64) -> Result<StatsSnapshot, InboxError> {
        queries::stats::stats(self.db()?, user_id).await
    }
}
