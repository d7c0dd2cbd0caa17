// SPDX-FileCopyrightText: 2026 InboxPilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for InboxPilot.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use inboxpilot_core::types::TriageKeywords;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Top-level InboxPilot configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable overrides.
/// All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct InboxConfig {
    /// Process-wide settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// The default local user.
    #[serde(default)]
    pub user: UserConfig,

    /// AI backend selection.
    #[serde(default)]
    pub ai: AiConfig,

    /// OpenAI chat-completion settings.
    #[serde(default)]
    pub openai: OpenAiConfig,

    /// Ollama local-inference settings.
    #[serde(default)]
    pub ollama: OllamaConfig,

    /// Storage backend settings.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Triage keyword lists.
    #[serde(default)]
    pub triage: TriageConfig,

    /// HTTP API settings.
    #[serde(default)]
    pub gateway: GatewayConfig,
}

/// Process-wide settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GeneralConfig {
    /// Log level used when `RUST_LOG` is not set.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// The user every CLI command runs as unless told otherwise.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct UserConfig {
    #[serde(default = "default_user_name")]
    pub name: String,

    #[serde(default = "default_user_email")]
    pub email: String,
}

impl Default for UserConfig {
    fn default() -> Self {
        Self {
            name: default_user_name(),
            email: default_user_email(),
        }
    }
}

fn default_user_name() -> String {
    "Local User".to_string()
}

fn default_user_email() -> String {
    "local@inboxpilot".to_string()
}

/// Which text-generation backend the AI gateway uses.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString, Deserialize, Serialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum AiProviderKind {
    /// Deterministic, offline echo backend.
    #[default]
    Mock,
    /// Local Ollama server.
    Ollama,
    /// OpenAI chat completions.
    Openai,
}

/// AI gateway configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AiConfig {
    #[serde(default)]
    pub provider: AiProviderKind,

    /// Request timeout for networked backends, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            provider: AiProviderKind::default(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    60
}

/// OpenAI API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct OpenAiConfig {
    /// API key. `None` falls back to the `OPENAI_API_KEY` environment variable.
    #[serde(default)]
    pub api_key: Option<String>,

    #[serde(default = "default_openai_model")]
    pub model: String,

    /// API root; `/chat/completions` is appended.
    #[serde(default = "default_openai_base_url")]
    pub base_url: String,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_openai_model(),
            base_url: default_openai_base_url(),
        }
    }
}

fn default_openai_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_openai_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

/// Ollama configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct OllamaConfig {
    #[serde(default = "default_ollama_url")]
    pub base_url: String,

    #[serde(default = "default_ollama_model")]
    pub model: String,
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            base_url: default_ollama_url(),
            model: default_ollama_model(),
        }
    }
}

fn default_ollama_url() -> String {
    "http://localhost:11434".to_string()
}

fn default_ollama_model() -> String {
    "llama3".to_string()
}

/// Storage backend configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_database_path")]
    pub database_path: String,

    /// Enable WAL (Write-Ahead Logging) mode for SQLite.
    #[serde(default = "default_wal_mode")]
    pub wal_mode: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            wal_mode: default_wal_mode(),
        }
    }
}

fn default_database_path() -> String {
    dirs::data_dir()
        .map(|p| p.join("inboxpilot").join("inboxpilot.db"))
        .unwrap_or_else(|| std::path::PathBuf::from("inboxpilot.db"))
        .to_string_lossy()
        .into_owned()
}

fn default_wal_mode() -> bool {
    true
}

/// Triage keyword configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TriageConfig {
    /// Any match adds 2 to a message's score.
    #[serde(default = "default_high_keywords")]
    pub high_keywords: Vec<String>,

    /// Any match adds 1 to a message's score.
    #[serde(default = "default_medium_keywords")]
    pub medium_keywords: Vec<String>,
}

impl Default for TriageConfig {
    fn default() -> Self {
        Self {
            high_keywords: default_high_keywords(),
            medium_keywords: default_medium_keywords(),
        }
    }
}

impl TriageConfig {
    /// The keyword lists in the shape the triage engine consumes.
    pub fn keywords(&self) -> TriageKeywords {
        TriageKeywords {
            high: self.high_keywords.clone(),
            medium: self.medium_keywords.clone(),
        }
    }
}

fn default_high_keywords() -> Vec<String> {
    ["urgent", "asap", "action required", "deadline", "follow up"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_medium_keywords() -> Vec<String> {
    ["review", "request", "question", "update", "meeting"]
        .into_iter()
        .map(String::from)
        .collect()
}

/// HTTP API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GatewayConfig {
    /// Host address to bind.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Static key that authenticates as the default user. `None` lets
    /// requests without an `X-API-Key` header through as the default user.
    #[serde(default)]
    pub api_key: Option<String>,

    /// HMAC secret used to hash per-user API keys.
    #[serde(default = "default_token_secret")]
    pub token_secret: String,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            api_key: None,
            token_secret: default_token_secret(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_token_secret() -> String {
    "inboxpilot-local-secret".to_string()
}
