// SPDX-FileCopyrightText: 2026 InboxPilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the InboxPilot configuration system.

use inboxpilot_config::diagnostic::ConfigError;
use inboxpilot_config::model::{AiProviderKind, InboxConfig};
use inboxpilot_config::{load_and_validate_path, load_and_validate_str, load_config_from_str};

/// Valid TOML with every section deserializes successfully.
#[test]
fn valid_toml_deserializes_into_inbox_config() {
    let toml = r#"
[general]
log_level = "debug"

[user]
name = "Dana"
email = "dana@example.com"

[ai]
provider = "openai"
timeout_secs = 30

[openai]
api_key = "sk-test"
model = "gpt-4o"

[ollama]
base_url = "http://10.0.0.5:11434"
model = "mistral"

[storage]
database_path = "/tmp/inboxpilot-test.db"
wal_mode = false

[triage]
high_keywords = ["urgent"]
medium_keywords = ["review", "invoice"]

[gateway]
host = "0.0.0.0"
port = 9000
api_key = "static-key"
token_secret = "s3cret"
"#;

    let config = load_config_from_str(toml).expect("valid TOML should deserialize");
    assert_eq!(config.general.log_level, "debug");
    assert_eq!(config.user.email, "dana@example.com");
    assert_eq!(config.ai.provider, AiProviderKind::Openai);
    assert_eq!(config.ai.timeout_secs, 30);
    assert_eq!(config.openai.api_key.as_deref(), Some("sk-test"));
    assert_eq!(config.openai.model, "gpt-4o");
    assert_eq!(config.ollama.model, "mistral");
    assert_eq!(config.storage.database_path, "/tmp/inboxpilot-test.db");
    assert!(!config.storage.wal_mode);
    assert_eq!(config.triage.high_keywords, vec!["urgent"]);
    assert_eq!(config.triage.keywords().medium, vec!["review", "invoice"]);
    assert_eq!(config.gateway.port, 9000);
    assert_eq!(config.gateway.api_key.as_deref(), Some("static-key"));
}

/// An empty document yields the compiled defaults.
#[test]
fn empty_toml_uses_defaults() {
    let config = load_config_from_str("").expect("empty TOML is valid");
    assert_eq!(config.ai.provider, AiProviderKind::Mock);
    assert_eq!(config.ai.timeout_secs, 60);
    assert_eq!(config.user.name, "Local User");
    assert_eq!(config.user.email, "local@inboxpilot");
    assert_eq!(config.openai.model, "gpt-4o-mini");
    assert_eq!(config.ollama.base_url, "http://localhost:11434");
    assert_eq!(config.ollama.model, "llama3");
    assert_eq!(config.gateway.host, "127.0.0.1");
    assert_eq!(config.gateway.port, 8000);
    assert!(config.gateway.api_key.is_none());
    assert_eq!(
        config.triage.high_keywords,
        vec!["urgent", "asap", "action required", "deadline", "follow up"]
    );
    assert_eq!(
        config.triage.medium_keywords,
        vec!["review", "request", "question", "update", "meeting"]
    );
}

/// Unknown key in [ai] produces an UnknownKey diagnostic with a suggestion.
#[test]
fn unknown_key_in_ai_suggests_correction() {
    let toml = r#"
[ai]
provder = "mock"
"#;

    let errors = load_and_validate_str(toml).unwrap_err();
    assert_eq!(errors.len(), 1);
    match &errors[0] {
        ConfigError::UnknownKey {
            key, suggestion, ..
        } => {
            assert!(key.ends_with("provder"), "got: {key}");
            assert_eq!(suggestion.as_deref(), Some("provider"));
        }
        other => panic!("expected UnknownKey, got {other:?}"),
    }
}

/// Unknown top-level section is rejected.
#[test]
fn unknown_section_is_rejected() {
    let toml = r#"
[imap]
host = "imap.example.com"
"#;

    let errors = load_and_validate_str(toml).unwrap_err();
    assert!(matches!(errors[0], ConfigError::UnknownKey { .. }));
}

/// An unsupported provider name produces an InvalidValue diagnostic.
#[test]
fn unknown_provider_is_invalid_value() {
    let toml = r#"
[ai]
provider = "anthropic"
"#;

    let errors = load_and_validate_str(toml).unwrap_err();
    match &errors[0] {
        ConfigError::InvalidValue { detail, .. } => {
            assert!(detail.contains("anthropic"), "got: {detail}");
        }
        other => panic!("expected InvalidValue, got {other:?}"),
    }
}

/// A string where a number belongs is an InvalidValue diagnostic.
#[test]
fn wrong_type_is_invalid_value() {
    let toml = r#"
[gateway]
port = "eighty"
"#;

    let errors = load_and_validate_str(toml).unwrap_err();
    assert!(matches!(errors[0], ConfigError::InvalidValue { .. }));
}

/// Semantic validation runs after a successful parse.
#[test]
fn validation_errors_surface_through_load_and_validate() {
    let toml = r#"
[storage]
database_path = ""
"#;

    let errors = load_and_validate_str(toml).unwrap_err();
    assert!(matches!(errors[0], ConfigError::Validation { .. }));
}

/// An explicit file path is honored.
#[test]
fn load_from_explicit_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("custom.toml");
    std::fs::write(&path, "[ai]\nprovider = \"ollama\"\n").unwrap();

    let config: InboxConfig = load_and_validate_path(&path).expect("file should load");
    assert_eq!(config.ai.provider, AiProviderKind::Ollama);
}
