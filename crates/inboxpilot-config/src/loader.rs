// SPDX-FileCopyrightText: 2026 InboxPilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./inboxpilot.toml` > `~/.config/inboxpilot/inboxpilot.toml`
//! > `/etc/inboxpilot/inboxpilot.toml` with environment variable overrides via
//! the `INBOXPILOT_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::InboxConfig;

/// Config file name looked up in every directory of the hierarchy.
pub const CONFIG_FILE_NAME: &str = "inboxpilot.toml";

/// System-wide config path.
pub const SYSTEM_CONFIG_PATH: &str = "/etc/inboxpilot/inboxpilot.toml";

/// Sections that environment variables may address, e.g.
/// `INBOXPILOT_OPENAI_API_KEY` -> `openai.api_key`.
const ENV_SECTIONS: &[&str] = &[
    "general", "user", "ai", "openai", "ollama", "storage", "triage", "gateway",
];

/// Per-user XDG config path, if the platform has a config directory.
pub fn user_config_path() -> Option<std::path::PathBuf> {
    dirs::config_dir().map(|d| d.join("inboxpilot").join(CONFIG_FILE_NAME))
}

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/inboxpilot/inboxpilot.toml`
/// 3. `~/.config/inboxpilot/inboxpilot.toml`
/// 4. `./inboxpilot.toml`
/// 5. `INBOXPILOT_*` environment variables
pub fn load_config() -> Result<InboxConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no files, no env).
pub fn load_config_from_str(toml_content: &str) -> Result<InboxConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(InboxConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from one explicit file with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<InboxConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(InboxConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the layered Figment before extraction.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(InboxConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG_PATH))
        .merge(Toml::file(user_config_path().unwrap_or_default()))
        .merge(Toml::file(CONFIG_FILE_NAME))
        .merge(env_provider())
}

/// Environment provider mapping the first `_`-separated segment to a section.
///
/// Uses `Env::map()` rather than `Env::split("_")` so keys that contain
/// underscores survive: `INBOXPILOT_TRIAGE_HIGH_KEYWORDS` maps to
/// `triage.high_keywords`, not `triage.high.keywords`.
fn env_provider() -> Env {
    Env::prefixed("INBOXPILOT_").map(|key| map_env_key(key.as_str()).into())
}

/// Maps a lowercased, prefix-stripped env key onto a dotted config path.
pub(crate) fn map_env_key(key: &str) -> String {
    for section in ENV_SECTIONS {
        if let Some(rest) = key.strip_prefix(section).and_then(|r| r.strip_prefix('_')) {
            return format!("{section}.{rest}");
        }
    }
    key.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::AiProviderKind;

    #[test]
    fn env_key_maps_first_segment_only() {
        assert_eq!(map_env_key("openai_api_key"), "openai.api_key");
        assert_eq!(map_env_key("triage_high_keywords"), "triage.high_keywords");
        assert_eq!(map_env_key("storage_database_path"), "storage.database_path");
        assert_eq!(map_env_key("ai_provider"), "ai.provider");
    }

    #[test]
    fn env_key_without_section_is_untouched() {
        assert_eq!(map_env_key("unknown"), "unknown");
    }

    #[test]
    fn env_overrides_file_values() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                CONFIG_FILE_NAME,
                r#"
[ai]
provider = "ollama"

[storage]
database_path = "from-file.db"
"#,
            )?;
            jail.set_env("INBOXPILOT_STORAGE_DATABASE_PATH", "from-env.db");
            jail.set_env("INBOXPILOT_OLLAMA_MODEL", "mistral");

            let config = load_config_from_path(Path::new(CONFIG_FILE_NAME))?;
            assert_eq!(config.ai.provider, AiProviderKind::Ollama);
            assert_eq!(config.storage.database_path, "from-env.db");
            assert_eq!(config.ollama.model, "mistral");
            Ok(())
        });
    }
}
