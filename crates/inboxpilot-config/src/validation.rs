// SPDX-FileCopyrightText: 2026 InboxPilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde attributes,
//! such as non-empty paths, usable bind hosts and non-blank keywords.

use crate::diagnostic::ConfigError;
use crate::model::InboxConfig;

/// Validate a deserialized configuration for semantic correctness.
///
/// Collects every failure instead of stopping at the first one.
pub fn validate_config(config: &InboxConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if config.storage.database_path.trim().is_empty() {
        errors.push(ConfigError::validation(
            "storage.database_path must not be empty",
        ));
    }

    if config.user.email.trim().is_empty() {
        errors.push(ConfigError::validation("user.email must not be empty"));
    }

    if config.ai.timeout_secs == 0 {
        errors.push(ConfigError::validation(
            "ai.timeout_secs must be at least 1",
        ));
    }

    for (key, url) in [
        ("ollama.base_url", &config.ollama.base_url),
        ("openai.base_url", &config.openai.base_url),
    ] {
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            errors.push(ConfigError::validation(format!(
                "{key} `{url}` must start with http:// or https://"
            )));
        }
    }

    for (key, keywords) in [
        ("triage.high_keywords", &config.triage.high_keywords),
        ("triage.medium_keywords", &config.triage.medium_keywords),
    ] {
        if keywords.iter().any(|k| k.trim().is_empty()) {
            errors.push(ConfigError::validation(format!(
                "{key} must not contain blank entries"
            )));
        }
    }

    let host = config.gateway.host.trim();
    if host.is_empty() {
        errors.push(ConfigError::validation("gateway.host must not be empty"));
    } else {
        let is_valid_ip = host.parse::<std::net::IpAddr>().is_ok();
        let is_valid_hostname = host
            .chars()
            .all(|c| c.is_alphanumeric() || c == '.' || c == '-');
        if !is_valid_ip && !is_valid_hostname {
            errors.push(ConfigError::validation(format!(
                "gateway.host `{host}` is not a valid IP address or hostname"
            )));
        }
    }

    if config.gateway.port == 0 {
        errors.push(ConfigError::validation("gateway.port must not be 0"));
    }

    if config.gateway.token_secret.trim().is_empty() {
        errors.push(ConfigError::validation(
            "gateway.token_secret must not be empty",
        ));
    }

    if let Some(key) = &config.gateway.api_key
        && key.trim().is_empty()
    {
        errors.push(ConfigError::validation(
            "gateway.api_key must not be blank when set",
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
