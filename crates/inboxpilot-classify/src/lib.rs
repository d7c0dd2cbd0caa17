// SPDX-FileCopyrightText: 2026 InboxPilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Message organization for InboxPilot.
//!
//! - [`RuleBasedClassifier`] matches category keywords against message text.
//! - [`CategorySuggester`] asks the AI gateway for categories and falls back
//!   to the rule classifier when the answer names none of them.
//! - [`TriageEngine`] scores recent messages by configured keywords.

pub mod classifier;
pub mod suggestion;
pub mod triage;

pub use classifier::RuleBasedClassifier;
pub use suggestion::{CategorySuggester, CategorySuggestions, SuggestionSource};
pub use triage::{Priority, TriageEngine, TriageItem};
