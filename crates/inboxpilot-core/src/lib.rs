// SPDX-FileCopyrightText: 2026 InboxPilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for InboxPilot.
//!
//! This crate provides the error taxonomy, the domain records, and the two
//! adapter traits everything else is built on: [`InboxStore`] for the local
//! database and [`AiProvider`] for text generation.

pub mod context;
pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use context::UserContext;
pub use error::InboxError;
pub use types::{AdapterType, HealthStatus, ParentType};

pub use traits::{AiProvider, InboxStore, PluginAdapter};
