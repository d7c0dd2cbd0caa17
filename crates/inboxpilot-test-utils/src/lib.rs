// SPDX-FileCopyrightText: 2026 InboxPilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared test utilities for InboxPilot.
//!
//! - [`MockProvider`]: scripted AI provider with call recording.
//! - [`TestHarness`]: temp SQLite store, default user and context builder.

pub mod harness;
pub mod mock_provider;

pub use harness::{TEST_USER_EMAIL, TestHarness, TestHarnessBuilder};
pub use mock_provider::{DEFAULT_MOCK_RESPONSE, MockProvider, RecordedCall};
