// SPDX-FileCopyrightText: 2026 InboxPilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Maps [`InboxError`] onto HTTP status codes.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use inboxpilot_core::InboxError;
use serde::Serialize;

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error description.
    pub error: String,
}

/// Handler error wrapper.
#[derive(Debug)]
pub struct ApiError(pub InboxError);

impl From<InboxError> for ApiError {
    fn from(err: InboxError) -> Self {
        Self(err)
    }
}

impl ApiError {
    pub fn invalid(message: impl Into<String>) -> Self {
        Self(InboxError::InvalidInput(message.into()))
    }

    pub fn status(&self) -> StatusCode {
        match &self.0 {
            InboxError::NotFound { .. } => StatusCode::NOT_FOUND,
            InboxError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            InboxError::ProviderUnavailable { .. } => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::warn!(status = status.as_u16(), error = %self.0, "request failed");
        } else {
            tracing::debug!(status = status.as_u16(), error = %self.0, "request rejected");
        }
        (
            status,
            Json(ErrorResponse {
                error: self.0.to_string(),
            }),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_follow_error_kind() {
        let cases = [
            (InboxError::not_found("message", 1), StatusCode::NOT_FOUND),
            (InboxError::InvalidInput("x".into()), StatusCode::BAD_REQUEST),
            (InboxError::provider("ollama", "down"), StatusCode::BAD_GATEWAY),
            (
                InboxError::Internal("boom".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                InboxError::ConfigurationMissing {
                    key: "openai.api_key".into(),
                },
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, expected) in cases {
            assert_eq!(ApiError(err).status(), expected);
        }
    }
}
