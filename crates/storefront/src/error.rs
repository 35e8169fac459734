//! Errors raised by the API client.
//!
//! Stores never let an [`ApiError`] escape: they classify it (auth failure or
//! not), record a message and emit a notice. The type is public so that
//! callers using [`ApiClient`](crate::api::ApiClient) directly get the same
//! classification.

use reqwest::StatusCode;
use thiserror::Error;

/// Message shown when the server gave no reason of its own.
pub const GENERIC_FAILURE: &str = "Something went wrong. Please try again.";

/// Errors that can occur when calling the storefront API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP request failed before a response arrived.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body was not the expected JSON.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Endpoint path could not be joined onto the base URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The server refused the caller (401 or 403).
    #[error("Unauthorized ({status}): {}", .message.as_deref().unwrap_or("no message"))]
    Unauthorized {
        status: StatusCode,
        message: Option<String>,
    },

    /// Any other non-success status.
    #[error("Request failed ({status}): {}", .message.as_deref().unwrap_or("no message"))]
    Status {
        status: StatusCode,
        message: Option<String>,
    },

    /// A success envelope arrived without the `data` the call needs.
    #[error("Response contained no data")]
    MissingData,
}

impl ApiError {
    /// Build the error for a non-success status, classifying auth failures.
    #[must_use]
    pub fn from_status(status: StatusCode, message: Option<String>) -> Self {
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            Self::Unauthorized { status, message }
        } else {
            Self::Status { status, message }
        }
    }

    /// Whether this is an authorization/forbidden failure.
    #[must_use]
    pub const fn is_auth_failure(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }

    /// The HTTP status, when the server answered at all.
    #[must_use]
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Unauthorized { status, .. } | Self::Status { status, .. } => Some(*status),
            Self::Http(err) => err.status(),
            _ => None,
        }
    }

    /// Text suitable for a notice: the server's message, else a generic fallback.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Unauthorized {
                message: Some(message),
                ..
            }
            | Self::Status {
                message: Some(message),
                ..
            } if !message.trim().is_empty() => message.clone(),
            _ => GENERIC_FAILURE.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_statuses_are_classified() {
        assert!(ApiError::from_status(StatusCode::UNAUTHORIZED, None).is_auth_failure());
        assert!(ApiError::from_status(StatusCode::FORBIDDEN, None).is_auth_failure());
        assert!(!ApiError::from_status(StatusCode::NOT_FOUND, None).is_auth_failure());
        assert!(!ApiError::MissingData.is_auth_failure());
    }

    #[test]
    fn test_status_only_for_http_responses() {
        let err = ApiError::from_status(StatusCode::NOT_FOUND, None);
        assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
        assert_eq!(ApiError::MissingData.status(), None);
    }

    #[test]
    fn test_user_message_prefers_server_text() {
        let err = ApiError::from_status(
            StatusCode::UNPROCESSABLE_ENTITY,
            Some("Postal code is required".to_string()),
        );
        assert_eq!(err.user_message(), "Postal code is required");
    }

    #[test]
    fn test_user_message_falls_back() {
        let err = ApiError::from_status(StatusCode::INTERNAL_SERVER_ERROR, None);
        assert_eq!(err.user_message(), GENERIC_FAILURE);

        let err = ApiError::from_status(StatusCode::BAD_GATEWAY, Some("  ".to_string()));
        assert_eq!(err.user_message(), GENERIC_FAILURE);

        assert_eq!(ApiError::MissingData.user_message(), GENERIC_FAILURE);
    }

    #[test]
    fn test_error_display() {
        let err = ApiError::from_status(StatusCode::NOT_FOUND, Some("Address not found".into()));
        assert_eq!(err.to_string(), "Request failed (404 Not Found): Address not found");
        assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
    }
}
