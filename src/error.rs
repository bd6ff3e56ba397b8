//! Error types for the Freshdesk MCP server.
//!
//! This module defines `FreshdeskError`, the unified error type used throughout
//! the crate for consistent error handling and propagation.
//!
//! # Security
//!
//! All error messages are sanitized to ensure API keys are never leaked
//! in logs or error responses. Use `sanitize_message()` when constructing
//! error messages from external sources.

use std::time::Duration;
use thiserror::Error;

/// Unified error type for all Freshdesk operations.
///
/// Each variant provides specific context about the failure, enabling
/// meaningful error messages without leaking sensitive information
/// like API keys.
#[derive(Error, Debug)]
pub enum FreshdeskError {
    /// Configuration error - missing or invalid environment variables.
    #[error("configuration error: {0}")]
    Config(String),

    /// HTTP request failed during transmission.
    #[error("HTTP request failed: {0}")]
    Http(#[source] reqwest::Error),

    /// HTTP client initialization failed.
    #[error("HTTP client error: {0}")]
    HttpClient(#[source] reqwest::Error),

    /// Freshdesk answered with a non-success status code.
    #[error("{message}")]
    Remote {
        /// The HTTP status code returned.
        status: reqwest::StatusCode,
        /// Human-readable description of the failure.
        message: String,
        /// Decoded JSON error body, when the server sent one.
        details: Option<serde_json::Value>,
        /// The search query that was sent, for search endpoints.
        query: Option<String>,
    },

    /// Request timed out.
    #[error("request timed out after {duration:?} - the server may be slow or unreachable")]
    Timeout {
        /// How long we waited before timing out.
        duration: Duration,
        /// The operation that timed out.
        operation: String,
    },

    /// Rate limited by the server (HTTP 429).
    #[error("rate limited by Freshdesk - please wait before retrying")]
    RateLimited {
        /// Suggested retry delay, if provided by server.
        retry_after: Option<Duration>,
    },

    /// JSON serialization or deserialization failed.
    #[error("JSON serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Requested resource was not found.
    #[error("{resource} not found")]
    NotFound {
        /// Description of the missing resource (e.g. "ticket 42").
        resource: String,
    },

    /// Authentication failed - likely an invalid API key.
    #[error("authentication failed - check FRESHDESK_API_KEY")]
    Authentication,

    /// Input validation failed.
    #[error("validation error: {0}")]
    Validation(String),

    /// A search condition value is not null, a string, a number or a boolean.
    #[error("unsupported value type for search condition: {0}")]
    UnsupportedValueType(String),
}

impl FreshdeskError {
    /// Creates a configuration error for a missing environment variable.
    pub fn missing_env(var_name: &str) -> Self {
        FreshdeskError::Config(format!(
            "missing required environment variable: {}",
            var_name
        ))
    }

    /// Creates a configuration error for an invalid value.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        FreshdeskError::Config(message.into())
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        FreshdeskError::Validation(message.into())
    }

    /// Creates a not found error for a resource description.
    pub fn not_found(resource: impl Into<String>) -> Self {
        FreshdeskError::NotFound {
            resource: resource.into(),
        }
    }

    /// Creates a timeout error.
    pub fn timeout(duration: Duration, operation: impl Into<String>) -> Self {
        FreshdeskError::Timeout {
            duration,
            operation: operation.into(),
        }
    }

    /// Creates a remote error without a decoded body or query.
    pub fn remote(status: reqwest::StatusCode, message: impl Into<String>) -> Self {
        FreshdeskError::Remote {
            status,
            message: message.into(),
            details: None,
            query: None,
        }
    }

    /// Attaches the search query that was sent to a remote error.
    ///
    /// Other variants are returned unchanged.
    #[must_use]
    pub fn with_query(self, sent: &str) -> Self {
        match self {
            FreshdeskError::Remote {
                status,
                message,
                details,
                ..
            } => FreshdeskError::Remote {
                status,
                message,
                details,
                query: Some(sent.to_string()),
            },
            other => other,
        }
    }

    /// Returns the search query attached to this error, if any.
    pub fn query(&self) -> Option<&str> {
        match self {
            FreshdeskError::Remote { query, .. } => query.as_deref(),
            _ => None,
        }
    }

    /// Returns true if this is a rate limit error, indicating the caller should back off.
    #[must_use]
    pub fn is_rate_limit(&self) -> bool {
        matches!(self, FreshdeskError::RateLimited { .. })
            || matches!(self, FreshdeskError::Remote { status, .. } if status.as_u16() == 429)
    }

    /// Returns true for errors caused by the caller's input rather than the remote side.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            FreshdeskError::Validation(_) | FreshdeskError::UnsupportedValueType(_)
        )
    }

    /// Sanitizes an error message to remove any occurrence of the API key.
    ///
    /// API keys must never appear in logs, error messages, or tool responses.
    ///
    /// # Arguments
    ///
    /// * `message` - The message to sanitize
    /// * `api_key` - The API key to strip from the message
    ///
    /// # Returns
    ///
    /// The message with any occurrence of the API key replaced with `[REDACTED]`
    #[must_use]
    pub fn sanitize_message(message: &str, api_key: &str) -> String {
        if api_key.is_empty() {
            return message.to_string();
        }
        message.replace(api_key, "[REDACTED]")
    }

    /// Creates a sanitized version of this error's display message.
    ///
    /// Remote errors also include the decoded error body and the query that
    /// was sent, since those are what make a rejected search diagnosable.
    #[must_use]
    pub fn sanitized_display(&self, api_key: &str) -> String {
        let mut message = self.to_string();
        if let FreshdeskError::Remote { details, query, .. } = self {
            if let Some(details) = details {
                message.push_str(&format!(" | details: {}", details));
            }
            if let Some(query) = query {
                message.push_str(&format!(" | query: {}", query));
            }
        }
        Self::sanitize_message(&message, api_key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn test_missing_env_error() {
        let err = FreshdeskError::missing_env("FRESHDESK_API_KEY");
        assert!(err.to_string().contains("FRESHDESK_API_KEY"));
        assert!(err.to_string().contains("missing"));
    }

    #[test]
    fn test_validation_error() {
        let err = FreshdeskError::validation("subject is required");
        assert_eq!(err.to_string(), "validation error: subject is required");
        assert!(err.is_validation());
    }

    #[test]
    fn test_unsupported_value_type_is_validation() {
        let err = FreshdeskError::UnsupportedValueType("array".to_string());
        assert!(err.is_validation());
        assert!(err.to_string().contains("array"));
    }

    #[test]
    fn test_not_found_error() {
        let err = FreshdeskError::not_found("ticket 12345");
        assert_eq!(err.to_string(), "ticket 12345 not found");
    }

    #[test]
    fn test_timeout_error() {
        let err = FreshdeskError::timeout(Duration::from_secs(30), "GET /tickets");
        let msg = err.to_string();
        assert!(msg.contains("timed out"));
        assert!(msg.contains("30s"));
    }

    #[test]
    fn test_rate_limit_detection() {
        let err = FreshdeskError::RateLimited { retry_after: None };
        assert!(err.is_rate_limit());

        let err = FreshdeskError::remote(StatusCode::TOO_MANY_REQUESTS, "slow down");
        assert!(err.is_rate_limit());

        let err = FreshdeskError::remote(StatusCode::BAD_REQUEST, "bad");
        assert!(!err.is_rate_limit());
    }

    #[test]
    fn test_with_query_attaches_to_remote_only() {
        let err = FreshdeskError::remote(StatusCode::BAD_REQUEST, "Search failed")
            .with_query("\"status:2\"");
        assert_eq!(err.query(), Some("\"status:2\""));

        let err = FreshdeskError::validation("nope").with_query("\"status:2\"");
        assert_eq!(err.query(), None);
    }

    #[test]
    fn test_sanitized_display_includes_details_and_query() {
        let err = FreshdeskError::Remote {
            status: StatusCode::BAD_REQUEST,
            message: "Search failed: HTTP 400".to_string(),
            details: Some(serde_json::json!({"description": "Validation failed"})),
            query: Some("\"foo:1\"".to_string()),
        };
        let display = err.sanitized_display("key");
        assert!(display.contains("Search failed: HTTP 400"));
        assert!(display.contains("Validation failed"));
        assert!(display.contains("query: \"foo:1\""));
    }

    #[test]
    fn test_sanitize_message_removes_api_key() {
        let api_key = "super_secret_key_12345";
        let message = format!("Error connecting with key {} to server", api_key);
        let sanitized = FreshdeskError::sanitize_message(&message, api_key);
        assert!(!sanitized.contains(api_key));
        assert!(sanitized.contains("[REDACTED]"));
    }

    #[test]
    fn test_sanitize_message_empty_key() {
        let message = "Some error message";
        let sanitized = FreshdeskError::sanitize_message(message, "");
        assert_eq!(sanitized, message);
    }

    #[test]
    fn test_sanitize_message_no_match() {
        let message = "Some error message";
        let sanitized = FreshdeskError::sanitize_message(message, "not_present");
        assert_eq!(sanitized, message);
    }
}
