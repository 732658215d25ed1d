//! Shared error types and REST error-body parsing.

use serde_json::Value;
use thiserror::Error;

/// Attempt to pull a user-facing message out of a JSON error body.
///
/// The backend wraps failures as `{"detail": ...}`. A string detail is returned
/// verbatim; structured details (validation error lists, objects) are
/// stringified as JSON. Falls back to `message`, then `title`.
pub fn try_error_detail(body: &str) -> Option<String> {
    let parsed: Value = serde_json::from_str(body).ok()?;
    let object = parsed.as_object()?;

    for key in ["detail", "message", "title"] {
        match object.get(key) {
            Some(Value::String(text)) if !text.trim().is_empty() => return Some(text.clone()),
            Some(Value::Null) | None => continue,
            Some(Value::String(_)) => continue,
            Some(other) => return Some(other.to_string()),
        }
    }
    None
}

/// API error type for client-side use
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },
    /// The backend rejected the credentials of an authenticated request.
    /// The session has already been cleared when this is returned.
    #[error("Session expired (HTTP {status})")]
    Unauthorized { status: u16, body: String },
    #[error("Deserialization error: {0}")]
    Deserialize(String),
}

impl ApiError {
    /// HTTP status code, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } | ApiError::Unauthorized { status, .. } => Some(*status),
            ApiError::Network(_) | ApiError::Deserialize(_) => None,
        }
    }

    /// The single string shown to the user for this failure.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Http { status, body } => {
                try_error_detail(body).unwrap_or_else(|| status_message(*status))
            }
            ApiError::Unauthorized { body, .. } => try_error_detail(body)
                .unwrap_or_else(|| "Your session has expired. Please log in again.".to_string()),
            ApiError::Network(_) => {
                "No response from server. Please check your connection.".to_string()
            }
            ApiError::Deserialize(_) => "Received an unexpected response from the server.".to_string(),
        }
    }
}

fn status_message(status: u16) -> String {
    match status {
        400 => "The request was invalid.".to_string(),
        401 => "Authentication is required.".to_string(),
        403 => "You do not have permission to do that.".to_string(),
        404 => "The requested resource was not found.".to_string(),
        409 => "The request conflicts with existing data.".to_string(),
        422 => "Some of the submitted values are invalid.".to_string(),
        500..=599 => "The server encountered an error. Please try again later.".to_string(),
        _ => format!("Request failed with status {status}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_detail_is_returned_verbatim() {
        assert_eq!(
            try_error_detail(r#"{"detail":"Invalid credentials"}"#).as_deref(),
            Some("Invalid credentials")
        );
    }

    #[test]
    fn structured_detail_is_stringified() {
        let body = r#"{"detail":[{"loc":["body","email"],"msg":"field required"}]}"#;
        let detail = try_error_detail(body).unwrap();
        assert!(detail.starts_with('['));
        assert!(detail.contains("field required"));
    }

    #[test]
    fn falls_back_to_message_then_title() {
        assert_eq!(try_error_detail(r#"{"message":"nope"}"#).as_deref(), Some("nope"));
        assert_eq!(
            try_error_detail(r#"{"detail":null,"title":"Bad Request"}"#).as_deref(),
            Some("Bad Request")
        );
        assert_eq!(try_error_detail("not json"), None);
        assert_eq!(try_error_detail(r#"["detail"]"#), None);
    }

    #[test]
    fn user_message_prefers_detail_over_status_text() {
        let err = ApiError::Http {
            status: 400,
            body: r#"{"detail":"Event is full"}"#.to_string(),
        };
        assert_eq!(err.user_message(), "Event is full");

        let err = ApiError::Http { status: 404, body: String::new() };
        assert_eq!(err.user_message(), "The requested resource was not found.");
        assert_eq!(err.status(), Some(404));
        assert_eq!(ApiError::Network("reset".into()).status(), None);
    }
}
