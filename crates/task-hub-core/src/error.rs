//! Error Types
//!
//! Failures surfaced by the HTTP adapter and the session store.

use std::time::Duration;

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

/// Failure below the HTTP layer: the request never produced a response.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TransportError {
    #[error("network error: {0}")]
    Network(String),

    #[error("request timed out after {0:?}")]
    Timeout(Duration),
}

/// Structured error body returned by the backend on non-2xx responses.
///
/// Every field is optional; `raw` keeps the body as received.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ErrorPayload {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(skip)]
    pub raw: Value,
}

impl ErrorPayload {
    /// Build a payload from whatever body the server sent back.
    pub fn from_body(body: Value) -> Self {
        let mut payload = match &body {
            Value::Object(_) => serde_json::from_value::<ErrorPayload>(body.clone()).unwrap_or_default(),
            Value::String(text) if !text.is_empty() => ErrorPayload {
                message: Some(text.clone()),
                ..Default::default()
            },
            _ => ErrorPayload::default(),
        };
        payload.raw = body;
        payload
    }
}

/// Error returned by every client call.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("server responded with status {status}")]
    Server { status: u16, payload: ErrorPayload },

    #[error("not authenticated")]
    Unauthorized { payload: ErrorPayload },

    #[error("failed to decode response: {0}")]
    Decode(String),

    #[error("{0}")]
    InvalidResponse(String),
}

impl ApiError {
    /// HTTP status when the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Server { status, .. } => Some(*status),
            ApiError::Unauthorized { .. } => Some(401),
            _ => None,
        }
    }

    /// Server-provided error body, if any.
    pub fn payload(&self) -> Option<&ErrorPayload> {
        match self {
            ApiError::Server { payload, .. } | ApiError::Unauthorized { payload } => Some(payload),
            _ => None,
        }
    }

    /// Text suitable for an inline error panel.
    pub fn user_message(&self) -> String {
        if let Some(message) = self.payload().and_then(|p| p.message.as_deref()) {
            if !message.is_empty() {
                return message.to_string();
            }
        }
        match self {
            ApiError::Transport(TransportError::Timeout(_)) => "The server took too long to respond".to_string(),
            ApiError::Transport(_) => "Network error, please try again".to_string(),
            ApiError::Server { status, .. } => format!("Request failed with status {}", status),
            ApiError::Unauthorized { .. } => "Your session has expired, please sign in again".to_string(),
            ApiError::Decode(_) => "Unexpected response from server".to_string(),
            ApiError::InvalidResponse(message) => message.clone(),
        }
    }
}

/// Failure of the key-value persistence behind the session.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StorageError {
    #[error("storage unavailable")]
    Unavailable,

    #[error("storage write failed for key {0}")]
    Write(String),

    #[error("failed to encode value: {0}")]
    Encode(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_payload_from_error_body() {
        let payload = ErrorPayload::from_body(json!({
            "status": "error",
            "error": "NOT_FOUND",
            "message": "project not found",
            "code": "NOT_FOUND"
        }));
        assert_eq!(payload.message.as_deref(), Some("project not found"));
        assert_eq!(payload.code.as_deref(), Some("NOT_FOUND"));
        assert_eq!(payload.raw["status"], "error");
    }

    #[test]
    fn test_payload_from_plain_text() {
        let payload = ErrorPayload::from_body(Value::String("bad gateway".into()));
        assert_eq!(payload.message.as_deref(), Some("bad gateway"));
    }

    #[test]
    fn test_user_message_prefers_server_message() {
        let err = ApiError::Server {
            status: 400,
            payload: ErrorPayload::from_body(json!({"message": "Title too short"})),
        };
        assert_eq!(err.user_message(), "Title too short");
        assert_eq!(err.status(), Some(400));
    }

    #[test]
    fn test_user_message_fallbacks() {
        let err = ApiError::Server { status: 500, payload: ErrorPayload::default() };
        assert_eq!(err.user_message(), "Request failed with status 500");

        let err = ApiError::from(TransportError::Network("connection refused".into()));
        assert_eq!(err.user_message(), "Network error, please try again");
        assert_eq!(err.status(), None);
    }
}
