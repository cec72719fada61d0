use serde_json::Value;
use thiserror::Error;

/// Main error type for backend calls
#[derive(Error, Debug)]
pub enum ClientError {
    /// The request never produced a response (DNS, connect, reset, ...).
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-2xx response. `body` is the backend's JSON error object when the
    /// body parsed as JSON, otherwise a synthesized `{"error": "..."}`.
    #[error("Backend returned HTTP {status}: {}", api_message(.body))]
    Api { status: u16, body: Value },

    /// Non-2xx response on the multipart upload path.
    #[error("{message}")]
    Upload { status: u16, message: String },

    #[error("Unexpected response body: {0}")]
    Decode(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, ClientError>;

fn api_message(body: &Value) -> String {
    match body.get("error") {
        Some(Value::String(message)) => message.clone(),
        Some(other) => other.to_string(),
        None => body.to_string(),
    }
}

impl ClientError {
    /// Build the failure for a non-2xx JSON exchange from the raw response text.
    pub fn from_error_body(status: u16, text: &str) -> Self {
        let body = serde_json::from_str::<Value>(text)
            .unwrap_or_else(|_| serde_json::json!({ "error": fallback_message(status, text) }));
        ClientError::Api { status, body }
    }

    /// Build the failure for a non-2xx upload from the raw response text.
    pub fn from_upload_body(status: u16, text: &str) -> Self {
        ClientError::Upload {
            status,
            message: fallback_message(status, text),
        }
    }

    /// HTTP status of the failed exchange, if a response was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } | ClientError::Upload { status, .. } => Some(*status),
            ClientError::Transport(err) => err.status().map(|status| status.as_u16()),
            _ => None,
        }
    }

    /// The error object the backend sent (or the one synthesized for it).
    pub fn body(&self) -> Option<&Value> {
        match self {
            ClientError::Api { body, .. } => Some(body),
            _ => None,
        }
    }

    /// Whether the caller may reasonably repeat the call. The client itself never retries.
    pub fn is_retryable(&self) -> bool {
        match self {
            ClientError::Transport(err) => err.is_timeout() || err.is_connect(),
            ClientError::Api { status, .. } | ClientError::Upload { status, .. } => {
                *status == 429 || (500..600).contains(status)
            }
            _ => false,
        }
    }

    /// Get the error code for structured responses
    pub fn error_code(&self) -> &'static str {
        match self {
            ClientError::Transport(_) => "TRANSPORT_ERROR",
            ClientError::Api { .. } => "API_ERROR",
            ClientError::Upload { .. } => "UPLOAD_ERROR",
            ClientError::Decode(_) => "DECODE_ERROR",
            ClientError::Serialization(_) => "SERIALIZATION_ERROR",
            ClientError::Io(_) => "IO_ERROR",
            ClientError::Validation(_) => "VALIDATION_ERROR",
        }
    }

    /// Convert to a structured error payload
    pub fn to_error_payload(&self) -> Value {
        serde_json::json!({
            "error": {
                "code": self.error_code(),
                "message": self.to_string(),
                "status": self.status(),
                "retryable": self.is_retryable()
            }
        })
    }
}

fn fallback_message(status: u16, text: &str) -> String {
    if text.is_empty() {
        format!("HTTP {status}")
    } else {
        text.to_string()
    }
}
