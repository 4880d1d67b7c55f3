use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

/// Message used when an error response body is not JSON at all.
pub const NETWORK_ERROR_FALLBACK: &str = "network error";

#[derive(Debug, Error)]
pub enum WeatherError {
    /// The backend answered with a non-success status.
    #[error("{message}")]
    RequestFailed { status: StatusCode, message: String },

    /// No response was received (DNS, refused connection, broken body stream).
    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    /// A success response whose body does not match the expected shape.
    #[error("Failed to decode {what} response: {source}")]
    Decode {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

impl WeatherError {
    /// Build the error for a non-success response from its status and raw body.
    pub fn from_response(status: StatusCode, body: &str) -> Self {
        Self::RequestFailed { status, message: error_message(status, body) }
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::RequestFailed { status, .. } => Some(*status),
            Self::Transport(err) => err.status(),
            Self::Decode { .. } => None,
        }
    }
}

/// Message precedence: usable `detail` field, then the non-JSON fallback,
/// then a message carrying the numeric status.
fn error_message(status: StatusCode, body: &str) -> String {
    let Ok(parsed) = serde_json::from_str::<Value>(body) else {
        return NETWORK_ERROR_FALLBACK.to_string();
    };

    match parsed.get("detail") {
        Some(Value::String(detail)) if !detail.is_empty() => detail.clone(),
        Some(Value::String(_)) | Some(Value::Null) | Some(Value::Bool(false)) | None => {
            format!("HTTP error: {}", status.as_u16())
        }
        // e.g. FastAPI validation errors carry an array of objects
        Some(other) => other.to_string(),
    }
}
