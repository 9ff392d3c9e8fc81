//! Error type for API calls.

use log::debug;
use serde::Deserialize;
use thiserror::Error;
use tunicoin_core::errors::ValidationError;

pub type Result<T> = std::result::Result<T, ClientError>;

const GENERIC_MESSAGE: &str = "Something went wrong. Please try again.";

#[derive(Error, Debug)]
pub enum ClientError {
    /// Non-success status other than 401.
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Non-success status whose body carried no readable message.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// 401 that could not be recovered by a refresh.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// The refresh call failed; stored tokens have been cleared.
    #[error("Session expired, sign in required")]
    SessionExpired,

    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Failed to parse response: {0}")]
    Decode(String),

    #[error("Request cancelled")]
    Cancelled,

    #[error(transparent)]
    Core(#[from] tunicoin_core::Error),
}

impl From<ValidationError> for ClientError {
    fn from(err: ValidationError) -> Self {
        ClientError::Core(tunicoin_core::Error::Validation(err))
    }
}

impl ClientError {
    /// HTTP status behind the error, if one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } | ClientError::Http { status, .. } => Some(*status),
            ClientError::Unauthorized(_) => Some(401),
            ClientError::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Whether the user has to sign in again.
    pub fn requires_sign_in(&self) -> bool {
        matches!(
            self,
            ClientError::SessionExpired | ClientError::Unauthorized(_)
        )
    }

    /// Text suitable for a one-line notification.
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Api { message, .. } | ClientError::Unauthorized(message) => {
                message.clone()
            }
            ClientError::SessionExpired => {
                "Your session has expired. Please sign in again.".to_string()
            }
            ClientError::Transport(e) if e.is_timeout() => {
                "The server took too long to respond. Please try again.".to_string()
            }
            ClientError::Transport(_) => {
                "Unable to reach the server. Please check your connection.".to_string()
            }
            ClientError::Decode(_) => "Unexpected response from the server.".to_string(),
            ClientError::Cancelled => "Request cancelled.".to_string(),
            ClientError::Core(tunicoin_core::Error::Validation(v)) => v.to_string(),
            ClientError::Http { .. } | ClientError::Core(_) => GENERIC_MESSAGE.to_string(),
        }
    }
}

/// Error envelope used by the API. FastAPI puts the text in `detail`, either
/// as a string or as a list of validation entries.
#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    #[serde(default)]
    detail: Option<serde_json::Value>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Pulls the human-readable message out of an error body.
pub(crate) fn extract_error_message(body: &str) -> Option<String> {
    let parsed: ApiErrorResponse = serde_json::from_str(body).ok()?;

    let from_detail = match parsed.detail {
        Some(serde_json::Value::String(s)) => Some(s),
        Some(serde_json::Value::Array(entries)) => entries
            .first()
            .and_then(|e| e.get("msg"))
            .and_then(|m| m.as_str())
            .map(str::to_string),
        _ => None,
    };

    from_detail
        .or(parsed.message)
        .or(parsed.error)
        .filter(|m| !m.trim().is_empty())
}

/// Maps a non-success response body to a [`ClientError`]. Bodies without a
/// readable message are kept for logs only, never shown to the user.
pub(crate) fn error_from_response(status: u16, body: &str) -> ClientError {
    match extract_error_message(body) {
        Some(message) if status == 401 => ClientError::Unauthorized(message),
        Some(message) => ClientError::Api { status, message },
        None => {
            let snippet: String = body.chars().take(200).collect();
            debug!("HTTP {} without an error message: {}", status, snippet);
            if status == 401 {
                ClientError::Unauthorized(GENERIC_MESSAGE.to_string())
            } else {
                ClientError::Http {
                    status,
                    body: snippet,
                }
            }
        }
    }
}
