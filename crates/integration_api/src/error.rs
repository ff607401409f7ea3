//! Backend API error types

use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

/// Errors that can occur when talking to the backend
#[derive(Debug, Error)]
pub enum ApiError {
    /// Backend unreachable
    #[error("Connection failed: {0}")]
    Connection(String),

    /// No response within the configured timeout
    #[error("Request timed out after {timeout_secs} seconds")]
    Timeout {
        /// The timeout duration in seconds
        timeout_secs: u64,
    },

    /// Credential missing, expired or refused (401)
    #[error("Not authenticated: {detail}")]
    Unauthorized {
        /// Backend detail
        detail: String,
    },

    /// Credential valid but not allowed (403)
    #[error("Forbidden: {detail}")]
    Forbidden {
        /// Backend detail
        detail: String,
    },

    /// Resource does not exist (404)
    #[error("Not found: {detail}")]
    NotFound {
        /// Backend detail
        detail: String,
    },

    /// Request refused for another client-side reason (400, 409, 422, ...)
    #[error("Request rejected ({status}): {detail}")]
    Rejected {
        /// HTTP status code
        status: u16,
        /// Backend detail, verbatim
        detail: String,
    },

    /// Backend failed (5xx)
    #[error("Server error ({status}): {detail}")]
    Server {
        /// HTTP status code
        status: u16,
        /// Backend detail
        detail: String,
    },

    /// Response body did not match the expected shape
    #[error("Parse error: {0}")]
    Parse(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Request abandoned through its cancellation token
    #[error("Request cancelled")]
    Cancelled,
}

impl ApiError {
    /// Build an error from a non-success response
    ///
    /// The backend reports failures as `{"detail": ...}` where `detail` is
    /// either a string or a list of validation errors.
    pub fn from_status(status: StatusCode, body: &str) -> Self {
        let detail = extract_detail(body).unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("unexpected status")
                .to_string()
        });
        match status {
            StatusCode::UNAUTHORIZED => Self::Unauthorized { detail },
            StatusCode::FORBIDDEN => Self::Forbidden { detail },
            StatusCode::NOT_FOUND => Self::NotFound { detail },
            s if s.is_server_error() => Self::Server {
                status: s.as_u16(),
                detail,
            },
            s => Self::Rejected {
                status: s.as_u16(),
                detail,
            },
        }
    }

    /// Map a transport-level `reqwest` failure
    pub fn from_reqwest(error: &reqwest::Error, timeout_secs: u64) -> Self {
        if error.is_timeout() {
            Self::Timeout { timeout_secs }
        } else if error.is_decode() {
            Self::Parse(error.to_string())
        } else if error.is_builder() {
            Self::Configuration(error.to_string())
        } else {
            Self::Connection(error.to_string())
        }
    }

    /// No usable response arrived (unreachable, timed out, server failure)
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::Connection(_) | Self::Timeout { .. } | Self::Server { .. }
        )
    }

    /// The credential was refused
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }

    /// HTTP status, when a response was received
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Unauthorized { .. } => Some(401),
            Self::Forbidden { .. } => Some(403),
            Self::NotFound { .. } => Some(404),
            Self::Rejected { status, .. } | Self::Server { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Message suitable for an end user
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Connection(_) => "Cannot reach the server. Check your connection.".to_string(),
            Self::Timeout { .. } => "The server took too long to respond.".to_string(),
            Self::Unauthorized { .. } => "Your session has expired. Please log in again.".to_string(),
            Self::Forbidden { .. } => "You do not have permission for this action.".to_string(),
            Self::NotFound { detail } | Self::Rejected { detail, .. } => detail.clone(),
            Self::Server { .. } => "The server encountered an error. Try again later.".to_string(),
            Self::Parse(_) => "The server sent an unexpected response.".to_string(),
            Self::Configuration(message) => format!("Invalid configuration: {message}"),
            Self::Cancelled => "The request was cancelled.".to_string(),
        }
    }
}

fn extract_detail(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    match value.get("detail")? {
        Value::String(detail) => Some(detail.clone()),
        Value::Array(items) => {
            let messages: Vec<String> = items
                .iter()
                .map(|item| {
                    let msg = item.get("msg").and_then(Value::as_str).unwrap_or("invalid");
                    match item.get("loc").and_then(Value::as_array) {
                        Some(loc) => {
                            let field = loc
                                .iter()
                                .filter(|part| part.as_str() != Some("body"))
                                .map(|part| match part {
                                    Value::String(s) => s.clone(),
                                    other => other.to_string(),
                                })
                                .collect::<Vec<_>>()
                                .join(".");
                            if field.is_empty() {
                                msg.to_string()
                            } else {
                                format!("{field}: {msg}")
                            }
                        },
                        None => msg.to_string(),
                    }
                })
                .collect();
            Some(messages.join("; "))
        },
        Value::Null => None,
        other => Some(other.to_string()),
    }
}
