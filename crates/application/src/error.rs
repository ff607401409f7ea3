//! Application-level errors

use domain::DomainError;
use thiserror::Error;

/// Errors that can occur in the application layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain-level error
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Credential missing, expired or refused
    #[error("Not authenticated: {0}")]
    Unauthorized(String),

    /// Authenticated but not allowed
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Backend rejected the request (validation, missing record, ...)
    #[error("Request rejected ({status}): {detail}")]
    Rejected {
        /// HTTP status code
        status: u16,
        /// Backend-provided detail, verbatim
        detail: String,
    },

    /// Backend unreachable, timed out or failed internally
    #[error("External service error: {0}")]
    ExternalService(String),

    /// Operation cancelled by its caller
    #[error("Operation cancelled")]
    Cancelled,

    /// Persisted session state could not be read or written
    #[error("Storage error: {0}")]
    Storage(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl ApplicationError {
    /// The backend refused the credential
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized(_))
    }

    /// Network-level or server-side failure, as opposed to a refusal
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::ExternalService(_))
    }
}
