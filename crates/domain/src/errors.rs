//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Error)]
pub enum DomainError {
    /// Role string not part of the hierarchy
    #[error("Invalid role: {0}")]
    InvalidRole(String),

    /// Pagination parameters out of range
    #[error("Invalid page: {0}")]
    InvalidPage(String),

    /// Date/time parsing error
    #[error("Invalid date/time: {0}")]
    InvalidDateTime(String),
}
