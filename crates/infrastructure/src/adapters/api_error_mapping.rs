//! Mapping from API errors to application errors

use application::ApplicationError;
use integration_api::ApiError;

/// Map a gateway error to an application-layer error
///
/// Refused credentials, forbidden actions and validation failures keep
/// the backend detail. Transport and decoding failures become
/// `ExternalService`.
pub fn map_api_error(err: ApiError) -> ApplicationError {
    match err {
        ApiError::Unauthorized { detail } => ApplicationError::Unauthorized(detail),
        ApiError::Forbidden { detail } => ApplicationError::Forbidden(detail),
        ApiError::NotFound { detail } => ApplicationError::Rejected {
            status: 404,
            detail,
        },
        ApiError::Rejected { status, detail } => ApplicationError::Rejected { status, detail },
        ApiError::Cancelled => ApplicationError::Cancelled,
        ApiError::Configuration(message) => ApplicationError::Configuration(message),
        other @ (ApiError::Connection(_)
        | ApiError::Timeout { .. }
        | ApiError::Server { .. }
        | ApiError::Parse(_)) => ApplicationError::ExternalService(other.to_string()),
    }
}
