//! Infrastructure adapters
//!
//! Adapters connect application ports to the backend API clients.

mod api_error_mapping;
mod dashboard_adapter;
mod identity_adapter;
mod session_credentials;

pub use api_error_mapping::map_api_error;
pub use dashboard_adapter::DashboardAdapter;
pub use identity_adapter::IdentityAdapter;
pub use session_credentials::SessionCredentials;
