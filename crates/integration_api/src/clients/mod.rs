//! One client per backend resource
//!
//! Clients are thin: they build paths, forward pagination and payloads
//! verbatim and return whatever the backend decodes to. Errors propagate
//! unmodified from the gateway.

mod assets;
mod complaints;
mod demand;
mod infrastructure;
mod notifications;
mod quality;
mod users;

pub use assets::AssetsClient;
pub use complaints::ComplaintsClient;
pub use demand::DemandClient;
pub use infrastructure::WaterInfrastructureClient;
pub use notifications::NotificationsClient;
pub use quality::WaterQualityClient;
pub use users::UsersClient;
