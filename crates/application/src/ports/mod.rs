//! Port definitions for application layer
//!
//! Ports are interfaces that define how the application interacts with
//! external systems. Adapters in the infrastructure layer implement these ports.

mod dashboard_source;
mod identity_port;
mod session_store;

#[cfg(test)]
pub use dashboard_source::MockDashboardSourcePort;
pub use dashboard_source::DashboardSourcePort;
#[cfg(test)]
pub use identity_port::MockIdentityPort;
pub use identity_port::{IdentityPort, IssuedCredential};
#[cfg(test)]
pub use session_store::MockSessionStorePort;
pub use session_store::{SessionSnapshot, SessionStorePort};
