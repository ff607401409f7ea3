//! Application layer - Use cases and orchestration
//!
//! Owns the client session state machine, the role-based route guard and
//! the dashboard aggregate. Talks to the outside world only through the
//! ports defined here; adapters in the infrastructure layer implement them.

pub mod error;
pub mod ports;
pub mod services;

pub use error::ApplicationError;
pub use ports::*;
pub use services::*;
