//! Domain layer for WaterOps
//!
//! Contains the resource records mirrored from the utility backend, the
//! role hierarchy used for view gating, and the small value objects shared
//! by every other layer. This layer performs no I/O.

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use value_objects::*;
