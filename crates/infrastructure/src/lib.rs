//! Infrastructure layer - Adapters for external systems
//!
//! Implements the application ports on top of the backend API clients and
//! the local filesystem, and owns configuration loading, log setup and the
//! wiring of the whole client.

pub mod adapters;
pub mod config;
pub mod context;
pub mod persistence;
pub mod telemetry;

pub use adapters::*;
pub use config::{AppConfig, DashboardConfig, LoggingConfig, SessionConfig};
pub use context::WaterOpsContext;
pub use persistence::{FileSessionStore, MemorySessionStore, SessionStoreError};
pub use telemetry::{TelemetryError, init_tracing};
