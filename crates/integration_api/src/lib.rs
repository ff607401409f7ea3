//! WaterOps backend REST API integration
//!
//! [`ApiGateway`] is the single HTTP entry point. It applies a fixed
//! timeout, composes request and response stages (bearer credential,
//! reset on 401) and maps every failure into [`ApiError`]. One thin client
//! per backend resource sits on top of it.
//!
//! # Example
//!
//! ```rust,ignore
//! use integration_api::{ApiConfig, ApiGateway, ComplaintsClient};
//! use domain::Page;
//!
//! let gateway = ApiGateway::new(ApiConfig::default())?;
//! let complaints = ComplaintsClient::new(gateway);
//! let first = complaints.list(Page::first(50)).await?;
//! ```

mod clients;
mod config;
mod error;
mod gateway;
mod models;

pub use clients::{
    AssetsClient, ComplaintsClient, DemandClient, NotificationsClient, UsersClient,
    WaterInfrastructureClient, WaterQualityClient,
};
pub use config::ApiConfig;
pub use error::ApiError;
pub use gateway::{
    ApiGateway, ApiGatewayBuilder, BearerAuth, CredentialSource, RequestStage, ResponseStage,
    UnauthorizedReset,
};
pub use models::{AccessToken, ActionAck, LoginRequest};
