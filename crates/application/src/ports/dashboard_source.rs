//! Dashboard data port
//!
//! The seven list fetches the dashboard summary is computed from.

use async_trait::async_trait;
use domain::{
    Complaint, Notification, Page, User, WaterAsset, WaterDemand, WaterInfrastructure,
    WaterQuality,
};
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for the resource listings behind the dashboard
#[cfg_attr(test, automock)]
#[async_trait]
pub trait DashboardSourcePort: Send + Sync {
    /// Registered users
    async fn users(&self, page: Page) -> Result<Vec<User>, ApplicationError>;

    /// Infrastructure objects
    async fn infrastructure(&self, page: Page)
    -> Result<Vec<WaterInfrastructure>, ApplicationError>;

    /// Water-quality samples
    async fn quality(&self, page: Page) -> Result<Vec<WaterQuality>, ApplicationError>;

    /// Complaints
    async fn complaints(&self, page: Page) -> Result<Vec<Complaint>, ApplicationError>;

    /// Assets
    async fn assets(&self, page: Page) -> Result<Vec<WaterAsset>, ApplicationError>;

    /// Demand records
    async fn demand(&self, page: Page) -> Result<Vec<WaterDemand>, ApplicationError>;

    /// Notifications for the current user
    async fn notifications(&self, page: Page) -> Result<Vec<Notification>, ApplicationError>;
}
