//! Dashboard adapter - Implements DashboardSourcePort using the resource clients

use application::{ApplicationError, DashboardSourcePort};
use async_trait::async_trait;
use domain::{
    Complaint, Notification, Page, User, WaterAsset, WaterDemand, WaterInfrastructure,
    WaterQuality,
};
use integration_api::{
    ApiGateway, AssetsClient, ComplaintsClient, DemandClient, NotificationsClient, UsersClient,
    WaterInfrastructureClient, WaterQualityClient,
};

use super::map_api_error;

/// The seven listings behind the dashboard
#[derive(Debug, Clone)]
pub struct DashboardAdapter {
    users: UsersClient,
    infrastructure: WaterInfrastructureClient,
    quality: WaterQualityClient,
    complaints: ComplaintsClient,
    assets: AssetsClient,
    demand: DemandClient,
    notifications: NotificationsClient,
}

impl DashboardAdapter {
    /// Build every client on one gateway
    pub fn new(gateway: &ApiGateway) -> Self {
        Self {
            users: UsersClient::new(gateway.clone()),
            infrastructure: WaterInfrastructureClient::new(gateway.clone()),
            quality: WaterQualityClient::new(gateway.clone()),
            complaints: ComplaintsClient::new(gateway.clone()),
            assets: AssetsClient::new(gateway.clone()),
            demand: DemandClient::new(gateway.clone()),
            notifications: NotificationsClient::new(gateway.clone()),
        }
    }
}

#[async_trait]
impl DashboardSourcePort for DashboardAdapter {
    async fn users(&self, page: Page) -> Result<Vec<User>, ApplicationError> {
        self.users.list(page).await.map_err(map_api_error)
    }

    async fn infrastructure(
        &self,
        page: Page,
    ) -> Result<Vec<WaterInfrastructure>, ApplicationError> {
        self.infrastructure.list(page).await.map_err(map_api_error)
    }

    async fn quality(&self, page: Page) -> Result<Vec<WaterQuality>, ApplicationError> {
        self.quality.list(page).await.map_err(map_api_error)
    }

    async fn complaints(&self, page: Page) -> Result<Vec<Complaint>, ApplicationError> {
        self.complaints.list(page).await.map_err(map_api_error)
    }

    async fn assets(&self, page: Page) -> Result<Vec<WaterAsset>, ApplicationError> {
        self.assets.list(page).await.map_err(map_api_error)
    }

    async fn demand(&self, page: Page) -> Result<Vec<WaterDemand>, ApplicationError> {
        self.demand.list(page).await.map_err(map_api_error)
    }

    async fn notifications(&self, page: Page) -> Result<Vec<Notification>, ApplicationError> {
        self.notifications.for_current_user(page).await.map_err(map_api_error)
    }
}
