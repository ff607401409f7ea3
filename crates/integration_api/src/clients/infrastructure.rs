//! Water infrastructure objects and leaks

use domain::{
    InfrastructureUpdate, LeakUpdate, NewInfrastructure, NewLeak, Page, WaterInfrastructure,
    WaterLeak,
};

use crate::error::ApiError;
use crate::gateway::ApiGateway;

const INFRASTRUCTURE: &str = "/water-infrastructure";

/// Client for `/water-infrastructure`
#[derive(Debug, Clone)]
pub struct WaterInfrastructureClient {
    gateway: ApiGateway,
}

impl WaterInfrastructureClient {
    /// Create the client
    pub const fn new(gateway: ApiGateway) -> Self {
        Self { gateway }
    }

    /// List infrastructure objects
    pub async fn list(&self, page: Page) -> Result<Vec<WaterInfrastructure>, ApiError> {
        self.gateway.list(INFRASTRUCTURE, page).await
    }

    /// Fetch one object
    pub async fn get(&self, id: i64) -> Result<WaterInfrastructure, ApiError> {
        self.gateway.get(&format!("{INFRASTRUCTURE}/{id}")).await
    }

    /// Register an object
    pub async fn create(&self, item: &NewInfrastructure) -> Result<WaterInfrastructure, ApiError> {
        self.gateway.post(INFRASTRUCTURE, item).await
    }

    /// Partially update an object
    pub async fn update(
        &self,
        id: i64,
        update: &InfrastructureUpdate,
    ) -> Result<WaterInfrastructure, ApiError> {
        self.gateway
            .put(&format!("{INFRASTRUCTURE}/{id}"), update)
            .await
    }

    /// Delete an object
    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        self.gateway.delete(&format!("{INFRASTRUCTURE}/{id}")).await
    }

    /// Leaks recorded on one object
    pub async fn leaks_for(&self, infrastructure_id: i64) -> Result<Vec<WaterLeak>, ApiError> {
        self.gateway
            .get(&format!("{INFRASTRUCTURE}/{infrastructure_id}/leaks"))
            .await
    }

    /// All leaks
    pub async fn all_leaks(&self, page: Page) -> Result<Vec<WaterLeak>, ApiError> {
        self.gateway
            .list(&format!("{INFRASTRUCTURE}/leaks"), page)
            .await
    }

    /// Record a leak on the object named in the payload
    pub async fn create_leak(&self, leak: &NewLeak) -> Result<WaterLeak, ApiError> {
        self.gateway
            .post(
                &format!("{INFRASTRUCTURE}/{}/leaks", leak.infrastructure_id),
                leak,
            )
            .await
    }

    /// Partially update a leak
    pub async fn update_leak(&self, id: i64, update: &LeakUpdate) -> Result<WaterLeak, ApiError> {
        self.gateway
            .put(&format!("{INFRASTRUCTURE}/leaks/{id}"), update)
            .await
    }
}
