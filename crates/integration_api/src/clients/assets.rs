//! Assets and maintenance records

use domain::{
    AssetMaintenance, AssetMaintenanceUpdate, AssetUpdate, NewAsset, NewAssetMaintenance, Page,
    WaterAsset,
};

use crate::error::ApiError;
use crate::gateway::ApiGateway;

const ASSETS: &str = "/assets";

/// Client for `/assets`
#[derive(Debug, Clone)]
pub struct AssetsClient {
    gateway: ApiGateway,
}

impl AssetsClient {
    /// Create the client
    pub const fn new(gateway: ApiGateway) -> Self {
        Self { gateway }
    }

    /// List assets
    pub async fn list(&self, page: Page) -> Result<Vec<WaterAsset>, ApiError> {
        self.gateway.list(ASSETS, page).await
    }

    /// Fetch one asset
    pub async fn get(&self, id: i64) -> Result<WaterAsset, ApiError> {
        self.gateway.get(&format!("{ASSETS}/{id}")).await
    }

    /// Register an asset
    pub async fn create(&self, asset: &NewAsset) -> Result<WaterAsset, ApiError> {
        self.gateway.post(ASSETS, asset).await
    }

    /// Partially update an asset
    pub async fn update(&self, id: i64, update: &AssetUpdate) -> Result<WaterAsset, ApiError> {
        self.gateway.put(&format!("{ASSETS}/{id}"), update).await
    }

    /// Delete an asset
    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        self.gateway.delete(&format!("{ASSETS}/{id}")).await
    }

    /// Maintenance history of one asset
    pub async fn maintenance_history(
        &self,
        asset_id: i64,
        page: Page,
    ) -> Result<Vec<AssetMaintenance>, ApiError> {
        self.gateway
            .list(&format!("{ASSETS}/{asset_id}/maintenance"), page)
            .await
    }

    /// All maintenance records
    pub async fn all_maintenance(&self, page: Page) -> Result<Vec<AssetMaintenance>, ApiError> {
        self.gateway
            .list(&format!("{ASSETS}/maintenance"), page)
            .await
    }

    /// Record maintenance on the asset named in the payload
    pub async fn create_maintenance(
        &self,
        record: &NewAssetMaintenance,
    ) -> Result<AssetMaintenance, ApiError> {
        self.gateway
            .post(&format!("{ASSETS}/{}/maintenance", record.asset_id), record)
            .await
    }

    /// Partially update a maintenance record
    pub async fn update_maintenance(
        &self,
        id: i64,
        update: &AssetMaintenanceUpdate,
    ) -> Result<AssetMaintenance, ApiError> {
        self.gateway
            .put(&format!("{ASSETS}/maintenance/{id}"), update)
            .await
    }

    /// Assets whose scheduled maintenance is due
    pub async fn maintenance_due(&self) -> Result<Vec<WaterAsset>, ApiError> {
        self.gateway
            .get(&format!("{ASSETS}/maintenance-due"))
            .await
    }
}
