//! Water-quality samples and alerts

use domain::{
    NewQualityAlert, NewWaterQuality, Page, QualityAlertUpdate, WaterQuality, WaterQualityAlert,
    WaterQualityUpdate,
};

use crate::error::ApiError;
use crate::gateway::ApiGateway;
use crate::models::ActionAck;

const QUALITY: &str = "/water-quality";

/// Client for `/water-quality`
#[derive(Debug, Clone)]
pub struct WaterQualityClient {
    gateway: ApiGateway,
}

impl WaterQualityClient {
    /// Create the client
    pub const fn new(gateway: ApiGateway) -> Self {
        Self { gateway }
    }

    /// List samples
    pub async fn list(&self, page: Page) -> Result<Vec<WaterQuality>, ApiError> {
        self.gateway.list(QUALITY, page).await
    }

    /// Fetch one sample
    pub async fn get(&self, id: i64) -> Result<WaterQuality, ApiError> {
        self.gateway.get(&format!("{QUALITY}/{id}")).await
    }

    /// Record a sample
    pub async fn create(&self, sample: &NewWaterQuality) -> Result<WaterQuality, ApiError> {
        self.gateway.post(QUALITY, sample).await
    }

    /// Partially update a sample
    pub async fn update(
        &self,
        id: i64,
        update: &WaterQualityUpdate,
    ) -> Result<WaterQuality, ApiError> {
        self.gateway.put(&format!("{QUALITY}/{id}"), update).await
    }

    /// Delete a sample
    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        self.gateway.delete(&format!("{QUALITY}/{id}")).await
    }

    /// List alerts
    pub async fn alerts(&self, page: Page) -> Result<Vec<WaterQualityAlert>, ApiError> {
        self.gateway.list(&format!("{QUALITY}/alerts"), page).await
    }

    /// Fetch one alert
    pub async fn alert(&self, id: i64) -> Result<WaterQualityAlert, ApiError> {
        self.gateway.get(&format!("{QUALITY}/alerts/{id}")).await
    }

    /// Raise an alert
    pub async fn create_alert(
        &self,
        alert: &NewQualityAlert,
    ) -> Result<WaterQualityAlert, ApiError> {
        self.gateway.post(&format!("{QUALITY}/alerts"), alert).await
    }

    /// Partially update an alert
    pub async fn update_alert(
        &self,
        id: i64,
        update: &QualityAlertUpdate,
    ) -> Result<WaterQualityAlert, ApiError> {
        self.gateway
            .put(&format!("{QUALITY}/alerts/{id}"), update)
            .await
    }

    /// Mark an alert as acknowledged
    pub async fn acknowledge_alert(&self, id: i64) -> Result<ActionAck, ApiError> {
        self.gateway
            .patch_empty(&format!("{QUALITY}/alerts/{id}/acknowledge"))
            .await
    }
}
