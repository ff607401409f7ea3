//! Notifications and delivery settings

use domain::{
    NewNotification, NewNotificationSetting, Notification, NotificationSetting,
    NotificationSettingUpdate, NotificationUpdate, Page,
};
use tracing::instrument;

use crate::error::ApiError;
use crate::gateway::ApiGateway;
use crate::models::ActionAck;

const NOTIFICATIONS: &str = "/notifications";

/// Client for `/notifications`
#[derive(Debug, Clone)]
pub struct NotificationsClient {
    gateway: ApiGateway,
}

impl NotificationsClient {
    /// Create the client
    pub const fn new(gateway: ApiGateway) -> Self {
        Self { gateway }
    }

    /// List every notification
    pub async fn list(&self, page: Page) -> Result<Vec<Notification>, ApiError> {
        self.gateway.list(NOTIFICATIONS, page).await
    }

    /// Notifications addressed to the current user
    pub async fn for_current_user(&self, page: Page) -> Result<Vec<Notification>, ApiError> {
        self.gateway
            .list(&format!("{NOTIFICATIONS}/user"), page)
            .await
    }

    /// Fetch one notification
    pub async fn get(&self, id: i64) -> Result<Notification, ApiError> {
        self.gateway.get(&format!("{NOTIFICATIONS}/{id}")).await
    }

    /// Publish a notification
    pub async fn create(&self, notification: &NewNotification) -> Result<Notification, ApiError> {
        self.gateway.post(NOTIFICATIONS, notification).await
    }

    /// Partially update a notification
    pub async fn update(
        &self,
        id: i64,
        update: &NotificationUpdate,
    ) -> Result<Notification, ApiError> {
        self.gateway
            .put(&format!("{NOTIFICATIONS}/{id}"), update)
            .await
    }

    /// Delete a notification
    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        self.gateway.delete(&format!("{NOTIFICATIONS}/{id}")).await
    }

    /// Mark one notification read
    #[instrument(skip(self))]
    pub async fn mark_read(&self, id: i64) -> Result<ActionAck, ApiError> {
        self.gateway
            .patch_empty(&format!("{NOTIFICATIONS}/{id}/read"))
            .await
    }

    /// Mark every notification read
    #[instrument(skip(self))]
    pub async fn mark_all_read(&self) -> Result<ActionAck, ApiError> {
        self.gateway
            .patch_empty(&format!("{NOTIFICATIONS}/read-all"))
            .await
    }

    /// Delivery settings of a user
    pub async fn settings(&self, user_id: i64) -> Result<Vec<NotificationSetting>, ApiError> {
        self.gateway
            .get(&format!("{NOTIFICATIONS}/settings/{user_id}"))
            .await
    }

    /// Create a delivery setting
    pub async fn create_setting(
        &self,
        setting: &NewNotificationSetting,
    ) -> Result<NotificationSetting, ApiError> {
        self.gateway
            .post(&format!("{NOTIFICATIONS}/settings"), setting)
            .await
    }

    /// Partially update one delivery setting
    pub async fn update_setting(
        &self,
        setting_id: i64,
        update: &NotificationSettingUpdate,
    ) -> Result<NotificationSetting, ApiError> {
        self.gateway
            .put(&format!("{NOTIFICATIONS}/settings/{setting_id}"), update)
            .await
    }
}
