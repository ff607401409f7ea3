//! Complaints and complaint categories

use domain::{
    Complaint, ComplaintCategory, ComplaintCategoryUpdate, ComplaintUpdate, NewComplaint,
    NewComplaintCategory, Page,
};
use tracing::instrument;

use crate::error::ApiError;
use crate::gateway::ApiGateway;
use crate::models::ActionAck;

const COMPLAINTS: &str = "/complaints";

/// Client for `/complaints`
#[derive(Debug, Clone)]
pub struct ComplaintsClient {
    gateway: ApiGateway,
}

impl ComplaintsClient {
    /// Create the client
    pub const fn new(gateway: ApiGateway) -> Self {
        Self { gateway }
    }

    /// List complaints
    pub async fn list(&self, page: Page) -> Result<Vec<Complaint>, ApiError> {
        self.gateway.list(COMPLAINTS, page).await
    }

    /// Fetch one complaint
    pub async fn get(&self, id: i64) -> Result<Complaint, ApiError> {
        self.gateway.get(&format!("{COMPLAINTS}/{id}")).await
    }

    /// File a complaint
    pub async fn create(&self, complaint: &NewComplaint) -> Result<Complaint, ApiError> {
        self.gateway.post(COMPLAINTS, complaint).await
    }

    /// Partially update a complaint
    pub async fn update(&self, id: i64, update: &ComplaintUpdate) -> Result<Complaint, ApiError> {
        self.gateway.put(&format!("{COMPLAINTS}/{id}"), update).await
    }

    /// Delete a complaint
    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        self.gateway.delete(&format!("{COMPLAINTS}/{id}")).await
    }

    /// Hand a complaint to a user
    ///
    /// The assignee travels as the `assigned_to` query parameter.
    #[instrument(skip(self))]
    pub async fn assign(&self, id: i64, assigned_to: i64) -> Result<ActionAck, ApiError> {
        let path = format!("{COMPLAINTS}/{id}/assign");
        self.gateway
            .patch_with_query(&path, &[("assigned_to", assigned_to)])
            .await
    }

    /// Mark a complaint resolved
    #[instrument(skip(self))]
    pub async fn resolve(&self, id: i64) -> Result<ActionAck, ApiError> {
        self.gateway
            .patch_empty(&format!("{COMPLAINTS}/{id}/resolve"))
            .await
    }

    /// List categories
    pub async fn categories(&self) -> Result<Vec<ComplaintCategory>, ApiError> {
        self.gateway.get(&format!("{COMPLAINTS}/categories")).await
    }

    /// Fetch one category
    pub async fn category(&self, id: i64) -> Result<ComplaintCategory, ApiError> {
        self.gateway
            .get(&format!("{COMPLAINTS}/categories/{id}"))
            .await
    }

    /// Create a category
    pub async fn create_category(
        &self,
        category: &NewComplaintCategory,
    ) -> Result<ComplaintCategory, ApiError> {
        self.gateway
            .post(&format!("{COMPLAINTS}/categories"), category)
            .await
    }

    /// Partially update a category
    pub async fn update_category(
        &self,
        id: i64,
        update: &ComplaintCategoryUpdate,
    ) -> Result<ComplaintCategory, ApiError> {
        self.gateway
            .put(&format!("{COMPLAINTS}/categories/{id}"), update)
            .await
    }

    /// Delete a category
    pub async fn delete_category(&self, id: i64) -> Result<(), ApiError> {
        self.gateway
            .delete(&format!("{COMPLAINTS}/categories/{id}"))
            .await
    }
}
