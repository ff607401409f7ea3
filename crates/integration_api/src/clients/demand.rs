//! Demand records, distribution plans, investment plans and forecasts

use domain::{
    DemandForecastQuery, DemandUpdate, DistributionPlanUpdate, InvestmentPlan,
    InvestmentPlanUpdate, NewDistributionPlan, NewInvestmentPlan, NewWaterDemand, Page,
    WaterDemand, WaterDistributionPlan,
};
use tracing::instrument;

use crate::error::ApiError;
use crate::gateway::ApiGateway;

const DEMAND: &str = "/demand";

/// Client for `/demand`
#[derive(Debug, Clone)]
pub struct DemandClient {
    gateway: ApiGateway,
}

impl DemandClient {
    /// Create the client
    pub const fn new(gateway: ApiGateway) -> Self {
        Self { gateway }
    }

    /// List demand records
    pub async fn list(&self, page: Page) -> Result<Vec<WaterDemand>, ApiError> {
        self.gateway.list(DEMAND, page).await
    }

    /// Fetch one demand record
    pub async fn get(&self, id: i64) -> Result<WaterDemand, ApiError> {
        self.gateway.get(&format!("{DEMAND}/{id}")).await
    }

    /// Record demand
    pub async fn create(&self, demand: &NewWaterDemand) -> Result<WaterDemand, ApiError> {
        self.gateway.post(DEMAND, demand).await
    }

    /// Partially update a demand record
    pub async fn update(&self, id: i64, update: &DemandUpdate) -> Result<WaterDemand, ApiError> {
        self.gateway.put(&format!("{DEMAND}/{id}"), update).await
    }

    /// Delete a demand record
    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        self.gateway.delete(&format!("{DEMAND}/{id}")).await
    }

    /// Demand records matching the optional filters
    #[instrument(skip(self))]
    pub async fn forecast(
        &self,
        query: &DemandForecastQuery,
    ) -> Result<Vec<WaterDemand>, ApiError> {
        self.gateway
            .get_with_query(&format!("{DEMAND}/forecast"), &query.query())
            .await
    }

    /// List distribution plans
    pub async fn distribution_plans(
        &self,
        page: Page,
    ) -> Result<Vec<WaterDistributionPlan>, ApiError> {
        self.gateway
            .list(&format!("{DEMAND}/distribution-plans"), page)
            .await
    }

    /// Fetch one distribution plan
    pub async fn distribution_plan(&self, id: i64) -> Result<WaterDistributionPlan, ApiError> {
        self.gateway
            .get(&format!("{DEMAND}/distribution-plans/{id}"))
            .await
    }

    /// Create a distribution plan
    pub async fn create_distribution_plan(
        &self,
        plan: &NewDistributionPlan,
    ) -> Result<WaterDistributionPlan, ApiError> {
        self.gateway
            .post(&format!("{DEMAND}/distribution-plans"), plan)
            .await
    }

    /// Partially update a distribution plan
    pub async fn update_distribution_plan(
        &self,
        id: i64,
        update: &DistributionPlanUpdate,
    ) -> Result<WaterDistributionPlan, ApiError> {
        self.gateway
            .put(&format!("{DEMAND}/distribution-plans/{id}"), update)
            .await
    }

    /// Delete a distribution plan
    pub async fn delete_distribution_plan(&self, id: i64) -> Result<(), ApiError> {
        self.gateway
            .delete(&format!("{DEMAND}/distribution-plans/{id}"))
            .await
    }

    /// List investment plans
    pub async fn investment_plans(&self, page: Page) -> Result<Vec<InvestmentPlan>, ApiError> {
        self.gateway
            .list(&format!("{DEMAND}/investment-plans"), page)
            .await
    }

    /// Fetch one investment plan
    pub async fn investment_plan(&self, id: i64) -> Result<InvestmentPlan, ApiError> {
        self.gateway
            .get(&format!("{DEMAND}/investment-plans/{id}"))
            .await
    }

    /// Create an investment plan
    pub async fn create_investment_plan(
        &self,
        plan: &NewInvestmentPlan,
    ) -> Result<InvestmentPlan, ApiError> {
        self.gateway
            .post(&format!("{DEMAND}/investment-plans"), plan)
            .await
    }

    /// Partially update an investment plan
    pub async fn update_investment_plan(
        &self,
        id: i64,
        update: &InvestmentPlanUpdate,
    ) -> Result<InvestmentPlan, ApiError> {
        self.gateway
            .put(&format!("{DEMAND}/investment-plans/{id}"), update)
            .await
    }

    /// Delete an investment plan
    pub async fn delete_investment_plan(&self, id: i64) -> Result<(), ApiError> {
        self.gateway
            .delete(&format!("{DEMAND}/investment-plans/{id}"))
            .await
    }
}
