//! Demand records, distribution plans and investment plans

use serde::{Deserialize, Serialize};

use crate::value_objects::{PlanStatus, Timestamp};

/// Observed or forecast water demand at a location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaterDemand {
    /// Numeric identifier
    pub id: i64,
    /// Area
    pub location: String,
    /// Latitude
    #[serde(default)]
    pub latitude: Option<f64>,
    /// Longitude
    #[serde(default)]
    pub longitude: Option<f64>,
    /// Volume in m³
    pub demand_amount: f64,
    /// Day the demand applies to
    pub demand_date: Timestamp,
    /// Residential, commercial, industrial, ...
    #[serde(default = "default_demand_type")]
    pub demand_type: String,
    /// Forecast rather than measured
    #[serde(default)]
    pub forecasted: bool,
    /// Creation time
    pub created_at: Timestamp,
    /// Last modification time
    #[serde(default)]
    pub updated_at: Option<Timestamp>,
}

fn default_demand_type() -> String {
    "residential".to_string()
}

/// Payload for recording demand
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewWaterDemand {
    /// Area
    pub location: String,
    /// Volume in m³
    pub demand_amount: f64,
    /// Day the demand applies to
    pub demand_date: Timestamp,
    /// Demand category
    pub demand_type: String,
    /// Forecast rather than measured
    pub forecasted: bool,
}

/// Partial update of a demand record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DemandUpdate {
    /// Corrected volume
    #[serde(skip_serializing_if = "Option::is_none")]
    pub demand_amount: Option<f64>,
    /// New category
    #[serde(skip_serializing_if = "Option::is_none")]
    pub demand_type: Option<String>,
    /// Reclassify as forecast or measured
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forecasted: Option<bool>,
}

/// Filter for the demand forecast endpoint
///
/// Unset fields are not sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DemandForecastQuery {
    /// Restrict to one area
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Lower date bound (inclusive)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_from: Option<String>,
    /// Upper date bound (inclusive)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_to: Option<String>,
}

impl DemandForecastQuery {
    /// Query pairs for the set fields only
    #[must_use]
    pub fn query(&self) -> Vec<(&'static str, &str)> {
        let mut pairs = Vec::with_capacity(3);
        if let Some(location) = self.location.as_deref() {
            pairs.push(("location", location));
        }
        if let Some(from) = self.date_from.as_deref() {
            pairs.push(("date_from", from));
        }
        if let Some(to) = self.date_to.as_deref() {
            pairs.push(("date_to", to));
        }
        pairs
    }
}

/// Allocation of available water across consumer groups
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaterDistributionPlan {
    /// Numeric identifier
    pub id: i64,
    /// Plan name
    pub plan_name: String,
    /// Description
    #[serde(default)]
    pub description: Option<String>,
    /// Start of the plan period
    pub start_date: Timestamp,
    /// End of the plan period
    pub end_date: Timestamp,
    /// Total volume allocated
    pub total_water_allocated: f64,
    /// Residential share
    #[serde(default)]
    pub allocated_to_residential: f64,
    /// Commercial share
    #[serde(default)]
    pub allocated_to_commercial: f64,
    /// Industrial share
    #[serde(default)]
    pub allocated_to_industrial: f64,
    /// Public share
    #[serde(default)]
    pub allocated_to_public: f64,
    /// Plan status
    #[serde(default)]
    pub status: PlanStatus,
    /// Author
    pub created_by: i64,
    /// Creation time
    pub created_at: Timestamp,
    /// Last modification time
    #[serde(default)]
    pub updated_at: Option<Timestamp>,
}

impl WaterDistributionPlan {
    /// Volume not assigned to any consumer group
    #[must_use]
    pub fn unallocated(&self) -> f64 {
        self.total_water_allocated
            - self.allocated_to_residential
            - self.allocated_to_commercial
            - self.allocated_to_industrial
            - self.allocated_to_public
    }
}

/// Payload for creating a distribution plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewDistributionPlan {
    /// Plan name
    pub plan_name: String,
    /// Description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Start of the plan period
    pub start_date: Timestamp,
    /// End of the plan period
    pub end_date: Timestamp,
    /// Total volume allocated
    pub total_water_allocated: f64,
    /// Residential share
    pub allocated_to_residential: f64,
    /// Commercial share
    pub allocated_to_commercial: f64,
    /// Industrial share
    pub allocated_to_industrial: f64,
    /// Public share
    pub allocated_to_public: f64,
    /// Plan status
    pub status: PlanStatus,
    /// Author
    pub created_by: i64,
}

/// Partial update of a distribution plan
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DistributionPlanUpdate {
    /// New name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan_name: Option<String>,
    /// New description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// New total
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_water_allocated: Option<f64>,
    /// New status
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<PlanStatus>,
}

/// Capital investment plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvestmentPlan {
    /// Numeric identifier
    pub id: i64,
    /// Plan name
    pub plan_name: String,
    /// Description
    #[serde(default)]
    pub description: Option<String>,
    /// Total investment
    pub total_investment: f64,
    /// Infrastructure share
    #[serde(default)]
    pub allocated_for_infrastructure: f64,
    /// Equipment share
    #[serde(default)]
    pub allocated_for_equipment: f64,
    /// Maintenance share
    #[serde(default)]
    pub allocated_for_maintenance: f64,
    /// Staffing share
    #[serde(default)]
    pub allocated_for_human_resources: f64,
    /// Start of the plan period
    pub start_date: Timestamp,
    /// End of the plan period
    pub end_date: Timestamp,
    /// Plan status
    #[serde(default)]
    pub status: PlanStatus,
    /// Author
    pub created_by: i64,
    /// Creation time
    pub created_at: Timestamp,
    /// Last modification time
    #[serde(default)]
    pub updated_at: Option<Timestamp>,
}

/// Payload for creating an investment plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewInvestmentPlan {
    /// Plan name
    pub plan_name: String,
    /// Description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Total investment
    pub total_investment: f64,
    /// Infrastructure share
    pub allocated_for_infrastructure: f64,
    /// Equipment share
    pub allocated_for_equipment: f64,
    /// Maintenance share
    pub allocated_for_maintenance: f64,
    /// Staffing share
    pub allocated_for_human_resources: f64,
    /// Start of the plan period
    pub start_date: Timestamp,
    /// End of the plan period
    pub end_date: Timestamp,
    /// Plan status
    pub status: PlanStatus,
    /// Author
    pub created_by: i64,
}

/// Partial update of an investment plan
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InvestmentPlanUpdate {
    /// New name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan_name: Option<String>,
    /// New description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// New total
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_investment: Option<f64>,
    /// New status
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<PlanStatus>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forecast_query_skips_unset_fields() {
        let query = DemandForecastQuery {
            location: Some("Oktyabrsky".to_string()),
            date_from: None,
            date_to: Some("2024-12-31".to_string()),
        };
        assert_eq!(
            query.query(),
            vec![("location", "Oktyabrsky"), ("date_to", "2024-12-31")]
        );
        assert!(DemandForecastQuery::default().query().is_empty());
    }

    #[test]
    fn demand_type_defaults_to_residential() {
        let demand: WaterDemand = serde_json::from_value(serde_json::json!({
            "id": 1,
            "location": "Sverdlovsky",
            "demand_amount": 1250.5,
            "demand_date": "2024-07-01",
            "created_at": "2024-07-02T00:00:00Z"
        }))
        .unwrap();
        assert_eq!(demand.demand_type, "residential");
        assert!(!demand.forecasted);
    }

    #[test]
    fn unallocated_volume() {
        let plan: WaterDistributionPlan = serde_json::from_value(serde_json::json!({
            "id": 2,
            "plan_name": "Summer 2024",
            "start_date": "2024-06-01",
            "end_date": "2024-08-31",
            "total_water_allocated": 1000.0,
            "allocated_to_residential": 600.0,
            "allocated_to_commercial": 200.0,
            "allocated_to_industrial": 100.0,
            "allocated_to_public": 50.0,
            "status": "approved",
            "created_by": 1,
            "created_at": "2024-05-01T00:00:00Z"
        }))
        .unwrap();
        assert!((plan.unallocated() - 50.0).abs() < f64::EPSILON);
        assert_eq!(plan.status, PlanStatus::Approved);
    }
}
