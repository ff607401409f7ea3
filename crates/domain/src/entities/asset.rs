//! Water assets and their maintenance history

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::{AssetStatus, Timestamp};

/// A tracked asset (pipe section, pump, reservoir, meter, ...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaterAsset {
    /// Numeric identifier
    pub id: i64,
    /// Asset name
    pub name: String,
    /// Asset type
    pub asset_type: String,
    /// Description
    #[serde(default)]
    pub description: Option<String>,
    /// Address or area
    pub location: String,
    /// Latitude
    #[serde(default)]
    pub latitude: Option<f64>,
    /// Longitude
    #[serde(default)]
    pub longitude: Option<f64>,
    /// Installation date
    #[serde(default)]
    pub installation_date: Option<Timestamp>,
    /// Last maintenance date
    #[serde(default)]
    pub last_maintenance: Option<Timestamp>,
    /// Next scheduled maintenance
    #[serde(default)]
    pub next_maintenance: Option<Timestamp>,
    /// Operational status
    #[serde(default)]
    pub status: AssetStatus,
    /// Whether the asset is in service
    #[serde(default)]
    pub is_operational: bool,
    /// Book value
    #[serde(default)]
    pub asset_value: Option<f64>,
    /// Yearly depreciation rate
    #[serde(default)]
    pub depreciation_rate: f64,
    /// Creation time
    pub created_at: Timestamp,
    /// Last modification time
    #[serde(default)]
    pub updated_at: Option<Timestamp>,
}

impl WaterAsset {
    /// Scheduled maintenance is at or before `now`
    ///
    /// Assets without a schedule are never due.
    #[must_use]
    pub fn maintenance_due_at(&self, now: DateTime<Utc>) -> bool {
        self.next_maintenance
            .is_some_and(|next| next.is_due_at(now))
    }
}

/// Payload for registering an asset
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewAsset {
    /// Asset name
    pub name: String,
    /// Asset type
    pub asset_type: String,
    /// Description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Address or area
    pub location: String,
    /// Installation date
    #[serde(skip_serializing_if = "Option::is_none")]
    pub installation_date: Option<Timestamp>,
    /// Next scheduled maintenance
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_maintenance: Option<Timestamp>,
    /// Operational status
    pub status: AssetStatus,
    /// Whether the asset is in service
    pub is_operational: bool,
    /// Book value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asset_value: Option<f64>,
    /// Yearly depreciation rate
    pub depreciation_rate: f64,
}

/// Partial update of an asset
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssetUpdate {
    /// New name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New location
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Reschedule maintenance
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_maintenance: Option<Timestamp>,
    /// New status
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<AssetStatus>,
    /// Put in or out of service
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_operational: Option<bool>,
    /// New book value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asset_value: Option<f64>,
}

/// A maintenance record for an asset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetMaintenance {
    /// Numeric identifier
    pub id: i64,
    /// Maintained asset
    pub asset_id: i64,
    /// Scheduled, unscheduled, repair, ...
    pub maintenance_type: String,
    /// Work description
    #[serde(default)]
    pub description: Option<String>,
    /// Who did the work
    #[serde(default)]
    pub performed_by: Option<String>,
    /// Cost of the work
    #[serde(default)]
    pub cost: Option<f64>,
    /// When the work was done
    pub maintenance_date: Timestamp,
    /// Next scheduled maintenance
    #[serde(default)]
    pub next_maintenance_date: Option<Timestamp>,
    /// Creation time
    pub created_at: Timestamp,
    /// Last modification time
    #[serde(default)]
    pub updated_at: Option<Timestamp>,
}

/// Payload for recording maintenance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewAssetMaintenance {
    /// Maintained asset
    pub asset_id: i64,
    /// Type of work
    pub maintenance_type: String,
    /// Work description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Who did the work
    #[serde(skip_serializing_if = "Option::is_none")]
    pub performed_by: Option<String>,
    /// Cost of the work
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost: Option<f64>,
    /// When the work was done
    pub maintenance_date: Timestamp,
    /// Next scheduled maintenance
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_maintenance_date: Option<Timestamp>,
}

/// Partial update of a maintenance record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssetMaintenanceUpdate {
    /// New description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Corrected cost
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost: Option<f64>,
    /// Reschedule the follow-up
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_maintenance_date: Option<Timestamp>,
}
