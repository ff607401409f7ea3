//! Water infrastructure objects and detected leaks

use serde::{Deserialize, Serialize};

use crate::value_objects::{ConditionStatus, Timestamp};

/// A pipe, pumping station, reservoir or similar network object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaterInfrastructure {
    /// Numeric identifier
    pub id: i64,
    /// Object name
    pub name: String,
    /// Object type (pipe, pump station, reservoir, ...)
    #[serde(rename = "type")]
    pub kind: String,
    /// Address or area
    pub location: String,
    /// Latitude
    #[serde(default)]
    pub latitude: Option<f64>,
    /// Longitude
    #[serde(default)]
    pub longitude: Option<f64>,
    /// Line pressure
    #[serde(default)]
    pub pressure: Option<f64>,
    /// Water temperature
    #[serde(default)]
    pub temperature: Option<f64>,
    /// Whether a leak is currently detected
    #[serde(default)]
    pub leak_detected: bool,
    /// Date of the last inspection
    #[serde(default)]
    pub last_inspection: Option<Timestamp>,
    /// Physical condition
    #[serde(default)]
    pub condition_status: ConditionStatus,
    /// Date of installation
    #[serde(default)]
    pub installation_date: Option<Timestamp>,
    /// Creation time
    pub created_at: Timestamp,
    /// Last modification time
    #[serde(default)]
    pub updated_at: Option<Timestamp>,
}

/// Payload for registering an infrastructure object
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewInfrastructure {
    /// Object name
    pub name: String,
    /// Object type
    #[serde(rename = "type")]
    pub kind: String,
    /// Address or area
    pub location: String,
    /// Latitude
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    /// Longitude
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    /// Line pressure
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pressure: Option<f64>,
    /// Water temperature
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    /// Whether a leak is detected
    pub leak_detected: bool,
    /// Physical condition
    pub condition_status: ConditionStatus,
    /// Date of installation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub installation_date: Option<Timestamp>,
}

/// Partial update of an infrastructure object
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InfrastructureUpdate {
    /// New name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New location
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// New pressure reading
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pressure: Option<f64>,
    /// New temperature reading
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    /// Set or clear the leak flag
    #[serde(skip_serializing_if = "Option::is_none")]
    pub leak_detected: Option<bool>,
    /// Date of the latest inspection
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_inspection: Option<Timestamp>,
    /// New condition
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition_status: Option<ConditionStatus>,
}

/// A leak detected on an infrastructure object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaterLeak {
    /// Numeric identifier
    pub id: i64,
    /// Affected infrastructure object
    pub infrastructure_id: i64,
    /// Detection time
    pub leak_detected_at: Timestamp,
    /// Severity label
    pub severity: String,
    /// Free-text description
    #[serde(default)]
    pub description: Option<String>,
    /// Whether the leak has been repaired
    #[serde(default)]
    pub repaired: bool,
    /// Repair time
    #[serde(default)]
    pub repair_date: Option<Timestamp>,
    /// Creation time
    pub created_at: Timestamp,
    /// Last modification time
    #[serde(default)]
    pub updated_at: Option<Timestamp>,
}

/// Payload for reporting a leak
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewLeak {
    /// Affected infrastructure object
    pub infrastructure_id: i64,
    /// Detection time
    pub leak_detected_at: Timestamp,
    /// Severity label
    pub severity: String,
    /// Free-text description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Partial update of a leak
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LeakUpdate {
    /// New severity
    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity: Option<String>,
    /// New description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Mark repaired
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repaired: Option<bool>,
    /// Repair time
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repair_date: Option<Timestamp>,
}
