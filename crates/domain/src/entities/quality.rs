//! Water-quality samples and the alerts raised from them

use serde::{Deserialize, Serialize};

use crate::value_objects::{QualityStatus, Timestamp};

/// A laboratory or field measurement at a sampling point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaterQuality {
    /// Numeric identifier
    pub id: i64,
    /// Sampling point
    pub location: String,
    /// Latitude
    #[serde(default)]
    pub latitude: Option<f64>,
    /// Longitude
    #[serde(default)]
    pub longitude: Option<f64>,
    /// pH
    #[serde(default)]
    pub ph_level: Option<f64>,
    /// Residual chlorine, mg/l
    #[serde(default)]
    pub chlorine_level: Option<f64>,
    /// Turbidity, NTU
    #[serde(default)]
    pub turbidity: Option<f64>,
    /// Temperature, °C
    #[serde(default)]
    pub temperature: Option<f64>,
    /// Dissolved oxygen, mg/l
    #[serde(default)]
    pub dissolved_oxygen: Option<f64>,
    /// E. coli count
    #[serde(default)]
    pub e_coli: Option<f64>,
    /// Total solids, mg/l
    #[serde(default)]
    pub total_solids: Option<f64>,
    /// Chemical oxygen demand
    #[serde(default)]
    pub chemical_oxygen_demand: Option<f64>,
    /// Biological oxygen demand
    #[serde(default)]
    pub biological_oxygen_demand: Option<f64>,
    /// When the sample was taken
    pub date_measured: Timestamp,
    /// Who took the sample
    #[serde(default)]
    pub measured_by: Option<String>,
    /// Free-text notes
    #[serde(default)]
    pub notes: Option<String>,
    /// Classification of the sample
    #[serde(default)]
    pub quality_status: QualityStatus,
    /// Creation time
    pub created_at: Timestamp,
    /// Last modification time
    #[serde(default)]
    pub updated_at: Option<Timestamp>,
}

/// Payload for recording a measurement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewWaterQuality {
    /// Sampling point
    pub location: String,
    /// pH
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ph_level: Option<f64>,
    /// Residual chlorine
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chlorine_level: Option<f64>,
    /// Turbidity
    #[serde(skip_serializing_if = "Option::is_none")]
    pub turbidity: Option<f64>,
    /// Temperature
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    /// When the sample was taken
    pub date_measured: Timestamp,
    /// Who took the sample
    #[serde(skip_serializing_if = "Option::is_none")]
    pub measured_by: Option<String>,
    /// Free-text notes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Classification
    pub quality_status: QualityStatus,
}

/// Partial update of a measurement
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WaterQualityUpdate {
    /// Corrected pH
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ph_level: Option<f64>,
    /// Corrected chlorine level
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chlorine_level: Option<f64>,
    /// Corrected turbidity
    #[serde(skip_serializing_if = "Option::is_none")]
    pub turbidity: Option<f64>,
    /// New notes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Reclassification
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quality_status: Option<QualityStatus>,
}

/// Alert raised for an out-of-limit sample
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaterQualityAlert {
    /// Numeric identifier
    pub id: i64,
    /// Sample that triggered the alert
    pub quality_id: i64,
    /// Alert type (warning, alarm)
    pub alert_type: String,
    /// Alert text
    pub message: String,
    /// Whether the alert is still active
    #[serde(default)]
    pub is_active: bool,
    /// Whether someone acknowledged it
    #[serde(default)]
    pub acknowledged: bool,
    /// User who acknowledged it
    #[serde(default)]
    pub acknowledged_by: Option<i64>,
    /// Acknowledgement time
    #[serde(default)]
    pub acknowledged_at: Option<Timestamp>,
    /// Creation time
    pub created_at: Timestamp,
    /// Last modification time
    #[serde(default)]
    pub updated_at: Option<Timestamp>,
}

impl WaterQualityAlert {
    /// Active and not yet acknowledged
    #[must_use]
    pub const fn needs_attention(&self) -> bool {
        self.is_active && !self.acknowledged
    }
}

/// Payload for raising an alert
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewQualityAlert {
    /// Sample that triggered the alert
    pub quality_id: i64,
    /// Alert type
    pub alert_type: String,
    /// Alert text
    pub message: String,
    /// Whether the alert starts active
    pub is_active: bool,
}

/// Partial update of an alert
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualityAlertUpdate {
    /// New text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Activate or deactivate
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}
