//! Citizen complaints and their categories

use serde::{Deserialize, Serialize};

use crate::value_objects::{ComplaintStatus, Priority, Timestamp};

/// A complaint filed by a citizen or staff member
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Complaint {
    /// Numeric identifier
    pub id: i64,
    /// Reporting user, when logged in
    #[serde(default)]
    pub user_id: Option<i64>,
    /// Reporter name
    pub full_name: String,
    /// Reporter email
    #[serde(default)]
    pub email: Option<String>,
    /// Reporter phone
    #[serde(default)]
    pub phone: Option<String>,
    /// Category name (water quality, leak, sanitation, ...)
    pub category: String,
    /// Where the problem is
    #[serde(default)]
    pub location: Option<String>,
    /// Latitude
    #[serde(default)]
    pub latitude: Option<f64>,
    /// Longitude
    #[serde(default)]
    pub longitude: Option<f64>,
    /// Problem description
    pub description: String,
    /// Attached photo
    #[serde(default)]
    pub photo_url: Option<String>,
    /// Urgency
    #[serde(default)]
    pub priority: Priority,
    /// Lifecycle state
    #[serde(default)]
    pub status: ComplaintStatus,
    /// User responsible for resolution
    #[serde(default)]
    pub assigned_to: Option<i64>,
    /// Resolution time
    #[serde(default)]
    pub resolved_at: Option<Timestamp>,
    /// Creation time
    pub created_at: Timestamp,
    /// Last modification time
    #[serde(default)]
    pub updated_at: Option<Timestamp>,
}

/// Payload for filing a complaint
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewComplaint {
    /// Reporting user
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
    /// Reporter name
    pub full_name: String,
    /// Reporter email
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Reporter phone
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Category name
    pub category: String,
    /// Where the problem is
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Problem description
    pub description: String,
    /// Urgency
    pub priority: Priority,
}

/// Partial update of a complaint
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComplaintUpdate {
    /// New category
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// New description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// New urgency
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    /// New lifecycle state
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ComplaintStatus>,
    /// New assignee
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<i64>,
}

/// A complaint category managed by administrators
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplaintCategory {
    /// Numeric identifier
    pub id: i64,
    /// Unique category name
    pub name: String,
    /// Description
    #[serde(default)]
    pub description: Option<String>,
    /// Whether new complaints may use it
    #[serde(default)]
    pub is_active: bool,
    /// Creation time
    pub created_at: Timestamp,
    /// Last modification time
    #[serde(default)]
    pub updated_at: Option<Timestamp>,
}

/// Payload for creating a category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewComplaintCategory {
    /// Unique category name
    pub name: String,
    /// Description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Whether it starts active
    pub is_active: bool,
}

/// Partial update of a category
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplaintCategoryUpdate {
    /// New name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Activate or deactivate
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_with_backend_defaults() {
        let complaint: Complaint = serde_json::from_value(serde_json::json!({
            "id": 9,
            "full_name": "Nurlan B.",
            "category": "leak",
            "description": "Water on the street",
            "created_at": "2024-05-01T10:00:00Z"
        }))
        .unwrap();
        assert_eq!(complaint.priority, Priority::Medium);
        assert_eq!(complaint.status, ComplaintStatus::Pending);
        assert!(complaint.assigned_to.is_none());
    }

    #[test]
    fn update_serializes_only_set_fields() {
        let update = ComplaintUpdate {
            status: Some(ComplaintStatus::InProgress),
            ..ComplaintUpdate::default()
        };
        assert_eq!(
            serde_json::to_value(&update).unwrap(),
            serde_json::json!({ "status": "in_progress" })
        );
    }
}
