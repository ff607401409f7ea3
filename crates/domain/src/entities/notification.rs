//! Notifications and per-user delivery settings

use serde::{Deserialize, Serialize};

use crate::value_objects::{NotificationKind, Priority, Timestamp};

/// A notification addressed to a user or an audience
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// Numeric identifier
    pub id: i64,
    /// Addressee, when personal
    #[serde(default)]
    pub user_id: Option<i64>,
    /// Title
    pub title: String,
    /// Body
    pub message: String,
    /// Kind
    #[serde(default)]
    pub notification_type: NotificationKind,
    /// Urgency
    #[serde(default)]
    pub priority: Priority,
    /// Whether the addressee has read it
    #[serde(default)]
    pub is_read: bool,
    /// all, admin, user or a named group
    #[serde(default = "default_audience")]
    pub target_audience: String,
    /// Creation time
    pub created_at: Timestamp,
    /// Last modification time
    #[serde(default)]
    pub updated_at: Option<Timestamp>,
}

fn default_audience() -> String {
    "all".to_string()
}

/// Payload for publishing a notification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewNotification {
    /// Addressee
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
    /// Title
    pub title: String,
    /// Body
    pub message: String,
    /// Kind
    pub notification_type: NotificationKind,
    /// Urgency
    pub priority: Priority,
    /// Audience
    pub target_audience: String,
}

/// Partial update of a notification
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationUpdate {
    /// New title
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// New body
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// New urgency
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    /// Read flag
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_read: Option<bool>,
}

/// Delivery preferences of one user for one notification kind
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationSetting {
    /// Numeric identifier
    pub id: i64,
    /// Owner
    pub user_id: i64,
    /// Kind the setting applies to
    pub notification_type: String,
    /// Master switch
    #[serde(default)]
    pub enabled: bool,
    /// Deliver by email
    #[serde(default)]
    pub channel_email: bool,
    /// Deliver by SMS
    #[serde(default)]
    pub channel_sms: bool,
    /// Deliver by push
    #[serde(default)]
    pub channel_push: bool,
    /// Creation time
    pub created_at: Timestamp,
    /// Last modification time
    #[serde(default)]
    pub updated_at: Option<Timestamp>,
}

/// Payload for creating a setting
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewNotificationSetting {
    /// Owner
    pub user_id: i64,
    /// Kind the setting applies to
    pub notification_type: String,
    /// Master switch
    pub enabled: bool,
    /// Deliver by email
    pub channel_email: bool,
    /// Deliver by SMS
    pub channel_sms: bool,
    /// Deliver by push
    pub channel_push: bool,
}

/// Partial update of a setting
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationSettingUpdate {
    /// Master switch
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    /// Email channel
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel_email: Option<bool>,
    /// SMS channel
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel_sms: Option<bool>,
    /// Push channel
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel_push: Option<bool>,
}
