//! User entity
//!
//! The user record doubles as the session identity: the backend's
//! "current user" endpoint returns the same shape.

use serde::{Deserialize, Serialize};

use crate::value_objects::{Role, Timestamp};

/// A backend user account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Numeric identifier
    pub id: i64,
    /// Login name (unique)
    pub username: String,
    /// Contact email (unique when present)
    #[serde(default)]
    pub email: Option<String>,
    /// Display name
    #[serde(default)]
    pub full_name: Option<String>,
    /// Whether the account may log in
    #[serde(default = "default_active")]
    pub is_active: bool,
    /// Role used for view gating
    #[serde(default)]
    pub role: Role,
    /// Creation time
    pub created_at: Timestamp,
    /// Last modification time
    #[serde(default)]
    pub updated_at: Option<Timestamp>,
}

const fn default_active() -> bool {
    true
}

impl User {
    /// Name to show in listings, falling back to the login name
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.full_name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(&self.username)
    }
}

/// Payload for registering a user
///
/// The backend assigns the `user` role to new accounts regardless of the
/// requested role; admins promote through [`UserUpdate`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    /// Login name
    pub username: String,
    /// Contact email
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Display name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    /// Plain-text password, hashed server-side
    pub password: String,
    /// Whether the account starts active
    pub is_active: bool,
    /// Requested role
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
}

/// Partial update of a user; absent fields are left untouched
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserUpdate {
    /// New login name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// New email
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// New display name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    /// New password
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    /// Activate or deactivate
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    /// Promote or demote
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
}
